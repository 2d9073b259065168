//! `mars`: runs a single Redcode battle between two warrior files and
//! reports pMARS-style scores.
//!
//! ```text
//! mars --core-size 8000 --rounds 100 --seed 1 warrior1.red warrior2.red
//! ```
//!
//! On success, prints the two-line `scores` contract to stdout. On any
//! parse, validation, or internal error, prints a single `ERROR: <reason>`
//! line and exits non-zero -- this process never panics its way out of a bad
//! warrior.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use mars_core::battle::run_battle;
use mars_core::params::BattleParameters;
use redcode_parser::{parse, ParseOptions};
use serde::Deserialize;
use structopt::StructOpt;

/// Command-line options. Any field also settable via `--config` is
/// overridden by an explicit flag.
#[derive(Debug, StructOpt)]
#[structopt(name = "mars", about = "Run one Redcode battle and print scores")]
struct Opt {
    /// Path to warrior 1's loadfile
    warrior1: PathBuf,

    /// Path to warrior 2's loadfile
    warrior2: PathBuf,

    /// Optional TOML file overriding the default battle parameters
    #[structopt(long)]
    config: Option<PathBuf>,

    /// Number of addressable core cells
    #[structopt(long, default_value = "8000")]
    core_size: u32,

    /// Maximum cycles executed per round
    #[structopt(long, default_value = "80000")]
    max_cycles: u32,

    /// Maximum simultaneous processes per warrior
    #[structopt(long, default_value = "8000")]
    max_processes: usize,

    /// Fold limit for A-operand resolution and B-cell reads
    #[structopt(long, default_value = "8000")]
    read_limit: u32,

    /// Fold limit for B-operand write-target resolution
    #[structopt(long, default_value = "8000")]
    write_limit: u32,

    /// Minimum start-address separation between the two warriors
    #[structopt(long, default_value = "100")]
    min_distance: u32,

    /// Maximum accepted warrior length, in instructions
    #[structopt(long, default_value = "100")]
    max_warrior_length: usize,

    /// Number of rounds to play
    #[structopt(long, default_value = "1")]
    rounds: u32,

    /// Deterministic placement seed; omit for a non-deterministic battle
    #[structopt(long)]
    seed: Option<u64>,

    /// Restrict parsing and execution to the ICWS '88 instruction set
    #[structopt(long)]
    strict_1988: bool,
}

/// Overrides loadable from `--config`; any field present there wins over the
/// corresponding CLI default (but not over an explicitly passed flag).
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    core_size: Option<u32>,
    max_cycles: Option<u32>,
    max_processes: Option<usize>,
    read_limit: Option<u32>,
    write_limit: Option<u32>,
    min_distance: Option<u32>,
    max_warrior_length: Option<usize>,
    rounds: Option<u32>,
    seed: Option<u64>,
    strict_1988: Option<bool>,
}

impl Opt {
    fn battle_parameters(&self, config: &ConfigFile) -> BattleParameters {
        BattleParameters {
            core_size: config.core_size.unwrap_or(self.core_size),
            max_cycles: config.max_cycles.unwrap_or(self.max_cycles),
            max_processes: config.max_processes.unwrap_or(self.max_processes),
            read_limit: config.read_limit.unwrap_or(self.read_limit),
            write_limit: config.write_limit.unwrap_or(self.write_limit),
            min_distance: config.min_distance.unwrap_or(self.min_distance),
            max_warrior_length: config
                .max_warrior_length
                .unwrap_or(self.max_warrior_length),
            rounds: config.rounds.unwrap_or(self.rounds),
            seed: self.seed.or(config.seed),
            strict_1988_mode: self.strict_1988 || config.strict_1988.unwrap_or(false),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<ConfigFile> {
    let Some(path) = path else {
        return Ok(ConfigFile::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

fn parse_options(params: &BattleParameters) -> ParseOptions {
    let options = ParseOptions::DEFAULT_OPTIONS
        .with_max_length(params.max_warrior_length);
    if params.strict_1988_mode {
        options.strict_1988_mode()
    } else {
        options
    }
}

/// Loads and parses a warrior file, resolving its fields against `core_size`.
fn load_warrior(path: &PathBuf, options: ParseOptions, core_size: u32) -> Result<redcode::Warrior, String> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return Err(format!("reading {}: {err}", path.display())),
    };
    match parse(&text, options) {
        Ok(relaxed) => Ok(relaxed.normalize(core_size)),
        Err(err) => Err(format!("parsing {}: {err}", path.display())),
    }
}

fn run() -> Result<String, String> {
    let opt = Opt::from_args();
    let config = load_config(opt.config.as_ref()).map_err(|err| format!("{err:#}"))?;
    let params = opt.battle_parameters(&config);

    params.validate().map_err(|err| err.to_string())?;

    let options = parse_options(&params);
    let warrior1 = load_warrior(&opt.warrior1, options, params.core_size)?;
    let warrior2 = load_warrior(&opt.warrior2, options, params.core_size)?;

    let score = run_battle(&warrior1, &warrior2, &params).map_err(|err| err.to_string())?;
    Ok(score.format())
}

/// Builds the `env_logger` backend: ordinary diagnostics go to stderr, but
/// when `REDCODE_TRACE_FILE` names a writable path, trace-level output
/// (spec §6's per-instruction trace sink, emitted by `mars_core::trace`
/// when built with the `trace` feature) is redirected there instead.
fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if let Ok(path) = std::env::var("REDCODE_TRACE_FILE") {
        if let Ok(file) = fs::OpenOptions::new().create(true).append(true).open(&path) {
            builder
                .target(env_logger::Target::Pipe(Box::new(file)))
                .filter_level(log::LevelFilter::Trace);
        }
    }
    builder.init();
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(reason) => {
            println!("ERROR: {reason}");
            ExitCode::FAILURE
        }
    }
}
