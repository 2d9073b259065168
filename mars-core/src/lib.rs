//! # Marzipan-Core
//!
//! Marzipan-Core is a deterministic, pMARS-compatible Memory Array Redcode
//! Simulator (MARS) for two-warrior Core War battles.  It is part of
//! Marzipan, a collection of related tools for CoreWar.
//!
//! ## Usage
//!
//! The crate composes into a pipeline matching the battle lifecycle: an
//! operand evaluator ([`operand`]) resolves each instruction's A/B operands,
//! an execution unit ([`execute`]) dispatches on opcode × modifier and
//! mutates [`core::Core`], a match engine ([`round`]) runs one round to
//! completion, and a battle driver ([`battle`]) composes a fixed number of
//! rounds into a scored result, placing warrior 2 with the Park-Miller
//! placement RNG in [`rng`].
//!
//! ```rust
//! # use redcode::*;
//! # use mars_core::battle::run_battle;
//! # use mars_core::params::BattleParameters;
//! let params = BattleParameters {
//!     core_size: 8000,
//!     max_cycles: 80_000,
//!     max_processes: 8000,
//!     read_limit: 8000,
//!     write_limit: 8000,
//!     min_distance: 100,
//!     max_warrior_length: 100,
//!     rounds: 1,
//!     seed: Some(1),
//!     strict_1988_mode: false,
//! };
//!
//! let imp = Warrior {
//!     code: vec![CompleteInstruction {
//!         instr: Instruction {
//!             opcode: Opcode::Mov,
//!             modifier: Modifier::I,
//!             a_addr_mode: AddrMode::Direct,
//!             b_addr_mode: AddrMode::Direct,
//!         },
//!         a_field: 0,
//!         b_field: 1,
//!     }],
//!     entry_point: 0,
//! };
//!
//! let score = run_battle(&imp, &imp, &params).unwrap();
//! // Identical warriors short-circuit to a draw without running a round.
//! assert_eq!(score.first, params.rounds);
//! assert_eq!(score.second, params.rounds);
//! ```
//!
//! ## MARS
//!
//! The term MARS (Memory Array Redcode Simulator) describes a fully featured
//! emulator like pMARS (the defacto standard emulator) or exhaust. This crate
//! is a MARS: it owns warrior placement, round setup, and battle scoring, not
//! just instruction emulation. Parsing warrior text lives in the sibling
//! `redcode-parser` crate; this crate consumes already-parsed [`redcode::Warrior`]
//! values.
//!
//! Two collaborators sit outside this crate's scope by design (spec
//! non-goals): the evolutionary driver (population management, breeding,
//! archives) and the warrior text normalizer used before evolved warriors
//! reach the parser. This crate's contract with both is a pure function:
//! `(Warrior, Warrior, BattleParameters) -> Result<BattleScore, BattleError>`.
// Make clippy as annoying as possible
#![deny(
    // All typically enabled warnings are converted into errors
    // includes correctness, suspicious, style, complexity, and perf
    clippy::all,
    // Error on cargo lints
    clippy::cargo,
)]
#![warn(
    // Warn on pedantic and in-development nursery lints
    clippy::pedantic,
    clippy::nursery,
    // Lints from "restriction" group - enforce a consistent if arbitrary style
    clippy::alloc_instead_of_core,
    clippy::allow_attributes_without_reason,
    clippy::arithmetic_side_effects,
    clippy::unnecessary_cast,
    clippy::as_underscore,
    clippy::assertions_on_result_states,
    clippy::clone_on_ref_ptr,
    clippy::create_dir,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    clippy::default_numeric_fallback,
    clippy::deref_by_slicing,
    clippy::empty_drop,
    clippy::empty_structs_with_brackets,
    clippy::exit,
    clippy::expect_used,
    clippy::filetype_is_file,
    clippy::float_arithmetic,
    clippy::fn_to_numeric_cast_any,
    clippy::format_push_string,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    clippy::indexing_slicing,
    clippy::large_include_file,
    clippy::let_underscore_must_use,
    clippy::lossy_float_literal,
    clippy::map_err_ignore,
    clippy::mem_forget,
    clippy::missing_docs_in_private_items,
    clippy::missing_enforced_import_renames,
    clippy::mixed_read_write_in_expression,
    clippy::mod_module_files,
    clippy::multiple_inherent_impl,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::partial_pub_fields,
    clippy::pattern_type_mismatch,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::unseparated_literal_suffix,
    clippy::shadow_unrelated,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::str_to_string,
    clippy::string_slice,
    clippy::string_to_string,
    clippy::suspicious_xor_used_as_pow,
    clippy::todo,
    clippy::try_err,
    clippy::undocumented_unsafe_blocks,
    clippy::unimplemented,
    clippy::unnecessary_safety_comment,
    clippy::unnecessary_safety_doc,
    clippy::unnecessary_self_imports,
    clippy::unneeded_field_pattern,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    clippy::use_debug,
    clippy::verbose_file_reads,
)]
#![allow(
    clippy::needless_pass_by_value,
    reason = "Internal Compiler Error bug workaround: https://github.com/rust-lang/rust-clippy/issues/10344"
)]

// Use no-std collections
extern crate alloc;

/// An offset into the core, valid from 0 to `core_size - 1` inclusive.
pub type CoreAddr = redcode::FieldValue;

/// Battle-scoped error types ([`error::BattleError`]).
pub mod error;

/// Immutable per-battle configuration ([`params::BattleParameters`]).
pub mod params;

/// The circular core memory a round plays out on.
pub mod core;

/// Optional per-instruction trace sink.
pub mod trace;

/// Per-warrior process FIFOs ([`process_queues::ProcessQueues`]).
pub mod process_queues;

/// Operand resolution (spec §4.4).
pub mod operand;

/// Opcode × modifier dispatch (spec §4.5).
pub mod execute;

/// Park-Miller placement RNG (spec §4.7).
pub mod rng;

/// The match engine: runs one round to completion (spec §4.6).
pub mod round;

/// The battle driver: composes rounds into a scored result (spec §4.7).
pub mod battle;
