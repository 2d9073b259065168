use std::collections::HashMap;

use redcode::{RelaxedCompleteInstruction, RelaxedWarrior};

use crate::{
    error::ParseError,
    line::{parse_line, Line},
};

/// Configures restrictions enforced by [`parse`] beyond the base grammar.
///
/// The base grammar is already strict: a modifier and both addressing-mode
/// prefixes are always required, `LDP`/`STP`/`PIN`/`END` are always rejected,
/// and `ORG` (when present) must be the warrior's first non-comment,
/// non-blank line and must name exactly one previously- or later-defined
/// label. `ParseOptions` only adds the 1988 opcode/modifier/mode
/// restriction and an optional maximum warrior length.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub struct ParseOptions {
    /// Reject any opcode, modifier, or addressing mode outside the ICWS '88
    /// instruction set
    strict_1988_mode: bool,
    /// Reject warriors whose instruction count exceeds this bound
    max_length: Option<usize>,
}

impl ParseOptions {
    /// The default, permissive options: no 1988 restriction, no length cap.
    pub const DEFAULT_OPTIONS: Self = Self {
        strict_1988_mode: false,
        max_length: None,
    };

    /// Restricts parsing to the ICWS '88 opcode, modifier, and addressing
    /// mode sets.
    #[must_use]
    pub const fn strict_1988_mode(mut self) -> Self {
        self.strict_1988_mode = true;
        self
    }

    /// Rejects warriors with more than `max_length` instructions.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Parses a loadfile-formatted warrior from `input`.
///
/// Every line is one of: blank, a full-line comment, a leading `ORG <label>`
/// pseudo-op, or an optionally labeled instruction. There is no tolerance for
/// omitted modifiers, omitted addressing-mode prefixes, `PIN`/`END`
/// pseudo-ops, or any opcode/modifier/mode the grammar doesn't name: each such
/// deviation is reported with a specific [`ParseError`] variant rather than
/// guessed at.
///
/// # Errors
///
/// Returns a [`ParseError`] describing exactly which rule the input violated.
pub fn parse(
    input: &str,
    options: ParseOptions,
) -> Result<RelaxedWarrior, ParseError> {
    let mut code = Vec::new();
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut org_label: Option<String> = None;
    let mut seen_non_comment_line = false;

    for raw_line in input.lines() {
        match parse_line(raw_line)? {
            Line::Blank | Line::Comment => {}
            Line::Org(label) => {
                if seen_non_comment_line {
                    return Err(ParseError::OrgNotFirst);
                }
                org_label = Some(label);
                seen_non_comment_line = true;
            }
            Line::Instruction { label, instr } => {
                seen_non_comment_line = true;
                if let Some(label) = label {
                    if labels.insert(label.clone(), code.len()).is_some() {
                        return Err(ParseError::DuplicateLabel(label));
                    }
                }
                if options.strict_1988_mode {
                    validate_1988(&instr)?;
                }
                code.push(instr);
            }
        }
    }

    if let Some(max_length) = options.max_length {
        if code.len() > max_length {
            return Err(ParseError::WarriorTooLong {
                len: code.len(),
                max: max_length,
            });
        }
    }

    let entry_point = match org_label {
        None => 0,
        Some(label) => {
            let index = labels
                .get(&label)
                .ok_or(ParseError::OrgUndefinedLabel(label))?;
            i64::try_from(*index).unwrap_or(0)
        }
    };

    if code.is_empty() {
        return Err(ParseError::EmptyWarrior);
    }

    Ok(RelaxedWarrior { code, entry_point })
}

/// Parses a single instruction, with no surrounding labels, comments, or
/// `ORG` pseudo-ops permitted.
///
/// # Errors
///
/// Returns a [`ParseError`] describing exactly which rule the input
/// violated, including [`ParseError::Syntax`] if the input contains more
/// than one non-blank line.
pub fn parse_instr(
    input: &str,
    options: ParseOptions,
) -> Result<RelaxedCompleteInstruction, ParseError> {
    let mut found: Option<RelaxedCompleteInstruction> = None;
    for raw_line in input.lines() {
        match parse_line(raw_line)? {
            Line::Blank | Line::Comment => {}
            Line::Org(_) => return Err(ParseError::OrgNotFirst),
            Line::Instruction { label: _, instr } => {
                if found.is_some() {
                    return Err(ParseError::Syntax(
                        "expected exactly one instruction".to_owned(),
                    ));
                }
                if options.strict_1988_mode {
                    validate_1988(&instr)?;
                }
                found = Some(instr);
            }
        }
    }
    found.ok_or(ParseError::MissingOperand)
}

fn validate_1988(instr: &RelaxedCompleteInstruction) -> Result<(), ParseError> {
    use redcode::{AddrMode, Modifier, Opcode};

    let opcode_allowed = matches!(
        instr.instr.opcode,
        Opcode::Dat
            | Opcode::Mov
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Jmp
            | Opcode::Jmz
            | Opcode::Jmn
            | Opcode::Djn
            | Opcode::Cmp
            | Opcode::Slt
            | Opcode::Spl
    );
    if !opcode_allowed {
        return Err(ParseError::Strict1988Opcode(instr.instr.opcode));
    }

    let modifier_allowed = matches!(
        instr.instr.modifier,
        Modifier::A | Modifier::B | Modifier::AB | Modifier::BA | Modifier::F
    );
    if !modifier_allowed {
        return Err(ParseError::Strict1988Modifier(instr.instr.modifier));
    }

    let mode_allowed = |mode: AddrMode| {
        matches!(
            mode,
            AddrMode::Immediate
                | AddrMode::Direct
                | AddrMode::IndirectB
                | AddrMode::PredecB
                | AddrMode::PostincB
        )
    };
    if !mode_allowed(instr.instr.a_addr_mode) {
        return Err(ParseError::Strict1988Mode(instr.instr.a_addr_mode));
    }
    if !mode_allowed(instr.instr.b_addr_mode) {
        return Err(ParseError::Strict1988Mode(instr.instr.b_addr_mode));
    }
    Ok(())
}
