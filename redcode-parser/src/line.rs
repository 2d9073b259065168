use redcode::{Instruction, RelaxedCompleteInstruction};

use crate::{
    error::ParseError,
    primitives::{addr_mode, is_identifier, modifier, number, opcode_token},
};

/// A single line of source, classified by shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// A blank line, or a line containing only whitespace
    Blank,
    /// A full-line comment
    Comment,
    /// `ORG <label>`, carrying the referenced label's name
    Org(String),
    /// An optionally labeled instruction
    Instruction {
        /// The label prefixing this instruction, if any
        label: Option<String>,
        instr: RelaxedCompleteInstruction,
    },
}

/// Classifies and parses a single line of source (no trailing newline).
pub fn parse_line(raw: &str) -> Result<Line, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with(';') {
        return Ok(Line::Comment);
    }
    if let Some(rest) = strip_keyword(trimmed, "ORG") {
        return parse_org_operand(rest).map(Line::Org);
    }

    let (label, body) = split_label(trimmed);
    let instr = parse_instruction_body(body)?;
    Ok(Line::Instruction { label, instr })
}

/// Strips a case-insensitive keyword followed by at least one space from the
/// front of `input`, returning the remainder. Returns `None` if `input`
/// doesn't start with that keyword as a whole token.
fn strip_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let bytes_consumed = keyword.len();
    if input.len() < bytes_consumed {
        return None;
    }
    let (head, tail) = input.split_at(bytes_consumed);
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    match tail.chars().next() {
        None => Some(""),
        Some(c) if c.is_whitespace() => Some(tail.trim_start()),
        _ => None,
    }
}

fn parse_org_operand(rest: &str) -> Result<String, ParseError> {
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err(ParseError::OrgLabelCount(0)),
        [single] if is_identifier(single) => Ok((*single).to_owned()),
        [single] => Err(ParseError::Syntax(format!(
            "ORG operand `{single}` is not a valid label"
        ))),
        multiple => Err(ParseError::OrgLabelCount(multiple.len())),
    }
}

/// Splits an optional leading label from the instruction body of a line.
///
/// A label is recognized either as `<ident>:` (colon immediately following
/// the identifier) or `<ident> ` where the identifier is not itself a known
/// opcode mnemonic or a rejected `LDP`/`STP` token.
fn split_label(line: &str) -> (Option<String>, &str) {
    if let Some(colon_idx) = line.find(':') {
        let candidate = line[..colon_idx].trim();
        if is_identifier(candidate) {
            return (Some(candidate.to_owned()), line[colon_idx + 1..].trim_start());
        }
    }
    if let Some(space_idx) = line.find(char::is_whitespace) {
        let (first, rest) = line.split_at(space_idx);
        if is_identifier(first) && !is_opcode_keyword(first) {
            return (Some(first.to_owned()), rest.trim_start());
        }
    }
    (None, line)
}

const OPCODE_KEYWORDS: &[&str] = &[
    "DAT", "MOV", "ADD", "SUB", "MUL", "DIV", "MOD", "JMP", "JMZ", "JMN",
    "DJN", "SPL", "SLT", "CMP", "SEQ", "SNE", "NOP", "LDP", "STP",
];

fn is_opcode_keyword(token: &str) -> bool {
    OPCODE_KEYWORDS
        .iter()
        .any(|candidate| token.eq_ignore_ascii_case(candidate))
}

/// Parses the `OPCODE.MOD AMODE NUM, BMODE NUM` body of a labeled or
/// unlabeled instruction line. Both the modifier and both addressing-mode
/// prefixes are mandatory; nothing is ever defaulted.
fn parse_instruction_body(
    body: &str,
) -> Result<RelaxedCompleteInstruction, ParseError> {
    let (after_opcode, opcode_word) =
        opcode_token(body).map_err(|_| syntax_error(body))?;
    let opcode = classify_opcode(opcode_word)?;

    let after_dot = after_opcode
        .strip_prefix('.')
        .ok_or(ParseError::MissingModifier)?;
    let (after_modifier, modifier) = modifier(after_dot)
        .map_err(|_| ParseError::UnknownModifier(first_word(after_dot)))?;

    let after_a_mode_space = after_modifier.trim_start();
    if after_a_mode_space.is_empty() {
        return Err(ParseError::MissingOperand);
    }
    let (after_a_mode, a_addr_mode) = addr_mode(after_a_mode_space)
        .map_err(|_| ParseError::MissingModePrefix)?;
    let (after_a_field, a_field) =
        number(after_a_mode).map_err(|_| non_decimal_operand(after_a_mode))?;

    let after_comma = after_a_field
        .trim_start()
        .strip_prefix(',')
        .ok_or(ParseError::MissingOperand)?;

    let after_b_mode_space = after_comma.trim_start();
    if after_b_mode_space.is_empty() {
        return Err(ParseError::MissingOperand);
    }
    let (after_b_mode, b_addr_mode) = addr_mode(after_b_mode_space)
        .map_err(|_| ParseError::MissingModePrefix)?;
    let (trailing, b_field) =
        number(after_b_mode).map_err(|_| non_decimal_operand(after_b_mode))?;

    if !trailing.trim().is_empty() {
        return Err(ParseError::Syntax(format!(
            "unexpected trailing content `{}`",
            trailing.trim()
        )));
    }

    Ok(RelaxedCompleteInstruction {
        instr: Instruction {
            opcode,
            modifier,
            a_addr_mode,
            b_addr_mode,
        },
        a_field,
        b_field,
    })
}

fn classify_opcode(word: &str) -> Result<redcode::Opcode, ParseError> {
    use redcode::Opcode::{
        Add, Cmp, Dat, Div, Djn, Jmn, Jmp, Jmz, Mod, Mov, Mul, Nop, Slt, Spl,
        Sne, Sub,
    };
    let upper = word.to_ascii_uppercase();
    match upper.as_str() {
        "DAT" => Ok(Dat),
        "MOV" => Ok(Mov),
        "ADD" => Ok(Add),
        "SUB" => Ok(Sub),
        "MUL" => Ok(Mul),
        "DIV" => Ok(Div),
        "MOD" => Ok(Mod),
        "JMP" => Ok(Jmp),
        "JMZ" => Ok(Jmz),
        "JMN" => Ok(Jmn),
        "DJN" => Ok(Djn),
        "SPL" => Ok(Spl),
        "SLT" => Ok(Slt),
        "CMP" | "SEQ" => Ok(Cmp),
        "SNE" => Ok(Sne),
        "NOP" => Ok(Nop),
        "LDP" | "STP" => Err(ParseError::RejectedOpcode(upper)),
        _ => Err(ParseError::UnknownOpcode(word.to_owned())),
    }
}

fn first_word(input: &str) -> String {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or(input)
        .to_owned()
}

fn non_decimal_operand(input: &str) -> ParseError {
    ParseError::NonDecimalOperand(first_word(input))
}

fn syntax_error(input: &str) -> ParseError {
    let word = first_word(input);
    if word.is_empty() {
        ParseError::Syntax("expected an instruction".to_owned())
    } else {
        ParseError::UnknownOpcode(word)
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;
    use redcode::{AddrMode, Modifier, Opcode};

    use super::*;

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(Line::Blank));
        assert_eq!(parse_line("   "), Ok(Line::Blank));
        assert_eq!(parse_line("; a comment"), Ok(Line::Comment));
    }

    #[test]
    fn org_line_with_single_label() {
        assert_eq!(parse_line("ORG start"), Ok(Line::Org("start".to_owned())));
    }

    #[test]
    fn org_line_with_no_label_is_rejected() {
        assert_eq!(parse_line("ORG"), Err(ParseError::OrgLabelCount(0)));
    }

    #[test]
    fn org_line_with_multiple_labels_is_rejected() {
        assert_eq!(
            parse_line("ORG start other"),
            Err(ParseError::OrgLabelCount(2))
        );
    }

    #[test]
    fn unlabeled_instruction() {
        let parsed = parse_line("MOV.I $1, $2").unwrap();
        match parsed {
            Line::Instruction { label, instr } => {
                assert_eq!(label, None);
                assert_eq!(instr.instr.opcode, Opcode::Mov);
                assert_eq!(instr.instr.modifier, Modifier::I);
                assert_eq!(instr.instr.a_addr_mode, AddrMode::Direct);
                assert_eq!(instr.a_field, 1);
                assert_eq!(instr.b_field, 2);
            }
            other => panic!("expected an instruction, got {other:?}"),
        }
    }

    #[test]
    fn labeled_instruction_with_colon() {
        let parsed = parse_line("loop: ADD.AB #1, $2").unwrap();
        match parsed {
            Line::Instruction { label, .. } => {
                assert_eq!(label.as_deref(), Some("loop"));
            }
            other => panic!("expected an instruction, got {other:?}"),
        }
    }

    #[test]
    fn labeled_instruction_without_colon() {
        let parsed = parse_line("loop ADD.AB #1, $2").unwrap();
        match parsed {
            Line::Instruction { label, .. } => {
                assert_eq!(label.as_deref(), Some("loop"));
            }
            other => panic!("expected an instruction, got {other:?}"),
        }
    }

    #[test]
    fn seq_is_an_alias_for_cmp() {
        let parsed = parse_line("SEQ.I $1, $2").unwrap();
        match parsed {
            Line::Instruction { instr, .. } => {
                assert_eq!(instr.instr.opcode, Opcode::Cmp);
            }
            other => panic!("expected an instruction, got {other:?}"),
        }
    }

    #[test]
    fn ldp_and_stp_are_rejected() {
        assert_eq!(
            parse_line("LDP.A $1, $2"),
            Err(ParseError::RejectedOpcode("LDP".to_owned()))
        );
        assert_eq!(
            parse_line("STP.A $1, $2"),
            Err(ParseError::RejectedOpcode("STP".to_owned()))
        );
    }

    #[test]
    fn missing_modifier_is_rejected() {
        assert_eq!(parse_line("MOV $1, $2"), Err(ParseError::MissingModifier));
    }

    #[test]
    fn unknown_opcode_is_rejected() {
        assert_eq!(
            parse_line("FOO.A $1, $2"),
            Err(ParseError::UnknownOpcode("FOO".to_owned()))
        );
    }

    #[test]
    fn missing_mode_prefix_is_rejected() {
        assert_eq!(
            parse_line("MOV.I 1, $2"),
            Err(ParseError::MissingModePrefix)
        );
    }

    #[test]
    fn missing_operand_is_rejected() {
        assert_eq!(parse_line("MOV.I $1"), Err(ParseError::MissingOperand));
    }

    #[test]
    fn non_decimal_operand_is_rejected() {
        assert_eq!(
            parse_line("MOV.I $+-1, $2"),
            Err(ParseError::NonDecimalOperand("+-1".to_owned()))
        );
    }
}
