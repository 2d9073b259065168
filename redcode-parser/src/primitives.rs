use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, i64, space0},
    combinator::map,
    error::VerboseError,
    sequence::delimited,
    IResult,
};
use redcode::{AddrMode, AddrMode::*, Modifier, Modifier::*};

/// Consumes a base-10 signed decimal integer, surrounded by optional
/// whitespace.
///
/// Unlike a permissive calculator grammar, a leading `+` immediately followed
/// by a `-` is rejected outright rather than guessed at.
pub fn number(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    delimited(space0, only_number, space0)(input)
}

fn only_number(input: &str) -> IResult<&str, i64, VerboseError<&str>> {
    if input.starts_with("+-") {
        Err(nom::Err::Error(VerboseError {
            errors: vec![(
                input,
                nom::error::VerboseErrorKind::Context(
                    "a numeric operand cannot be prefixed by both `+` and `-`",
                ),
            )],
        }))
    } else if let Some(stripped_input) = input.strip_prefix('+') {
        i64(stripped_input)
    } else {
        i64(input)
    }
}

/// Consumes exactly one alphabetic opcode-shaped token, without validating it
/// against the set of known opcodes. Callers classify the returned token
/// themselves so that unknown vs. rejected (`LDP`/`STP`) opcodes can be
/// reported with distinct errors.
pub fn opcode_token(input: &str) -> IResult<&str, &str, VerboseError<&str>> {
    alpha1(input)
}

/// Consumes exactly one addressing-mode prefix character.
pub fn addr_mode(input: &str) -> IResult<&str, AddrMode, VerboseError<&str>> {
    alt((
        map(tag("#"), |_| Immediate),
        map(tag("$"), |_| Direct),
        map(tag("*"), |_| IndirectA),
        map(tag("@"), |_| IndirectB),
        map(tag("{"), |_| PredecA),
        map(tag("<"), |_| PredecB),
        map(tag("}"), |_| PostincA),
        map(tag(">"), |_| PostincB),
    ))(input)
}

/// Consumes exactly one modifier token (`A`, `B`, `AB`, `BA`, `F`, `X`, `I`),
/// matched case-insensitively. `AB`/`BA` are tried before the single-letter
/// forms so the longer match wins.
pub fn modifier(input: &str) -> IResult<&str, Modifier, VerboseError<&str>> {
    alt((
        map(nom::bytes::complete::tag_no_case("AB"), |_| AB),
        map(nom::bytes::complete::tag_no_case("BA"), |_| BA),
        map(nom::bytes::complete::tag_no_case("A"), |_| A),
        map(nom::bytes::complete::tag_no_case("B"), |_| B),
        map(nom::bytes::complete::tag_no_case("X"), |_| X),
        map(nom::bytes::complete::tag_no_case("F"), |_| F),
        map(nom::bytes::complete::tag_no_case("I"), |_| I),
    ))(input)
}

/// Whether `token` is shaped like a label/identifier: starts with an ASCII
/// letter or underscore, continues with letters, digits, or underscores.
#[must_use]
pub fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;

    use super::*;

    #[test]
    fn check_mode_parsing() {
        assert_eq!(addr_mode("**"), Ok(("*", IndirectA)));
        assert_eq!(
            addr_mode("#followingcrap"),
            Ok(("followingcrap", Immediate))
        );
        assert!(addr_mode(" {").is_err());
    }

    #[test]
    fn check_modifier_parsing() {
        assert_eq!(modifier("BA"), Ok(("", BA)));
        assert_eq!(modifier("B A"), Ok((" A", B)));
        assert!(modifier(" a b").is_err());
    }

    #[test]
    fn check_number_parsing() {
        assert_eq!(number(" +12 "), Ok(("", 12)));
        assert_eq!(number("-5"), Ok(("", -5)));
        assert!(number("+-5").is_err());
    }

    #[test]
    fn check_identifier_classification() {
        assert!(is_identifier("start"));
        assert!(is_identifier("_foo_1"));
        assert!(!is_identifier("1start"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("has space"));
    }
}
