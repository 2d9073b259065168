use thiserror::Error as ThisError;

/// A precise reason a warrior was rejected by the parser.
///
/// The parser never guesses: every input that deviates from the accepted
/// grammar is rejected with one of these variants naming exactly which rule
/// was violated, matching the "never-do" policies around defaulting a missing
/// operand/modifier/mode or silently downgrading an unknown opcode.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The opcode token did not match any known mnemonic
    #[error("unknown opcode `{0}`")]
    UnknownOpcode(String),

    /// `LDP`/`STP` are explicitly out of scope and always rejected
    #[error("opcode `{0}` is not supported (PSPACE instructions are rejected)")]
    RejectedOpcode(String),

    /// An instruction was missing its `.MOD` suffix
    #[error("missing modifier on instruction (a modifier is always required)")]
    MissingModifier,

    /// The modifier token did not match `A`, `B`, `AB`, `BA`, `F`, `X`, or `I`
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    /// An operand was missing entirely
    #[error("missing operand on instruction")]
    MissingOperand,

    /// An operand was missing its required addressing-mode prefix character
    #[error("missing addressing-mode prefix on operand")]
    MissingModePrefix,

    /// An operand's numeric field was not a valid base-10 signed decimal
    #[error("non-decimal operand `{0}`")]
    NonDecimalOperand(String),

    /// `ORG` appeared somewhere other than the first non-comment line
    #[error("ORG may only appear as the first non-comment line of a warrior")]
    OrgNotFirst,

    /// `ORG` did not name exactly one label
    #[error("ORG requires exactly one label, found {0}")]
    OrgLabelCount(usize),

    /// `ORG <label>` referenced a label that was never defined
    #[error("ORG references undefined label `{0}`")]
    OrgUndefinedLabel(String),

    /// The same label prefixed more than one instruction
    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    /// A pseudo-op other than the single leading `ORG` was present
    #[error("unsupported pseudo-op `{0}`")]
    UnknownPseudoOp(String),

    /// The warrior contained zero instructions
    #[error("warrior must contain at least one instruction")]
    EmptyWarrior,

    /// The warrior exceeded the configured maximum length
    #[error("warrior length {len} exceeds configured maximum {max}")]
    WarriorTooLong {
        /// Number of instructions actually parsed
        len: usize,
        /// The configured maximum warrior length
        max: usize,
    },

    /// `strict_1988_mode` rejected an opcode outside the 1988 instruction set
    #[error("opcode `{0}` is not part of the 1988 instruction set")]
    Strict1988Opcode(redcode::Opcode),

    /// `strict_1988_mode` rejected a modifier outside the 1988 modifier set
    #[error("modifier `{0}` is not part of the 1988 modifier set")]
    Strict1988Modifier(redcode::Modifier),

    /// `strict_1988_mode` rejected an addressing mode outside the 1988 mode
    /// set
    #[error("addressing mode `{0}` is not part of the 1988 mode set")]
    Strict1988Mode(redcode::AddrMode),

    /// A catch-all for any other grammar violation, carrying the nom-level
    /// description of what was expected
    #[error("syntax error: {0}")]
    Syntax(String),
}
