use thiserror::Error as ThisError;

/// Failures that can occur while configuring or running a battle.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BattleError {
    /// `core_size` was zero, or too large to index with [`crate::CoreAddr`]
    #[error("invalid core size: {0}")]
    InvalidCoreSize(String),

    /// A warrior's instruction count exceeded `core_size`
    #[error("warrior is {len} instructions long, which exceeds the core size of {core_size}")]
    WarriorTooLarge {
        /// Number of instructions in the offending warrior
        len: usize,
        /// The configured core size
        core_size: u32,
    },

    /// The requested separation couldn't be satisfied by the configured core
    /// size and warrior lengths
    #[error("core size {core_size} is too small to place {count} warriors of \
             up to {max_len} instructions with a minimum separation of {min_separation}")]
    CoreTooSmallForPlacement {
        /// The configured core size
        core_size: u32,
        /// Number of warriors being placed
        count: usize,
        /// Length of the longest warrior being placed
        max_len: usize,
        /// The configured minimum separation
        min_separation: u32,
    },

    /// A configuration parameter was out of its documented valid range
    #[error("invalid battle parameter: {0}")]
    InvalidParameter(String),

    /// An internal invariant was violated; indicates a bug rather than bad
    /// input
    #[error("internal simulator error: {0}")]
    Internal(String),
}
