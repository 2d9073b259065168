use crate::error::BattleError;
use crate::CoreAddr;

/// Immutable configuration for one battle, fixed for the lifetime of every
/// round it runs.
///
/// Constructed directly (all fields are public); call [`BattleParameters::validate`]
/// before use, since nothing here is checked at construction time. A host
/// driver assembling these from a config file or CLI flags should call
/// `validate` once and surface any [`BattleError`] as the "rejections at the
/// boundary" spec: parameter validation always runs before a single
/// instruction is parsed or executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BattleParameters {
    /// Number of addresses in the core; every field and address is held
    /// modulo this value.
    pub core_size: CoreAddr,
    /// Upper bound on cycles executed per round.
    pub max_cycles: u32,
    /// Maximum simultaneous processes per warrior; a `SPL` beyond this bound
    /// is silently dropped.
    pub max_processes: usize,
    /// Fold limit applied to A-operand resolution and to the address used to
    /// read the B cell in indirect addressing.
    pub read_limit: CoreAddr,
    /// Fold limit applied to B-operand write-target resolution.
    pub write_limit: CoreAddr,
    /// Minimum core-address separation enforced between the two warriors'
    /// start addresses.
    pub min_distance: CoreAddr,
    /// Maximum accepted warrior length, in instructions.
    pub max_warrior_length: usize,
    /// Number of rounds run per battle.
    pub rounds: u32,
    /// Deterministic placement seed. `None` draws from a non-deterministic
    /// source once, at [`crate::battle::run_battle`] entry.
    pub seed: Option<u64>,
    /// Restrict parsing and execution to the ICWS '88 opcode/modifier/mode
    /// set.
    pub strict_1988_mode: bool,
}

impl BattleParameters {
    /// Validates every constraint named in spec §3/§6.
    ///
    /// Returns the first violation found; callers should treat this as fatal
    /// and never attempt to run a battle with unvalidated parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidParameter`] describing exactly which
    /// bound was violated.
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.core_size == 0 {
            return Err(BattleError::InvalidCoreSize(
                "core_size must be at least 1".to_owned(),
            ));
        }
        if self.max_cycles == 0 {
            return Err(BattleError::InvalidParameter(
                "max_cycles must be at least 1".to_owned(),
            ));
        }
        if self.max_processes == 0 {
            return Err(BattleError::InvalidParameter(
                "max_processes must be at least 1".to_owned(),
            ));
        }
        if self.read_limit == 0 || self.read_limit > self.core_size {
            return Err(BattleError::InvalidParameter(format!(
                "read_limit {} must be in [1, core_size={}]",
                self.read_limit, self.core_size
            )));
        }
        if self.write_limit == 0 || self.write_limit > self.core_size {
            return Err(BattleError::InvalidParameter(format!(
                "write_limit {} must be in [1, core_size={}]",
                self.write_limit, self.core_size
            )));
        }
        if self.max_warrior_length == 0
            || self.max_warrior_length > self.core_size as usize
        {
            return Err(BattleError::InvalidParameter(format!(
                "max_warrior_length {} must be in [1, core_size={}]",
                self.max_warrior_length, self.core_size
            )));
        }
        if (self.min_distance as usize) < self.max_warrior_length {
            return Err(BattleError::InvalidParameter(format!(
                "min_distance {} must be at least max_warrior_length {}",
                self.min_distance, self.max_warrior_length
            )));
        }
        if u64::from(self.min_distance).saturating_mul(2) > u64::from(self.core_size)
        {
            return Err(BattleError::InvalidParameter(format!(
                "min_distance {} must be at most core_size/2 ({})",
                self.min_distance,
                self.core_size / 2
            )));
        }
        if self.rounds == 0 {
            return Err(BattleError::InvalidParameter(
                "rounds must be at least 1".to_owned(),
            ));
        }
        if let Some(seed) = self.seed {
            if seed < u64::from(self.min_distance) {
                return Err(BattleError::InvalidParameter(format!(
                    "seed {} must be at least min_distance {}",
                    seed, self.min_distance
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;

    use super::*;

    fn valid_params() -> BattleParameters {
        BattleParameters {
            core_size: 8000,
            max_cycles: 80_000,
            max_processes: 8000,
            read_limit: 8000,
            write_limit: 8000,
            min_distance: 100,
            max_warrior_length: 100,
            rounds: 1,
            seed: None,
            strict_1988_mode: false,
        }
    }

    #[test]
    fn default_corewar94_profile_is_valid() {
        assert!(valid_params().validate().is_ok());
    }

    #[test]
    fn zero_core_size_is_rejected() {
        let mut p = valid_params();
        p.core_size = 0;
        assert!(matches!(p.validate(), Err(BattleError::InvalidCoreSize(_))));
    }

    #[test]
    fn min_distance_below_warrior_length_is_rejected() {
        let mut p = valid_params();
        p.min_distance = 10;
        p.max_warrior_length = 50;
        assert!(matches!(
            p.validate(),
            Err(BattleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn min_distance_over_half_core_is_rejected() {
        let mut p = valid_params();
        p.min_distance = 5000;
        assert!(matches!(
            p.validate(),
            Err(BattleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn read_limit_over_core_size_is_rejected() {
        let mut p = valid_params();
        p.read_limit = 9000;
        assert!(matches!(
            p.validate(),
            Err(BattleError::InvalidParameter(_))
        ));
    }

    #[test]
    fn seed_below_min_distance_is_rejected() {
        let mut p = valid_params();
        p.seed = Some(5);
        assert!(matches!(
            p.validate(),
            Err(BattleError::InvalidParameter(_))
        ));
    }
}
