//! The Battle Driver: runs a fixed number of rounds, scores them, and
//! applies the identical-warrior short circuit and early-exit rule (spec
//! §4.7).

use redcode::Warrior;

use crate::error::BattleError;
use crate::params::BattleParameters;
use crate::process_queues::Contestant;
use crate::rng::PlacementRng;
use crate::round::{run_round, RoundOutcome};
use crate::CoreAddr;

/// Points awarded to the sole survivor of a round.
const WIN_POINTS: u32 = 3;
/// Points awarded to each warrior on a tied round.
const TIE_POINTS: u32 = 1;

/// The aggregate result of a battle: warrior 1's and warrior 2's total
/// points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BattleScore {
    /// Warrior 1's aggregate score.
    pub first: u32,
    /// Warrior 2's aggregate score.
    pub second: u32,
}

impl BattleScore {
    /// Formats the two-line `scores` output contract (spec §4.7/§6):
    /// `<id> 0 0 0 <score> scores`, one line per warrior.
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "1 0 0 0 {} scores\n2 0 0 0 {} scores",
            self.first, self.second
        )
    }
}

/// Runs a full battle: validates `params`, applies the identical-warrior
/// short circuit, and otherwise plays `params.rounds` rounds, placing
/// warrior 2 via the Park-Miller RNG and alternating first-mover by round
/// parity, stopping early once the outcome can no longer change.
///
/// # Errors
///
/// Returns [`BattleError`] if `params` fails validation or if the core is too
/// small to place two warriors `min_distance` apart.
pub fn run_battle(
    warrior_first: &Warrior,
    warrior_second: &Warrior,
    params: &BattleParameters,
) -> Result<BattleScore, BattleError> {
    params.validate()?;

    if warrior_first.code == warrior_second.code
        && warrior_first.entry_point == warrior_second.entry_point
    {
        return Ok(BattleScore {
            first: params.rounds,
            second: params.rounds,
        });
    }

    let placements =
        i64::from(params.core_size) - 2 * i64::from(params.min_distance) + 1;
    if placements <= 0 {
        return Err(BattleError::CoreTooSmallForPlacement {
            core_size: params.core_size,
            count: 2,
            max_len: params.max_warrior_length,
            min_separation: params.min_distance,
        });
    }

    let mut rng = PlacementRng::from_seed(params.seed.unwrap_or_else(non_deterministic_seed));

    let mut first = 0;
    let mut second = 0;

    for round_index in 0..params.rounds {
        let offset = CoreAddr::try_from(rng.next_offset(placements)).unwrap_or(0);
        match run_round(warrior_first, warrior_second, params, offset, round_index) {
            RoundOutcome::Winner(Contestant::First) => first += WIN_POINTS,
            RoundOutcome::Winner(Contestant::Second) => second += WIN_POINTS,
            RoundOutcome::Tie => {
                first += TIE_POINTS;
                second += TIE_POINTS;
            }
        }

        let remaining = u64::from(params.rounds - round_index - 1);
        let gap = first.abs_diff(second);
        if u64::from(gap) > 3 * remaining {
            break;
        }
    }

    Ok(BattleScore { first, second })
}

/// Draws a non-deterministic seed when the battle parameters name none.
///
/// This is the only source of non-determinism anywhere in the crate; every
/// other code path is a pure function of its inputs.
fn non_deterministic_seed() -> u64 {
    rand::random()
}
