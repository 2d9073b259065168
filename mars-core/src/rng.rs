//! Park-Miller minimal-standard placement RNG (spec §4.7).
//!
//! This is the only source of nondeterminism a battle touches, and only for
//! choosing warrior 2's start offset each round; it is never used inside
//! instruction execution.

const MODULUS: i64 = 2_147_483_647; // 2^31 - 1
const MULTIPLIER: i64 = 16_807;
const SCHRAGE_Q: i64 = 127_773; // MODULUS / MULTIPLIER
const SCHRAGE_R: i64 = 2_836; // MODULUS % MULTIPLIER

/// Park-Miller minimal-standard LCG, stepped with the Schrage split to avoid
/// overflow on the multiply.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlacementRng {
    state: i64,
}

impl PlacementRng {
    /// Builds the generator from a battle seed. Seeds are mapped through a
    /// `2^30 + 1` modulus so that distinct small seeds (as a user would
    /// supply on the command line) land on well-separated starting states,
    /// then clamped into the LCG's valid state space `[1, 2^31 - 2]`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        let mapped = i64::try_from(seed % 1_073_741_825).unwrap_or(1); // 2^30 + 1
        let state = if mapped <= 0 { 1 } else { mapped };
        Self { state }
    }

    /// Advances the generator one step and returns the new state, an integer
    /// in `[1, 2^31 - 2]`.
    pub fn next_state(&mut self) -> i64 {
        let hi = self.state / SCHRAGE_Q;
        let lo = self.state % SCHRAGE_Q;
        let mut result = MULTIPLIER * lo - SCHRAGE_R * hi;
        if result < 0 {
            result += MODULUS;
        }
        self.state = result;
        result
    }

    /// Draws the next round's warrior-2 start offset: `state mod placements`.
    ///
    /// # Panics
    ///
    /// Panics if `placements <= 0`; callers must reject such a battle before
    /// ever constructing a [`PlacementRng`] (spec §4.7).
    pub fn next_offset(&mut self, placements: i64) -> i64 {
        assert!(placements > 0, "placements must be positive");
        self.next_state() % placements
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;

    use super::*;

    #[test]
    fn seed_one_matches_park_miller_reference_sequence() {
        let mut rng = PlacementRng::from_seed(1);
        // Canonical Park-Miller minimal-standard sequence seeded from 1.
        let expected = [
            16_807, 282_475_249, 1_622_650_073, 984_943_658, 1_144_108_930,
            470_211_272, 101_027_544, 1_457_850_878, 1_458_777_923,
            2_007_237_709,
        ];
        for want in expected {
            assert_eq!(rng.next_state(), want);
        }
    }

    #[test]
    fn offsets_stay_within_placements() {
        let mut rng = PlacementRng::from_seed(42);
        for _ in 0..100 {
            let offset = rng.next_offset(7800);
            assert!((0..7800).contains(&offset));
        }
    }

    #[test]
    #[should_panic(expected = "placements must be positive")]
    fn rejects_non_positive_placements() {
        let mut rng = PlacementRng::from_seed(1);
        let _ = rng.next_offset(0);
    }

    #[test]
    fn zero_seed_maps_to_valid_state() {
        let mut rng = PlacementRng::from_seed(0);
        let state = rng.next_state();
        assert!(state > 0);
    }
}
