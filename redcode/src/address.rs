use crate::FieldValue;

/// Evaluate a value as if it is a core offset, wrapping around at `core_size`.
///
/// Always yields a value in `[0, core_size)`.
///
/// # Panics
///
/// Will panic if `core_size` is less than or equal to 0 or greater than
/// `u32::MAX`.
pub fn normalize<T, K>(value: K, core_size: T) -> FieldValue
where
    T: Into<u64> + Copy,
    K: Into<i64>,
{
    assert!(core_size.into() < u64::from(u32::MAX));
    assert!(core_size.into() > 0);
    let core_size: i64 = core_size.into().try_into().unwrap_or(0);
    let mut v = value.into();
    while v < 0 {
        v = v.wrapping_add(core_size);
    }
    let normalized = v.checked_rem(core_size).unwrap_or(0);
    normalized.try_into().unwrap_or(0)
}

/// Implements the pMARS `M` operator: reduce `offset` modulo `limit` into
/// `[0, limit)`, then if the reduced value exceeds `limit / 2` subtract
/// `limit`.
///
/// The result is in `(-limit/2, +limit/2]`. When `limit == core_size`, folding
/// an already-normalized field is a pure identity modulo sign.
///
/// # Panics
///
/// Will panic if `limit` is zero.
#[must_use]
pub fn fold(offset: i64, limit: FieldValue) -> i64 {
    assert!(limit > 0, "fold requires a strictly positive limit");
    let limit_i = i64::from(limit);
    let mut v = offset;
    while v < 0 {
        v = v.wrapping_add(limit_i);
    }
    let reduced = v.checked_rem(limit_i).unwrap_or(0);
    let half = limit_i.checked_div(2).unwrap_or(0);
    if reduced > half {
        reduced.wrapping_sub(limit_i)
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use coverage_helper::test;

    use super::*;

    #[test]
    fn normalize_negative_and_positive() {
        assert_eq!(normalize(-10, 15_u32), 5);
        assert_eq!(normalize(20, 15_u32), 5);
        assert_eq!(normalize(0, 15_u32), 0);
    }

    #[test]
    fn fold_identity_when_already_small() {
        assert_eq!(fold(0, 8000), 0);
        assert_eq!(fold(3, 8000), 3);
    }

    #[test]
    fn fold_wraps_past_half_limit() {
        // limit = 10: [0,10) reduces to (-5, 5]
        assert_eq!(fold(0, 10), 0);
        assert_eq!(fold(5, 10), 5);
        assert_eq!(fold(6, 10), -4);
        assert_eq!(fold(9, 10), -1);
    }

    #[test]
    fn fold_handles_values_past_limit() {
        // 23 mod 10 == 3
        assert_eq!(fold(23, 10), 3);
        // 26 mod 10 == 6, folds to -4
        assert_eq!(fold(26, 10), -4);
    }

    #[test]
    fn fold_handles_negative_offsets() {
        // -1 mod 10 == 9, folds to -1
        assert_eq!(fold(-1, 10), -1);
        // -4 mod 10 == 6, folds to -4
        assert_eq!(fold(-4, 10), -4);
    }

    #[test]
    #[should_panic]
    fn fold_rejects_zero_limit() {
        let _ = fold(0, 0);
    }

    #[test]
    fn fold_is_identity_within_core_when_limits_match_core_size() {
        let core_size: FieldValue = 8000;
        for field in [0_u32, 1, 3999, 4000, 7999] {
            let folded = fold(i64::from(field), core_size);
            let renormalized = normalize(folded, core_size);
            assert_eq!(renormalized, field);
        }
    }
}
