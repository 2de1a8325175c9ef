//! Filler-to-item ratio check.

use crate::error::{Error, Result};

/// Verify that the observed filler/item quotient matches the configured
/// `f:i` ratio.
///
/// Both sides are compared after integer division, so this is a coarse
/// design-integrity gate rather than an exact ratio equality: 9 fillers
/// against 3 items satisfies `3:1`, and so does 11 against 3.
pub fn check_ratio(ratio: (u32, u32), fillers_count: u32, items_count: u32) -> Result<()> {
    let (numerator, denominator) = ratio;
    if items_count == 0 {
        return Err(Error::EmptyItemPool);
    }
    debug_assert!(denominator > 0, "rejected at config validation");

    let observed = fillers_count / items_count;
    let expected = numerator / denominator;
    if observed != expected {
        return Err(Error::RatioMismatch {
            observed,
            expected,
            numerator,
            denominator,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotient_mismatch_fails() {
        let err = check_ratio((1, 1), 10, 3).unwrap_err();
        assert!(matches!(
            err,
            Error::RatioMismatch {
                observed: 3,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn matching_quotient_passes() {
        check_ratio((3, 1), 9, 3).unwrap();
    }

    #[test]
    fn check_is_quotient_based_not_exact() {
        // 11/3 == 3 under integer division, same as 3/1.
        check_ratio((3, 1), 11, 3).unwrap();
    }

    #[test]
    fn empty_item_pool_is_a_distinct_error() {
        let err = check_ratio((1, 1), 10, 0).unwrap_err();
        assert!(matches!(err, Error::EmptyItemPool));
    }
}
