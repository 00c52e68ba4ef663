//! Decimal precision helpers used to size the sampling range and to check
//! that a distribution sums to one.

/// Largest number of fractional digits a probability may contribute to the
/// sampling range. Values that need more are clamped, which keeps
/// `10^MAX_DECIMALS` well inside both `u64` and the exact-integer range of
/// `f64`.
pub const MAX_DECIMALS: u32 = 12;

/// Number of fractional digits kept when comparing a sum against one.
pub const TOLERANCE_DECIMALS: u32 = 10;

// Relative distance from an integer under which a scaled value counts as
// exact: a handful of ulps. Binary artifacts such as `0.1 + 0.2` sit within
// it, while a real 13th significant digit does not.
const RELATIVE_EPSILON: f64 = 16.0 * f64::EPSILON;

const POW10: [f64; 13] = [
    1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12,
];

/// Digits after the decimal point needed to write `value` exactly, trailing
/// zeros excluded, never less than 1 and never more than [`MAX_DECIMALS`].
///
/// `0.5` → 1, `0.25` → 2, `0.125` → 3, `1.0` → 1, `0.0` → 1.
pub fn decimals(value: f64) -> u32 {
    if !value.is_finite() {
        return MAX_DECIMALS;
    }

    let value = value.abs();
    for places in 0..=MAX_DECIMALS {
        let scaled = value * POW10[places as usize];
        if (scaled - scaled.round()).abs() <= scaled * RELATIVE_EPSILON {
            return places.max(1);
        }
    }

    tracing::debug!(value, max = MAX_DECIMALS, "probability precision clamped");
    MAX_DECIMALS
}

/// Rounds `value` toward negative infinity at `places` fractional digits.
pub fn floor_to(value: f64, places: u32) -> f64 {
    let factor = POW10[places.min(MAX_DECIMALS) as usize];
    (value * factor).floor() / factor
}

/// True when `sum` is exactly one, or when its distance from one truncates to
/// zero at [`TOLERANCE_DECIMALS`] digits.
pub fn sums_to_one(sum: f64) -> bool {
    sum == 1.0 || floor_to((sum - 1.0).abs(), TOLERANCE_DECIMALS) == 0.0
}

/// `10^places` as an integer range bound.
pub fn range_for(places: u32) -> u64 {
    10u64.pow(places.min(MAX_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimals_of_exact_values() {
        assert_eq!(decimals(0.5), 1);
        assert_eq!(decimals(0.25), 2);
        assert_eq!(decimals(0.125), 3);
        assert_eq!(decimals(0.0625), 4);
        assert_eq!(decimals(0.001), 3);
    }

    #[test]
    fn test_decimals_floor_is_one() {
        assert_eq!(decimals(1.0), 1);
        assert_eq!(decimals(0.0), 1);
        assert_eq!(decimals(3.0), 1);
    }

    #[test]
    fn test_decimals_ignores_binary_artifacts() {
        assert_eq!(decimals(0.1 + 0.2), 1);
        assert_eq!(decimals(1.0 - 0.9), 1);
        assert_eq!(decimals(0.07 * 3.0), 2);
    }

    #[test]
    fn test_decimals_clamps_repeating_fractions() {
        assert_eq!(decimals(1.0 / 6.0), MAX_DECIMALS);
        assert_eq!(decimals(1.0 / 3.0), MAX_DECIMALS);
        assert_eq!(decimals(f64::NAN), MAX_DECIMALS);
    }

    #[test]
    fn test_decimals_clamps_digits_past_the_twelfth() {
        assert_eq!(decimals(0.5000000000001), MAX_DECIMALS);
        assert_eq!(decimals(0.4999999999999), MAX_DECIMALS);
        assert_eq!(decimals(0.123456789012), 12);
    }

    #[test]
    fn test_decimals_keeps_tiny_probabilities() {
        assert_eq!(decimals(1e-12), 12);
        assert_eq!(decimals(0.000001), 6);
    }

    #[test]
    fn test_floor_to_truncates() {
        assert_eq!(floor_to(0.129, 2), 0.12);
        assert_eq!(floor_to(4e-11, TOLERANCE_DECIMALS), 0.0);
        assert!(floor_to(5e-10, TOLERANCE_DECIMALS) > 0.0);
    }

    #[test]
    fn test_sums_to_one_tolerance_boundary() {
        assert!(sums_to_one(1.0));
        assert!(sums_to_one(1.0 + 4e-11));
        assert!(sums_to_one(1.0 - 4e-11));
        assert!(!sums_to_one(1.0 + 5e-10));
        assert!(!sums_to_one(1.0 - 5e-10));
        assert!(!sums_to_one(0.0));
        assert!(!sums_to_one(f64::NAN));
    }

    #[test]
    fn test_range_for() {
        assert_eq!(range_for(1), 10);
        assert_eq!(range_for(3), 1000);
        assert_eq!(range_for(40), 1_000_000_000_000);
    }
}
