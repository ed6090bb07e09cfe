//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
///
/// The mapping is linear and not clamped, values outside the source range are extrapolated.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float,
{
    target_range.0
        + ((value - source_range.0) * (target_range.1 - target_range.0)
            / (source_range.1 - source_range.0))
}

/// Returns true if the value is finite and not negative.
pub fn is_finite_non_negative<T>(value: T) -> bool
where
    T: Float,
{
    value.is_finite() && value >= T::zero()
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lin_map() {
        assert_relative_eq!(lin_map((0.0, 1.0), (0.0, 10.0), 0.5), 5.0);
        assert_relative_eq!(lin_map((0.1, 0.4), (4.0, 6.0), 0.1), 4.0);
        assert_relative_eq!(lin_map((0.1, 0.4), (4.0, 6.0), 0.4), 6.0);

        // Decreasing target ranges are allowed
        assert_relative_eq!(lin_map((0.0, 2.0), (1.0, -1.0), 1.0), 0.0);

        // Works for f32 too
        assert_relative_eq!(lin_map((0f32, 4f32), (0f32, 2f32), 1f32), 0.5f32);
    }

    #[test]
    fn test_is_finite_non_negative() {
        assert!(is_finite_non_negative(0.0));
        assert!(is_finite_non_negative(3.5));
        assert!(!is_finite_non_negative(-0.1));
        assert!(!is_finite_non_negative(f64::NAN));
        assert!(!is_finite_non_negative(f64::INFINITY));
    }
}
