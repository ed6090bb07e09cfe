//! # Speed adaptive lookahead
//!
//! The lookahead distance grows with speed and with the cross track error. Close to the line a
//! short "hold" distance keeps tracking tight, far from the line a longer "acquire" distance
//! brings the vehicle back smoothly. Between the two the distance is blended linearly so the
//! steering command has no step at the band edges.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::maths::lin_map;

use super::LookaheadParams;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Cross track error up to which the hold distance is used.
///
/// Units: meters
pub const HOLD_BAND_XTE_M: f64 = 0.1;

/// Cross track error from which the acquire distance is used.
///
/// Units: meters
pub const ACQUIRE_BAND_XTE_M: f64 = 0.4;

/// Hold distance used when auto steer is off.
///
/// Units: meters
pub const MANUAL_HOLD_M: f64 = 5.0;

/// Scaling of the speed in the speed term of the lookahead.
const SPEED_FACTOR: f64 = 0.05;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the lookahead distance.
///
/// # Inputs
/// - `speed_kmh`: Ground speed in kilometres/hour.
/// - `xte_m`: Cross track error in meters, only the magnitude is used.
/// - `auto_steer_on`: If false the fixed [`MANUAL_HOLD_M`] replaces the configured hold distance.
///
/// # Outputs
/// - The lookahead distance in meters, never less than `params.min_distance_m`.
pub fn lookahead_m(
    speed_kmh: f64,
    xte_m: f64,
    auto_steer_on: bool,
    params: &LookaheadParams,
) -> f64 {
    let xte_m = xte_m.abs();

    let base = speed_kmh * SPEED_FACTOR * params.multiplier;

    let hold_m = if auto_steer_on {
        params.hold_m
    } else {
        MANUAL_HOLD_M
    };
    let acquire_m = hold_m * params.acquire_factor;

    let dist_m = if xte_m <= HOLD_BAND_XTE_M {
        hold_m
    } else if xte_m < ACQUIRE_BAND_XTE_M {
        lin_map(
            (HOLD_BAND_XTE_M, ACQUIRE_BAND_XTE_M),
            (hold_m, acquire_m),
            xte_m,
        )
    } else {
        acquire_m
    };

    (base * dist_m + dist_m).max(params.min_distance_m)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> LookaheadParams {
        LookaheadParams {
            multiplier: 1.4,
            hold_m: 4.0,
            acquire_factor: 1.5,
            min_distance_m: 2.0,
        }
    }

    #[test]
    fn test_bands() {
        let p = params();
        // base = 10 * 0.05 * 1.4 = 0.7
        let base = 0.7;

        assert_relative_eq!(lookahead_m(10.0, 0.0, true, &p), base * 4.0 + 4.0);
        assert_relative_eq!(lookahead_m(10.0, 0.1, true, &p), base * 4.0 + 4.0);
        assert_relative_eq!(lookahead_m(10.0, 0.4, true, &p), base * 6.0 + 6.0);
        assert_relative_eq!(lookahead_m(10.0, 3.0, true, &p), base * 6.0 + 6.0);

        // Half way through the blend band
        assert_relative_eq!(
            lookahead_m(10.0, 0.25, true, &p),
            base * 5.0 + 5.0,
            epsilon = 1e-12
        );

        // Sign of the error doesn't matter
        assert_relative_eq!(
            lookahead_m(10.0, -0.25, true, &p),
            lookahead_m(10.0, 0.25, true, &p)
        );
    }

    #[test]
    fn test_manual_hold() {
        let p = params();

        assert_relative_eq!(lookahead_m(0.0, 0.0, false, &p), MANUAL_HOLD_M);
        assert_relative_eq!(lookahead_m(0.0, 1.0, false, &p), MANUAL_HOLD_M * 1.5);
    }

    #[test]
    fn test_min_distance() {
        let mut p = params();
        p.hold_m = 0.5;
        p.acquire_factor = 1.0;

        // Floored at standstill and when the speed term is still short of the floor
        assert_relative_eq!(lookahead_m(0.0, 0.0, true, &p), 2.0);
        assert_relative_eq!(lookahead_m(40.0, 0.0, true, &p), 2.0);

        // base = 80 * 0.05 * 1.4 = 5.6, above the floor
        assert_relative_eq!(lookahead_m(80.0, 0.0, true, &p), 5.6 * 0.5 + 0.5);

        p.min_distance_m = 1.0;
        assert_relative_eq!(lookahead_m(40.0, 0.0, true, &p), 2.8 * 0.5 + 0.5);
    }

    #[test]
    fn test_monotonic_in_xte() {
        let p = params();

        for &speed in [0.0, 4.0, 12.0, 25.0].iter() {
            let mut prev = lookahead_m(speed, 0.0, true, &p);

            for i in 1..=120 {
                let xte = i as f64 * 0.005;
                let next = lookahead_m(speed, xte, true, &p);

                assert!(
                    next >= prev - 1e-12,
                    "lookahead decreased at speed {} xte {}: {} -> {}",
                    speed,
                    xte,
                    prev,
                    next
                );
                prev = next;
            }
        }
    }
}
