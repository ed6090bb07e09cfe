//! # Steering laws
//!
//! Both laws return the demanded angle of the steered wheels. The sign follows the sign of the
//! errors handed in, the host is responsible for mapping it onto the steering actuator.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::Deserialize;

use super::SteerParams;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Lowest speed used by the Stanley law, stops the cross track term blowing up at standstill.
///
/// Units: meters/second
pub const STANLEY_MIN_SPEED_MS: f64 = 0.1;

/// Goal points closer than this give no pure pursuit steering.
///
/// Units: meters
pub const PURE_PURSUIT_MIN_GOAL_DIST_M: f64 = 0.1;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The available steering laws.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteerLaw {
    Stanley,
    PurePursuit,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SteerLaw {
    /// Calculate the steering angle with this law.
    ///
    /// Units: radians
    pub fn steer_rad(
        &self,
        params: &SteerParams,
        xte_m: f64,
        head_err_rad: f64,
        speed_ms: f64,
        goal_point_m: &Vector2<f64>,
    ) -> f64 {
        match self {
            SteerLaw::Stanley => stanley_steer_rad(params, xte_m, head_err_rad, speed_ms),
            SteerLaw::PurePursuit => pure_pursuit_steer_rad(params, goal_point_m),
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Stanley steering law.
///
/// `head_err * k_head + atan(k_dist * xte / v)` with `v` the ground speed in meters/second,
/// floored at [`STANLEY_MIN_SPEED_MS`].
pub fn stanley_steer_rad(
    params: &SteerParams,
    xte_m: f64,
    head_err_rad: f64,
    speed_ms: f64,
) -> f64 {
    let speed_ms = speed_ms.max(STANLEY_MIN_SPEED_MS);

    head_err_rad * params.stanley_heading_gain
        + (params.stanley_distance_gain * xte_m / speed_ms).atan()
}

/// Pure pursuit steering law.
///
/// Steers the vehicle onto the circular arc through the goal point, returns zero when the goal
/// point is closer than [`PURE_PURSUIT_MIN_GOAL_DIST_M`].
pub fn pure_pursuit_steer_rad(params: &SteerParams, goal_point_m: &Vector2<f64>) -> f64 {
    let dist_m = goal_point_m.norm();

    if dist_m < PURE_PURSUIT_MIN_GOAL_DIST_M {
        return 0.0;
    }

    let alpha_rad = goal_point_m.y.atan2(goal_point_m.x);
    let curvature_m = 2.0 * alpha_rad.sin() / dist_m;

    (curvature_m * params.wheelbase_m).atan()
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
