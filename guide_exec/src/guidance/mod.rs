//! # Guidance control module
//!
//! Guidance control is responsible for keeping the vehicle on the reference line. Every time a new
//! position fix arrives the host computes the line errors (cross track error, heading error and
//! the goal point in the vehicle frame) and hands them to [`GuidanceCtrl`], which answers with a
//! steering angle.
//!
//! The steering angle is calculated by one of two steering laws, chosen once from the
//! configuration:
//!
//! - Stanley, which sums a heading term and an arctangent of the cross track error scaled by the
//!   speed,
//! - Pure pursuit, which steers on the arc that passes through the goal point.
//!
//! Close to the line small heading errors would make the steering chatter, so a dead zone
//! suppresses steering once the heading error has stayed under a threshold for a number of ticks.
//! The lookahead distance reported with each output adapts to speed and cross track error.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod dead_zone;
pub mod lookahead;
pub mod params;
pub mod state;
pub mod steer_law;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// Internal
pub use dead_zone::DeadZone;
pub use lookahead::lookahead_m;
pub use params::*;
pub use state::*;
pub use steer_law::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Cross track error under which the vehicle is considered to be on the line.
///
/// Units: meters
pub const ON_LINE_XTE_M: f64 = 0.1;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Errors of the vehicle relative to the reference line, computed by the host for each tick.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineErrors {
    /// Signed cross track error, positive to the right of the line.
    ///
    /// Units: meters
    pub xte_m: f64,

    /// Signed heading error between the vehicle and the line.
    ///
    /// Units: radians
    pub head_err_rad: f64,

    /// The goal point on the line, in the vehicle frame with `x` forward and `y` to the left.
    ///
    /// Units: meters
    pub goal_point_m: Vector2<f64>,
}

/// Output of one guidance tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct GuidanceSample {
    /// Units: meters
    pub xte_m: f64,

    /// Units: meters
    pub lookahead_m: f64,

    /// Demanded steering angle, zero inside the dead zone.
    ///
    /// Units: radians
    pub steer_rad: f64,

    /// True if the absolute cross track error is under [`ON_LINE_XTE_M`].
    pub is_on_line: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while setting up guidance control.
#[derive(Debug, thiserror::Error)]
pub enum GuidanceError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    /// A tuning value was out of its allowed range.
    #[error("Invalid value {value} for parameter {field}")]
    InvalidConfig { field: &'static str, value: f64 },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LineErrors {
    pub fn new(xte_m: f64, head_err_rad: f64, goal_point_m: Vector2<f64>) -> Self {
        Self {
            xte_m,
            head_err_rad,
            goal_point_m,
        }
    }
}
