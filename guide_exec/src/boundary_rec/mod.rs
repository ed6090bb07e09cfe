//! # Boundary recorder module
//!
//! The boundary recorder captures the points driven by the vehicle into a new boundary polygon.
//! It is a small state machine driven by the host's record/pause/stop controls:
//!
//! - `Idle` - Nothing is being recorded.
//! - `Recording` - Every position sample handed to the recorder is offset and appended.
//! - `Paused` - A recording is in progress but samples are ignored.
//!
//! Commands issued from the wrong state are ignored rather than raised as errors, so stale host
//! controls can never break the capture loop. Stopping a recording with too few points to make a
//! polygon simply produces no polygon.
//!
//! Points can be captured from a point beside the vehicle (for example the edge of the implement)
//! rather than the antenna, by setting a lateral offset perpendicular to the heading.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The state of the boundary recorder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum RecorderState {
    Idle,
    Recording,
    Paused,
}

/// Which side of the vehicle the lateral offset is applied to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetSide {
    Left,
    Right,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RecorderState {
    fn default() -> Self {
        RecorderState::Idle
    }
}

impl Default for OffsetSide {
    fn default() -> Self {
        OffsetSide::Right
    }
}

impl OffsetSide {
    /// Convert an unsigned offset distance into a signed one, positive to the right of travel.
    pub fn signed(&self, offset_m: f64) -> f64 {
        match self {
            OffsetSide::Right => offset_m,
            OffsetSide::Left => -offset_m,
        }
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Displace a position perpendicular to the heading by a signed offset.
///
/// Heading is clockwise from north, and a positive offset moves the point to the right of the
/// direction of travel.
///
/// Returns the offset `(easting, northing)` in meters.
pub fn offset_position(
    easting_m: f64,
    northing_m: f64,
    heading_rad: f64,
    signed_offset_m: f64,
) -> (f64, f64) {
    let perp_rad = heading_rad + std::f64::consts::FRAC_PI_2;

    (
        easting_m + signed_offset_m * perp_rad.sin(),
        northing_m + signed_offset_m * perp_rad.cos(),
    )
}
