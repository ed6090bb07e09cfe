//! # Localisation data
//!
//! The core does not compute positions itself, it is handed position samples already projected
//! into the local plane by the upstream position stream (NMEA parsing and RTK handling).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Factor converting a speed in kilometres/hour into meters/second.
pub const KMH_TO_MS: f64 = 0.27778;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single sample of the vehicle's position in the local plane.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Easting of the antenna in the local plane.
    ///
    /// Units: meters
    pub easting_m: f64,

    /// Northing of the antenna in the local plane.
    ///
    /// Units: meters
    pub northing_m: f64,

    /// Heading of the vehicle, clockwise from grid north.
    ///
    /// Units: radians
    pub heading_rad: f64,

    /// Ground speed of the vehicle.
    ///
    /// Units: kilometres/hour
    pub speed_kmh: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PositionSample {
    pub fn new(easting_m: f64, northing_m: f64, heading_rad: f64, speed_kmh: f64) -> Self {
        Self {
            easting_m,
            northing_m,
            heading_rad,
            speed_kmh,
        }
    }

    /// The position as a point, with `x` being easting and `y` northing.
    pub fn position_m(&self) -> Point2<f64> {
        Point2::new(self.easting_m, self.northing_m)
    }

    /// The ground speed in meters/second.
    pub fn speed_ms(&self) -> f64 {
        self.speed_kmh * KMH_TO_MS
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
