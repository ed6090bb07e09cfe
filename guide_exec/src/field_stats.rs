//! # Field statistics
//!
//! Area bookkeeping shown to the operator while working a field: how much of the boundary area is
//! left, how fast ground is being covered and how long until the field is finished.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::boundary::{Boundary, SQ_M_PER_ACRE, SQ_M_PER_HECTARE};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Feet in a meter.
pub const FT_PER_M: f64 = 3.28084;

/// Converts tool width (m) times speed (km/h) into hectares/hour.
const WORK_RATE_FACTOR: f64 = 0.1;

/// At or below this speed the time to finish is infinite.
///
/// Units: kilometres/hour
pub const MIN_FINISH_SPEED_KMH: f64 = 2.0;

/// Boundaries smaller than this don't report a remaining percentage.
///
/// Units: meters^2
pub const MIN_PERCENT_AREA_M2: f64 = 10.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldStatistics {
    /// Total area worked so far.
    ///
    /// Units: meters^2
    pub worked_area_m2: f64,

    /// Distance accumulated by the operator's trip counter.
    ///
    /// Units: meters
    pub user_distance_m: f64,

    /// Area of the current boundary, outer minus every inner ring.
    ///
    /// Units: meters^2
    boundary_area_m2: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Unit system used for display strings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Metric,
    Imperial,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Units {
    fn default() -> Self {
        Units::Metric
    }
}

impl FieldStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recalculate the boundary area, zero when there is no boundary or it is invalid.
    pub fn update_boundary_area(&mut self, boundary: Option<&Boundary>) {
        self.boundary_area_m2 = match boundary {
            Some(b) if b.is_valid() => b.area_m2(),
            _ => 0.0,
        };
    }

    /// Units: meters^2
    pub fn boundary_area_m2(&self) -> f64 {
        self.boundary_area_m2
    }

    pub fn add_worked_area(&mut self, area_m2: f64) {
        self.worked_area_m2 += area_m2;
    }

    pub fn add_user_distance(&mut self, dist_m: f64) {
        self.user_distance_m += dist_m;
    }

    /// Units: hectares
    pub fn remaining_area_hectares(&self) -> f64 {
        (self.boundary_area_m2 - self.worked_area_m2) / SQ_M_PER_HECTARE
    }

    /// Percentage of the boundary area not yet worked, zero for boundaries under
    /// [`MIN_PERCENT_AREA_M2`].
    pub fn remaining_percent(&self) -> f64 {
        if self.boundary_area_m2 > MIN_PERCENT_AREA_M2 {
            (self.boundary_area_m2 - self.worked_area_m2) * 100.0 / self.boundary_area_m2
        } else {
            0.0
        }
    }

    /// Estimated time to work the remaining area.
    ///
    /// Infinite when the vehicle is not moving faster than [`MIN_FINISH_SPEED_KMH`].
    ///
    /// Units: minutes
    pub fn time_to_finish_minutes(&self, speed_kmh: f64, tool_width_m: f64) -> f64 {
        if speed_kmh > MIN_FINISH_SPEED_KMH {
            let hours = self.remaining_area_hectares()
                / work_rate_hectares_per_hour(speed_kmh, tool_width_m);

            hours * 60.0
        } else {
            f64::INFINITY
        }
    }

    /// Clear the worked area and the user distance, the boundary area is kept.
    pub fn reset(&mut self) {
        self.worked_area_m2 = 0.0;
        self.user_distance_m = 0.0;
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Rate at which ground is covered by a tool of the given width.
///
/// Units: hectares/hour
pub fn work_rate_hectares_per_hour(speed_kmh: f64, tool_width_m: f64) -> f64 {
    tool_width_m * speed_kmh * WORK_RATE_FACTOR
}

/// Format an area for display, as hectares or acres with two decimals.
pub fn format_area(area_m2: f64, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.2} ha", area_m2 / SQ_M_PER_HECTARE),
        Units::Imperial => format!("{:.2} ac", area_m2 / SQ_M_PER_ACRE),
    }
}

/// Format a distance for display, as meters or feet with one decimal.
pub fn format_distance(dist_m: f64, units: Units) -> String {
    match units {
        Units::Metric => format!("{:.1} m", dist_m),
        Units::Imperial => format!("{:.1} ft", dist_m * FT_PER_M),
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
