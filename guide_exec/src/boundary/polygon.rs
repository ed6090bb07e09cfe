//! # Boundary polygon
//!
//! A single closed ring of points in the local plane. The closing edge between the last and first
//! points is implicit, the ring is never stored closed.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::iter::FromIterator;

use super::{SQ_M_PER_ACRE, SQ_M_PER_HECTARE};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Minimum number of points a polygon needs to enclose an area.
pub const MIN_VALID_POINTS: usize = 3;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A point captured on a boundary.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPoint {
    /// Units: meters
    pub easting_m: f64,

    /// Units: meters
    pub northing_m: f64,

    /// Heading of the vehicle when the point was captured.
    ///
    /// Units: radians
    pub heading_rad: f64,
}

/// A closed polygon describing either the outer fence of a field or one of its inner rings.
///
/// Polygons with fewer than [`MIN_VALID_POINTS`] points are invalid. Queries on an invalid polygon
/// never fail, they report zero area and contain no points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolygon {
    /// Points of the ring in order.
    points: Vec<BoundaryPoint>,

    /// If true this ring can be driven through, so it is not an obstacle for containment queries.
    pub is_drive_through: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BoundaryPoint {
    pub fn new(easting_m: f64, northing_m: f64, heading_rad: f64) -> Self {
        Self {
            easting_m,
            northing_m,
            heading_rad,
        }
    }
}

impl BoundaryPolygon {
    /// Create a new empty polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polygon from a list of points.
    pub fn from_points(points: Vec<BoundaryPoint>, is_drive_through: bool) -> Self {
        Self {
            points,
            is_drive_through,
        }
    }

    /// Append a point to the end of the ring.
    pub fn push(&mut self, point: BoundaryPoint) {
        self.points.push(point);
    }

    /// Remove and return the last point of the ring.
    pub fn pop(&mut self) -> Option<BoundaryPoint> {
        self.points.pop()
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A polygon is valid if it has enough points to enclose an area.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_VALID_POINTS
    }

    /// Area enclosed by the polygon, independent of winding direction.
    ///
    /// Computed with the shoelace formula over the implicitly closed ring.
    ///
    /// Units: meters^2
    pub fn area_m2(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }

        let n = self.points.len();
        let mut sum = 0.0;

        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];

            sum += a.easting_m * b.northing_m - b.easting_m * a.northing_m;
        }

        sum.abs() / 2.0
    }

    pub fn area_hectares(&self) -> f64 {
        self.area_m2() / SQ_M_PER_HECTARE
    }

    pub fn area_acres(&self) -> f64 {
        self.area_m2() / SQ_M_PER_ACRE
    }

    /// Check if a point is inside the polygon using the even-odd ray casting rule.
    ///
    /// A ray is cast from the point towards positive easting and each edge it crosses toggles the
    /// result. Whether a point lying exactly on an edge is inside is not defined.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        if !self.is_valid() {
            return false;
        }

        let (easting, northing) = (point.x, point.y);
        let mut inside = false;
        let mut j = self.points.len() - 1;

        for i in 0..self.points.len() {
            let pi = &self.points[i];
            let pj = &self.points[j];

            // The straddle check guarantees the two northings differ, so the division is safe.
            if (pi.northing_m > northing) != (pj.northing_m > northing) {
                let edge_easting = (pj.easting_m - pi.easting_m) * (northing - pi.northing_m)
                    / (pj.northing_m - pi.northing_m)
                    + pi.easting_m;

                if easting < edge_easting {
                    inside = !inside;
                }
            }

            j = i;
        }

        inside
    }
}

impl FromIterator<BoundaryPoint> for BoundaryPolygon {
    fn from_iter<I: IntoIterator<Item = BoundaryPoint>>(iter: I) -> Self {
        Self::from_points(iter.into_iter().collect(), false)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
