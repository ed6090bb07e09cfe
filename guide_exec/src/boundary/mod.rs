//! # Boundary module
//!
//! A field boundary is made up of an outer fence polygon and any number of inner polygons. Inner
//! polygons are holes in the field (ponds, buildings, tree islands) unless they are marked as
//! drive-through, in which case they are only a visual/historical ring (for instance a laneway)
//! and do not exclude any ground from containment queries.
//!
//! Note that the boundary area always subtracts every inner ring, including drive-through ones,
//! so the area shown to the operator can be smaller than the ground the vehicle may steer on.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod polygon;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

pub use polygon::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Square meters in a hectare.
pub const SQ_M_PER_HECTARE: f64 = 10_000.0;

/// Square meters in an acre.
pub const SQ_M_PER_ACRE: f64 = 4046.86;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A field boundary, an optional outer polygon plus inner polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    /// The outer fence of the field.
    pub outer: Option<BoundaryPolygon>,

    /// Inner rings, in the order they were added.
    pub inner: Vec<BoundaryPolygon>,

    /// Whether this boundary is turned on for display and guidance by the host.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Which part of a boundary a polygon makes up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryKind {
    Outer,
    Inner,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Boundary {
    fn default() -> Self {
        Self {
            outer: None,
            inner: Vec::new(),
            is_active: true,
        }
    }
}

impl Boundary {
    /// Create an empty boundary with no outer polygon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a boundary with the given outer polygon and no inner rings.
    pub fn with_outer(outer: BoundaryPolygon) -> Self {
        Self {
            outer: Some(outer),
            ..Self::default()
        }
    }

    /// Replace the outer polygon.
    pub fn set_outer(&mut self, outer: BoundaryPolygon) {
        self.outer = Some(outer);
    }

    /// Add an inner ring.
    pub fn add_inner(&mut self, inner: BoundaryPolygon) {
        self.inner.push(inner);
    }

    /// File a freshly recorded polygon into this boundary.
    ///
    /// An outer polygon replaces any existing outer, an inner polygon is appended to the inner
    /// rings.
    pub fn file_polygon(&mut self, kind: BoundaryKind, polygon: BoundaryPolygon) {
        debug!(
            "Filing {:?} polygon with {} points ({:.2} ha)",
            kind,
            polygon.len(),
            polygon.area_hectares()
        );

        match kind {
            BoundaryKind::Outer => self.set_outer(polygon),
            BoundaryKind::Inner => self.add_inner(polygon),
        }
    }

    /// A boundary is valid if it has a valid outer polygon.
    pub fn is_valid(&self) -> bool {
        self.outer.as_ref().map_or(false, BoundaryPolygon::is_valid)
    }

    /// Area of the outer polygon minus the area of every inner ring.
    ///
    /// Units: meters^2
    pub fn area_m2(&self) -> f64 {
        let outer_m2 = self.outer.as_ref().map_or(0.0, BoundaryPolygon::area_m2);
        let inner_m2: f64 = self.inner.iter().map(BoundaryPolygon::area_m2).sum();

        outer_m2 - inner_m2
    }

    pub fn area_hectares(&self) -> f64 {
        self.area_m2() / SQ_M_PER_HECTARE
    }

    pub fn area_acres(&self) -> f64 {
        self.area_m2() / SQ_M_PER_ACRE
    }

    /// Check if a point is inside the usable area of the field.
    ///
    /// The point must be inside the outer polygon and outside every inner ring which is not
    /// drive-through.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        let outer = match self.outer {
            Some(ref o) => o,
            None => return false,
        };

        if !outer.contains(point) {
            return false;
        }

        !self
            .inner
            .iter()
            .any(|ring| !ring.is_drive_through && ring.contains(point))
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min: f64, size: f64) -> BoundaryPolygon {
        vec![
            BoundaryPoint::new(min, min, 0.0),
            BoundaryPoint::new(min + size, min, 0.0),
            BoundaryPoint::new(min + size, min + size, 0.0),
            BoundaryPoint::new(min, min + size, 0.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_hole_subtraction() {
        let mut b = Boundary::with_outer(square(0.0, 20.0));
        b.add_inner(square(5.0, 5.0));

        assert!(b.is_valid());
        assert_relative_eq!(b.area_m2(), 375.0);
        assert_relative_eq!(b.area_hectares(), 0.0375);

        let in_hole = Point2::new(7.5, 7.5);
        assert!(b.outer.as_ref().unwrap().contains(&in_hole));
        assert!(!b.contains(&in_hole));

        assert!(b.contains(&Point2::new(15.0, 15.0)));
        assert!(!b.contains(&Point2::new(25.0, 15.0)));
    }

    #[test]
    fn test_drive_through_ring() {
        let mut lane = square(5.0, 5.0);
        lane.is_drive_through = true;

        let mut b = Boundary::with_outer(square(0.0, 20.0));
        b.add_inner(lane);

        // Drive-through rings don't exclude containment but are still subtracted from the area
        assert!(b.contains(&Point2::new(7.5, 7.5)));
        assert_relative_eq!(b.area_m2(), 375.0);
    }

    #[test]
    fn test_inner_order_does_not_matter() {
        let mut lane = square(5.0, 5.0);
        lane.is_drive_through = true;
        let hole = square(6.0, 2.0);
        let p = Point2::new(7.0, 7.0);

        let mut a = Boundary::with_outer(square(0.0, 20.0));
        a.add_inner(lane.clone());
        a.add_inner(hole.clone());

        let mut b = Boundary::with_outer(square(0.0, 20.0));
        b.add_inner(hole);
        b.add_inner(lane);

        assert!(!a.contains(&p));
        assert_eq!(a.contains(&p), b.contains(&p));
        assert_relative_eq!(a.area_m2(), b.area_m2());
    }

    #[test]
    fn test_empty_and_invalid() {
        let empty = Boundary::new();
        assert!(!empty.is_valid());
        assert!(empty.is_active);
        assert_eq!(empty.area_m2(), 0.0);
        assert!(!empty.contains(&Point2::new(0.0, 0.0)));

        let line = Boundary::with_outer(
            vec![
                BoundaryPoint::new(0.0, 0.0, 0.0),
                BoundaryPoint::new(10.0, 10.0, 0.0),
            ]
            .into_iter()
            .collect(),
        );
        assert!(!line.is_valid());
        assert!(!line.contains(&Point2::new(5.0, 5.0)));
    }

    #[test]
    fn test_file_polygon() {
        let mut b = Boundary::new();

        b.file_polygon(BoundaryKind::Inner, square(2.0, 1.0));
        assert!(!b.is_valid());
        assert_eq!(b.inner.len(), 1);

        b.file_polygon(BoundaryKind::Outer, square(0.0, 10.0));
        b.file_polygon(BoundaryKind::Outer, square(0.0, 20.0));
        assert!(b.is_valid());
        assert_relative_eq!(b.area_m2(), 400.0 - 1.0);
    }
}
