//! Parameters structure for the boundary recorder

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

use super::OffsetSide;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the boundary recorder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecorderParams {
    /// Distance between the antenna and the capture point, perpendicular to the heading.
    ///
    /// Entered by the operator in centimeters.
    ///
    /// Units: centimeters
    pub offset_cm: f64,

    /// Which side of the vehicle the capture point lies on.
    pub offset_side: OffsetSide,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RecorderParams {
    /// The offset distance.
    ///
    /// Units: meters
    pub fn offset_m(&self) -> f64 {
        self.offset_cm / 100.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_params() {
        let p: RecorderParams =
            util::params::from_str("offset_cm = 250.0\noffset_side = \"Left\"\n").unwrap();

        assert_eq!(p.offset_side, OffsetSide::Left);
        assert_eq!(p.offset_m(), 2.5);
    }
}
