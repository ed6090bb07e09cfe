//! Implementations for the BoundaryRecorder state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace};
use serde::Serialize;

// Internal
use super::{offset_position, OffsetSide, RecorderParams, RecorderState};
use crate::boundary::{BoundaryKind, BoundaryPoint, BoundaryPolygon};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Boundary recorder state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoundaryRecorder {
    state: RecorderState,

    /// The kind of boundary being recorded, set when recording starts.
    kind: Option<BoundaryKind>,

    /// The polygon currently being recorded.
    in_progress: BoundaryPolygon,

    /// Unsigned lateral offset of the capture point.
    ///
    /// Units: meters
    offset_m: f64,

    offset_side: OffsetSide,
}

/// Status of the recorder, as shown to the operator.
#[derive(Debug, Copy, Clone, Serialize)]
pub struct RecorderStatus {
    pub state: RecorderState,

    pub num_points: usize,

    /// Area enclosed by the points recorded so far.
    ///
    /// Units: hectares
    pub area_hectares: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl BoundaryRecorder {
    /// Create a new idle recorder using the offset from the parameters.
    pub fn new(params: &RecorderParams) -> Self {
        let mut rec = Self::default();
        rec.set_offset(params.offset_m(), params.offset_side);
        rec
    }

    /// Set the lateral offset applied to every captured point.
    ///
    /// `offset_m` is the distance from the antenna, the side selects which way it is applied.
    /// Negative distances are accepted and flip the side.
    pub fn set_offset(&mut self, offset_m: f64, side: OffsetSide) {
        self.offset_m = offset_m;
        self.offset_side = side;
    }

    /// The offset currently applied, positive to the right of travel.
    ///
    /// Units: meters
    pub fn signed_offset_m(&self) -> f64 {
        self.offset_side.signed(self.offset_m)
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// The kind of boundary being recorded, or `None` if idle.
    pub fn kind(&self) -> Option<BoundaryKind> {
        match self.state {
            RecorderState::Idle => None,
            _ => self.kind,
        }
    }

    pub fn point_count(&self) -> usize {
        self.in_progress.len()
    }

    /// The points captured so far.
    pub fn points(&self) -> &[BoundaryPoint] {
        self.in_progress.points()
    }

    /// Area of the polygon recorded so far.
    ///
    /// Units: meters^2
    pub fn area_m2(&self) -> f64 {
        self.in_progress.area_m2()
    }

    pub fn area_hectares(&self) -> f64 {
        self.in_progress.area_hectares()
    }

    pub fn status(&self) -> RecorderStatus {
        RecorderStatus {
            state: self.state,
            num_points: self.point_count(),
            area_hectares: self.area_hectares(),
        }
    }

    /// Start recording a new boundary polygon.
    ///
    /// Only valid from `Idle`, ignored otherwise.
    pub fn start_recording(&mut self, kind: BoundaryKind) {
        if self.state != RecorderState::Idle {
            debug!(
                "Ignoring start of {:?} boundary recording while {:?}",
                kind, self.state
            );
            return;
        }

        self.in_progress = BoundaryPolygon::new();
        self.kind = Some(kind);
        self.state = RecorderState::Recording;

        info!(
            "Started recording {:?} boundary (offset {:.2} m)",
            kind,
            self.signed_offset_m()
        );
    }

    /// Capture a new point from the vehicle's position and heading.
    ///
    /// The lateral offset is applied before the point is stored. Ignored unless recording.
    pub fn add_point(&mut self, easting_m: f64, northing_m: f64, heading_rad: f64) {
        if self.state != RecorderState::Recording {
            return;
        }

        let (e, n) = offset_position(easting_m, northing_m, heading_rad, self.signed_offset_m());

        trace!(
            "Boundary point {}: ({:.3}, {:.3})",
            self.in_progress.len(),
            e,
            n
        );

        self.in_progress.push(BoundaryPoint::new(e, n, heading_rad));
    }

    /// Pause the current recording, ignored unless recording.
    pub fn pause_recording(&mut self) {
        if self.state == RecorderState::Recording {
            self.state = RecorderState::Paused;
            debug!("Boundary recording paused at {} points", self.point_count());
        }
    }

    /// Resume a paused recording, ignored unless paused.
    pub fn resume_recording(&mut self) {
        if self.state == RecorderState::Paused {
            self.state = RecorderState::Recording;
            debug!("Boundary recording resumed");
        }
    }

    /// Remove the most recently captured point.
    ///
    /// Returns `true` if a point was removed. Always `false` when idle.
    pub fn remove_last_point(&mut self) -> bool {
        if self.state == RecorderState::Idle {
            return false;
        }

        self.in_progress.pop().is_some()
    }

    /// Remove all captured points without changing the state.
    pub fn clear_points(&mut self) {
        self.in_progress.clear();
    }

    /// Stop recording and return the finished polygon.
    ///
    /// Returns `None` if there are not enough points to make a polygon, or if the recorder was
    /// already idle. In both cases the recorder ends up idle.
    pub fn stop_recording(&mut self) -> Option<BoundaryPolygon> {
        if self.state == RecorderState::Idle {
            return None;
        }

        self.state = RecorderState::Idle;
        let polygon = std::mem::take(&mut self.in_progress);

        if polygon.is_valid() {
            info!(
                "Stopped recording {:?} boundary: {} points, {:.2} ha",
                self.kind,
                polygon.len(),
                polygon.area_hectares()
            );
            Some(polygon)
        } else {
            info!(
                "Stopped recording {:?} boundary with only {} points, boundary discarded",
                self.kind,
                polygon.len()
            );
            None
        }
    }

    /// Abandon the current recording, discarding every captured point.
    pub fn cancel_recording(&mut self) {
        if self.state == RecorderState::Idle {
            return;
        }

        info!(
            "Cancelled {:?} boundary recording, {} points discarded",
            self.kind,
            self.point_count()
        );

        self.state = RecorderState::Idle;
        self.in_progress.clear();
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
