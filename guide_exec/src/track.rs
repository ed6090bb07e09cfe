//! # Recorded tracks
//!
//! A track is a CSV file of position fixes together with the line errors the host computed for
//! each fix, and whether the operator was recording a boundary at that moment. Tracks let a drive
//! be replayed through the guidance core without a vehicle.
//!
//! The header row must name the columns of [`TrackRow`], the `record` column holds `true` or
//! `false`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};

use crate::{guidance::LineErrors, loc::PositionSample};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single row of a track file.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRow {
    /// Time since the start of the track.
    ///
    /// Units: seconds
    pub time_s: f64,
    pub easting_m: f64,
    pub northing_m: f64,
    pub heading_rad: f64,
    pub speed_kmh: f64,
    pub xte_m: f64,
    pub head_err_rad: f64,

    /// Goal point in the vehicle frame, `x` forward.
    pub goal_x_m: f64,
    pub goal_y_m: f64,

    /// True while a boundary is being recorded.
    pub record: bool,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Could not open the track file: {0}")]
    OpenError(csv::Error),

    #[error("Could not parse row {row} of the track: {source}")]
    ParseError { row: usize, source: csv::Error },

    #[error("Row {row} of the track contains a non-finite value")]
    NonFiniteValue { row: usize },

    #[error("Time goes backwards at row {row}")]
    TimeNotIncreasing { row: usize },
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrackRow {
    pub fn position(&self) -> PositionSample {
        PositionSample::new(
            self.easting_m,
            self.northing_m,
            self.heading_rad,
            self.speed_kmh,
        )
    }

    pub fn line_errors(&self) -> LineErrors {
        LineErrors::new(
            self.xte_m,
            self.head_err_rad,
            Vector2::new(self.goal_x_m, self.goal_y_m),
        )
    }

    fn is_finite(&self) -> bool {
        [
            self.time_s,
            self.easting_m,
            self.northing_m,
            self.heading_rad,
            self.speed_kmh,
            self.xte_m,
            self.head_err_rad,
            self.goal_x_m,
            self.goal_y_m,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Read a whole track from a file.
pub fn read_track<P: AsRef<Path>>(path: P) -> Result<Vec<TrackRow>, TrackError> {
    let reader = csv::Reader::from_path(path).map_err(TrackError::OpenError)?;

    collect_rows(reader)
}

/// Read a whole track from any reader, for instance an in memory string.
pub fn read_track_from<R: Read>(rdr: R) -> Result<Vec<TrackRow>, TrackError> {
    collect_rows(csv::Reader::from_reader(rdr))
}

fn collect_rows<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrackRow>, TrackError> {
    let mut rows: Vec<TrackRow> = Vec::new();

    for (row, result) in reader.deserialize().enumerate() {
        let track_row: TrackRow = result.map_err(|source| TrackError::ParseError { row, source })?;

        if !track_row.is_finite() {
            return Err(TrackError::NonFiniteValue { row });
        }

        if let Some(prev) = rows.last() {
            if track_row.time_s < prev.time_s {
                return Err(TrackError::TimeNotIncreasing { row });
            }
        }

        rows.push(track_row);
    }

    Ok(rows)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
