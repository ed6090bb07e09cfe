//! # Guidance replay executable
//!
//! This binary replays a recorded track through the guidance core without requiring a vehicle. It
//! is designed to allow quick tuning of the guidance parameters and checking of the boundary
//! recorder against real drives.
//!
//! Usage: `guide_exec <track.csv>`

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::env;

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use log::{debug, info, warn};

use guide_lib::{
    boundary::{Boundary, BoundaryKind},
    boundary_rec::{BoundaryRecorder, RecorderParams},
    field_stats::{format_area, FieldStatistics, Units},
    guidance::GuidanceCtrl,
    track::{read_track, TrackRow},
};
use util::{
    archive::Archiver,
    logger::{logger_init, LevelFilter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new("guide_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Debug, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Guidance Replay\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD TRACK ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the track path
    let track = if args.len() == 2 {
        info!("Loading track from \"{}\"", &args[1]);

        read_track(&args[1]).wrap_err("Failed to load track")?
    }
    // If no arguments error out
    else {
        return Err(eyre!("Expected path to a track file as only argument"));
    };

    match (track.first(), track.last()) {
        (Some(first), Some(last)) => info!(
            "Loaded track lasts {:.02} s and contains {} rows\n",
            last.time_s - first.time_s,
            track.len()
        ),
        _ => warn!("Loaded track is empty\n"),
    }

    // ---- MODULE INIT ----

    let mut guidance =
        GuidanceCtrl::init("guidance.toml").wrap_err("Failed to initialise GuidanceCtrl")?;
    info!("GuidanceCtrl init complete");

    let recorder_params: RecorderParams =
        util::params::load("recorder.toml").wrap_err("Could not load recorder params")?;
    let mut recorder = BoundaryRecorder::new(&recorder_params);
    info!(
        "BoundaryRecorder init complete, offset {:.2} m to the {:?}",
        recorder_params.offset_m(),
        recorder_params.offset_side
    );

    let mut sample_archiver = Archiver::from_path(&session, "guidance/samples.csv")
        .wrap_err("Failed to create the guidance sample archive")?;

    let mut boundary = Boundary::new();

    // ---- MAIN LOOP ----

    info!("Begining replay\n");

    guidance.start();

    for row in track.iter() {
        let position = row.position();

        // ---- GUIDANCE ----

        if let Some(sample) = guidance.calculate_guidance(&position, &row.line_errors()) {
            sample_archiver
                .serialise(sample)
                .wrap_err("Failed to archive a guidance sample")?;
        }

        // ---- BOUNDARY RECORDING ----

        step_recorder(&mut recorder, &mut boundary, row);
    }

    // Finish off any recording still running at the end of the track
    if recorder.is_recording() {
        file_recording(&mut recorder, &mut boundary);
    }

    guidance.stop();

    // ---- RESULTS ----

    let mut stats = FieldStatistics::new();
    stats.update_boundary_area(Some(&boundary));

    if boundary.is_valid() {
        info!(
            "Recorded boundary: {} ({}) with {} inner ring(s)",
            format_area(stats.boundary_area_m2(), Units::Metric),
            format_area(stats.boundary_area_m2(), Units::Imperial),
            boundary.inner.len()
        );

        let fixes_inside = track
            .iter()
            .filter(|r| boundary.contains(&r.position().position_m()))
            .count();
        info!(
            "{} of {} fixes were inside the field",
            fixes_inside,
            track.len()
        );
    } else {
        warn!("No valid outer boundary was recorded");
    }

    session.save("boundary.json", boundary);

    info!("End of replay");

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Drive the recorder from the record flag of one track row.
///
/// The first recording of a replay is the outer boundary, any later ones are inner rings.
fn step_recorder(recorder: &mut BoundaryRecorder, boundary: &mut Boundary, row: &TrackRow) {
    match (row.record, recorder.is_recording()) {
        (true, false) => {
            let kind = if boundary.outer.is_none() {
                BoundaryKind::Outer
            } else {
                BoundaryKind::Inner
            };

            info!("Recording {:?} boundary from t = {:.2} s", kind, row.time_s);
            recorder.start_recording(kind);
            recorder.add_point(row.easting_m, row.northing_m, row.heading_rad);
        }
        (true, true) => recorder.add_point(row.easting_m, row.northing_m, row.heading_rad),
        (false, true) => {
            info!("Recording ended at t = {:.2} s", row.time_s);
            file_recording(recorder, boundary);
        }
        (false, false) => (),
    }
}

/// Stop the recorder and file the recorded polygon into the boundary.
fn file_recording(recorder: &mut BoundaryRecorder, boundary: &mut Boundary) {
    // The kind is cleared by stopping, so read it first
    let kind = recorder.kind();

    match (kind, recorder.stop_recording()) {
        (Some(kind), Some(polygon)) => boundary.file_polygon(kind, polygon),
        _ => warn!("Recording discarded, fewer than 3 points were captured"),
    }
}
