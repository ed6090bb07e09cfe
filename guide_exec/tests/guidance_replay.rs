//! Replays synthetic drives through the guidance core, the way the replay executable does.

use approx::assert_relative_eq;
use nalgebra::Point2;

use guide_lib::{
    boundary::{Boundary, BoundaryKind},
    boundary_rec::{BoundaryRecorder, OffsetSide, RecorderParams, RecorderState},
    field_stats::FieldStatistics,
    guidance::{GuidanceCtrl, VehicleConfig},
    track::{read_track_from, TrackRow},
};

const PARAMS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../params");

/// Rows driving clockwise around a 40 m square starting at the origin, 10 m between rows.
fn square_drive() -> Vec<TrackRow> {
    use std::f64::consts::{FRAC_PI_2, PI};

    let legs = [
        ((0.0, 0.0), (0.0, 10.0), 0.0),
        ((0.0, 40.0), (10.0, 0.0), FRAC_PI_2),
        ((40.0, 40.0), (0.0, -10.0), PI),
        ((40.0, 0.0), (-10.0, 0.0), 3.0 * FRAC_PI_2),
    ];

    let mut rows = Vec::new();

    for &((e0, n0), (de, dn), heading_rad) in legs.iter() {
        for i in 0..4 {
            rows.push(TrackRow {
                time_s: rows.len() as f64,
                easting_m: e0 + de * i as f64,
                northing_m: n0 + dn * i as f64,
                heading_rad,
                speed_kmh: 8.0,
                xte_m: 0.0,
                head_err_rad: 0.0,
                goal_x_m: 5.0,
                goal_y_m: 0.0,
                record: true,
            });
        }
    }

    rows
}

fn record(rows: &[TrackRow], side: OffsetSide) -> Boundary {
    let params = RecorderParams {
        offset_cm: 100.0,
        offset_side: side,
    };
    let mut recorder = BoundaryRecorder::new(&params);
    let mut boundary = Boundary::new();

    recorder.start_recording(BoundaryKind::Outer);
    for row in rows {
        recorder.add_point(row.easting_m, row.northing_m, row.heading_rad);
    }

    let kind = recorder.kind().unwrap();
    let polygon = recorder.stop_recording().unwrap();
    assert_eq!(recorder.state(), RecorderState::Idle);

    boundary.file_polygon(kind, polygon);
    boundary
}

#[test]
fn test_shipped_params_load() {
    let config: VehicleConfig =
        util::params::load_from_path(format!("{}/guidance.toml", PARAMS_DIR)).unwrap();
    assert!(config.validate().is_ok());

    let rec: RecorderParams =
        util::params::load_from_path(format!("{}/recorder.toml", PARAMS_DIR)).unwrap();
    assert!(rec.offset_m() >= 0.0);
}

#[test]
fn test_record_square_with_offset() {
    let rows = square_drive();

    // Driving clockwise, the right hand side is the inside of the field
    let inside = record(&rows, OffsetSide::Right);
    let outside = record(&rows, OffsetSide::Left);

    assert!(inside.is_valid());
    assert_eq!(inside.outer.as_ref().unwrap().len(), 16);
    assert!(inside.area_m2() < 1600.0);
    assert!(outside.area_m2() > 1600.0);

    let centre = Point2::new(20.0, 20.0);
    assert!(inside.contains(&centre));
    assert!(outside.contains(&centre));

    // Between the driven line and the inset capture points
    let margin = Point2::new(39.5, 20.0);
    assert!(!inside.contains(&margin));
    assert!(outside.contains(&margin));

    // A driven fix half way up the west side lies between the two recordings
    let fix = rows[2].position().position_m();
    assert_eq!(fix, Point2::new(0.0, 20.0));
    assert!(!inside.contains(&fix));
    assert!(outside.contains(&fix));

    let mut stats = FieldStatistics::new();
    stats.update_boundary_area(Some(&inside));
    assert_relative_eq!(stats.boundary_area_m2(), inside.area_m2());
    assert_relative_eq!(stats.remaining_percent(), 100.0);
}

#[test]
fn test_replay_guidance() {
    let csv = "time_s,easting_m,northing_m,heading_rad,speed_kmh,xte_m,head_err_rad,goal_x_m,goal_y_m,record\n\
               0.0,0.0,0.0,0.0,10.0,0.8,0.3,6.0,-0.8,false\n\
               0.1,0.0,0.3,0.0,10.0,0.4,0.2,6.0,-0.4,false\n\
               0.2,0.0,0.6,0.0,10.0,0.05,0.01,6.0,-0.05,false\n\
               0.3,0.0,0.9,0.0,10.0,0.02,0.01,6.0,-0.02,false\n\
               0.4,0.0,1.2,0.0,10.0,0.01,0.0,6.0,-0.01,false\n";

    let rows = read_track_from(csv.as_bytes()).unwrap();

    let mut config = VehicleConfig::default();
    config.dead_zone.delay = 2;

    let mut ctrl = GuidanceCtrl::new(config).unwrap();
    ctrl.start();

    let samples: Vec<_> = rows
        .iter()
        .filter_map(|r| ctrl.calculate_guidance(&r.position(), &r.line_errors()))
        .collect();

    assert_eq!(samples.len(), rows.len());

    // Far from the line the lookahead is longer than once on it
    assert!(samples[0].lookahead_m > samples[4].lookahead_m);
    assert!(!samples[0].is_on_line);
    assert!(samples[2].is_on_line);

    // Steering until the heading error has been small for two ticks
    assert!(samples[0].steer_rad > 0.0);
    assert!(samples[2].steer_rad != 0.0);
    assert_eq!(samples[3].steer_rad, 0.0);
    assert_eq!(samples[4].steer_rad, 0.0);

    assert_eq!(ctrl.last_sample(), Some(samples[4]));
}
