//! End-to-end jobs across several batches

use crate::common::{descriptor, square_edges};
use laserfill_camtools::{run_job, Edge, EdgeLoop, FillWarning, PlaneDescriptor};
use laserfill_core::{AciColor, GeometryError, Point3, ShutterState};
use laserfill_settings::{Config, ConfigError, FillStrategy, ZPolicy};

fn config(voxel: f64, strategy: FillStrategy) -> Config {
    let mut config = Config::default();
    config.fill.voxel_diameter = voxel;
    config.fill.overlap_fraction = 0.0;
    config.fill.strategy = strategy;
    config
}

#[test]
fn test_origin_spans_all_batches() {
    let descriptors = vec![
        descriptor("low", vec![square_edges(0.0, 0.0, 4.0, 0.0)]),
        descriptor("high", vec![square_edges(-3.0, 2.0, 4.0, 2.5)]),
    ];
    let report = run_job(&descriptors, &config(1.0, FillStrategy::Raster)).unwrap();

    assert!(report.failures.is_empty());
    let origin = report.origin.unwrap();

    let points: Vec<Point3> = report
        .toolpaths()
        .flat_map(|t| t.segments.iter())
        .flat_map(|s| [s.start, s.end])
        .collect();
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_z = points.iter().map(|p| p.z).fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(origin.origin, Point3::new(min_x, min_y, max_z));
    assert_eq!(max_z, 2.5);

    for toolpath in report.toolpaths() {
        assert_eq!(toolpath.pending_origin, Some(origin));
        for segment in toolpath.shifted_segments() {
            assert!(segment.start.x >= 0.0 && segment.start.y >= 0.0);
            assert!(segment.start.z <= 0.0);
        }
    }
}

#[test]
fn test_failed_batch_is_isolated() {
    let mut open = square_edges(0.0, 0.0, 4.0, 0.0);
    open.pop();
    let descriptors = vec![
        descriptor("good", vec![square_edges(0.0, 0.0, 4.0, 0.0)]),
        descriptor("broken", vec![open]),
    ];
    let report = run_job(&descriptors, &config(1.0, FillStrategy::Raster)).unwrap();

    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].id, "good");
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].batch, "broken");
    assert!(matches!(
        report.failures[0].source,
        GeometryError::OpenContour { .. }
    ));
}

#[test]
fn test_invalid_spacing_fails_before_batches() {
    let descriptors = vec![descriptor("a", vec![square_edges(0.0, 0.0, 4.0, 0.0)])];
    let mut bad = Config::default();
    bad.fill.overlap_fraction = 1.0;

    let err = run_job(&descriptors, &bad).unwrap_err();
    assert!(matches!(err, ConfigError::ValueOutOfRange { ref key, .. } if key == "fill.overlap_fraction"));
}

#[test]
fn test_collinear_contour_warns_without_failing() {
    let line = vec![
        Edge::line(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)),
        Edge::line(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)),
        Edge::line(Point3::new(2.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)),
    ];
    let descriptors = vec![descriptor("flat", vec![line])];
    let report = run_job(&descriptors, &config(1.0, FillStrategy::Raster)).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.outputs[0].toolpaths.len(), 0);
    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].0, "flat");
    assert!(matches!(warnings[0].1, FillWarning::EmptyFill { .. }));
    assert!(report.origin.is_none());
}

#[test]
fn test_spiral_job_with_constant_z_and_speeds() {
    let mut cfg = config(0.5, FillStrategy::Spiral);
    cfg.toolpath.z_policy = ZPolicy::Constant { z: -1.0 };

    let descriptors = vec![PlaneDescriptor {
        id: "disc".to_string(),
        orientation: None,
        loops: vec![EdgeLoop::new(
            AciColor::CYAN,
            vec![Edge::arc(Point3::new(0.0, 0.0, 0.0), 3.0, 0.0, 0.0)],
        )],
    }];
    let report = run_job(&descriptors, &cfg).unwrap();
    let toolpath = report.toolpaths().next().unwrap();

    assert_eq!(toolpath.color, AciColor::CYAN);
    assert!(toolpath.segments.iter().all(|s| s.z == -1.0));
    assert!(toolpath.segments.iter().all(|s| s.feedrate == 0.8));
    assert!(toolpath
        .segments
        .iter()
        .all(|s| s.shutter == ShutterState::Open));
}

#[test]
fn test_descriptor_round_trips_through_json() {
    let original = descriptor("json", vec![square_edges(0.0, 0.0, 1.0, 0.0)]);
    let text = serde_json::to_string(&original).unwrap();
    let parsed: PlaneDescriptor = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn test_constant_z_job_starts_at_relative_zero() {
    let mut cfg = config(1.0, FillStrategy::Raster);
    cfg.toolpath.z_policy = ZPolicy::Constant { z: -50.0 };

    let descriptors = vec![descriptor("face", vec![square_edges(0.0, 0.0, 4.0, 0.0)])];
    let report = run_job(&descriptors, &cfg).unwrap();

    let origin = report.origin.unwrap();
    assert_eq!(origin.origin.z, -50.0);
    for toolpath in report.toolpaths() {
        assert!(toolpath.segments.iter().all(|s| s.z == -50.0));
        assert!(toolpath.shifted_segments().iter().all(|s| s.z == 0.0));
    }
}

#[test]
fn test_strip_thinner_than_pitch_is_reported() {
    let strip = vec![
        Edge::line(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)),
        Edge::line(Point3::new(10.0, 0.0, 0.0), Point3::new(10.0, 0.3, 0.0)),
        Edge::line(Point3::new(10.0, 0.3, 0.0), Point3::new(0.0, 0.3, 0.0)),
        Edge::line(Point3::new(0.0, 0.3, 0.0), Point3::new(0.0, 0.0, 0.0)),
    ];
    for strategy in [FillStrategy::Raster, FillStrategy::Spiral] {
        let descriptors = vec![descriptor("strip", vec![strip.clone()])];
        let report = run_job(&descriptors, &config(1.0, strategy)).unwrap();

        assert!(report.failures.is_empty());
        assert_eq!(report.toolpaths().count(), 0);
        let warnings: Vec<_> = report.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].0, "strip");
        assert!(matches!(warnings[0].1, FillWarning::EmptyFill { .. }));
    }
}

#[test]
fn test_failure_names_the_offending_loop() {
    let mut open = square_edges(10.0, 10.0, 2.0, 0.0);
    open.pop();
    let descriptors = vec![descriptor(
        "holed",
        vec![square_edges(0.0, 0.0, 8.0, 0.0), open],
    )];
    let report = run_job(&descriptors, &config(1.0, FillStrategy::Raster)).unwrap();

    let failure = &report.failures[0];
    assert_eq!(failure.loop_index, Some(1));
    assert!(matches!(
        failure.source,
        GeometryError::OpenContour { edge_index: 2, .. }
    ));
    assert!(failure.to_string().contains("loop 1"));
}
