//! Raster scan-line coverage

use crate::common::{square_ring, square_with_hole};
use laserfill_camtools::fill::RasterFill;
use laserfill_camtools::{
    FillGenerator, FillParameters, HierarchyResolver, InfillPattern, PolygonWithHoles, Ring,
};
use laserfill_core::{AciColor, GeometryError, Point2, Precision};
use laserfill_settings::FillStrategy;
use std::collections::BTreeMap;

fn params(voxel: f64, overlap: f64) -> FillParameters {
    FillParameters {
        voxel_diameter: voxel,
        overlap,
        arc_resolution: 30,
        min_area: 1e-9,
        precision: Precision::default(),
    }
}

fn intervals_per_line(polygon: &PolygonWithHoles, pitch: f64) -> BTreeMap<usize, usize> {
    let mut lines = BTreeMap::new();
    for segment in RasterFill.generate(polygon, pitch, &params(pitch, 0.0)) {
        *lines.entry(segment.pass).or_insert(0) += 1;
    }
    lines
}

#[test]
fn test_square_with_hole_line_counts() {
    let polygon = square_with_hole();
    let fill = FillGenerator::new(params(1.0, 0.0), FillStrategy::Raster)
        .generate(&polygon)
        .unwrap();
    assert!(fill.warnings.is_empty());

    let mut per_line: BTreeMap<usize, Vec<(Point2, Point2)>> = BTreeMap::new();
    for s in &fill.segments {
        per_line.entry(s.pass).or_default().push((s.start, s.end));
    }
    assert_eq!(per_line.len(), 10);

    for (line, intervals) in &per_line {
        let y = intervals[0].0.y;
        if (4.0..6.0).contains(&y) {
            assert_eq!(intervals.len(), 2, "line {} at y={}", line, y);
        } else {
            assert_eq!(intervals.len(), 1, "line {} at y={}", line, y);
        }
    }

    // Line 4 sits at y = 4.5, runs left to right and stops at the hole.
    assert_eq!(
        per_line[&4],
        vec![
            (Point2::new(0.0, 4.5), Point2::new(4.0, 4.5)),
            (Point2::new(6.0, 4.5), Point2::new(10.0, 4.5)),
        ]
    );
    // Line 5 runs right to left.
    assert_eq!(
        per_line[&5],
        vec![
            (Point2::new(10.0, 5.5), Point2::new(6.0, 5.5)),
            (Point2::new(4.0, 5.5), Point2::new(0.0, 5.5)),
        ]
    );
}

#[test]
fn test_convex_polygon_one_interval_per_line() {
    let hexagon = Ring::new(
        (0..6)
            .map(|i| {
                let a = std::f64::consts::PI / 3.0 * i as f64 + 0.1;
                Point2::rounded(5.0 * a.cos(), 5.0 * a.sin(), Precision::default())
            })
            .collect(),
        AciColor::default(),
    );
    let polygon = PolygonWithHoles::simple(hexagon);
    let lines = intervals_per_line(&polygon, 0.3);
    assert!(lines.len() > 20);
    assert!(lines.values().all(|&count| count == 1));
}

#[test]
fn test_line_through_two_holes_has_three_intervals() {
    let polygon = HierarchyResolver::new(1e-6)
        .resolve(vec![
            square_ring(10.0, 5.0, 20.0),
            square_ring(5.0, 5.0, 2.0),
            square_ring(15.0, 5.0, 2.0),
            square_ring(10.0, 8.0, 2.0),
        ])
        .unwrap()
        .polygons
        .remove(0);

    let segments = RasterFill.generate(&polygon, 1.0, &params(1.0, 0.0));
    let at = |y: f64| segments.iter().filter(|s| s.start.y == y).count();
    // y = 4.5 crosses the two holes centred on y = 5.
    assert_eq!(at(4.5), 3);
    // y = 8.5 crosses only the upper hole.
    assert_eq!(at(8.5), 2);
    assert_eq!(at(0.5), 1);
}

#[test]
fn test_invalid_spacing() {
    let polygon = square_with_hole();
    let err = FillGenerator::new(params(1.0, 1.0), FillStrategy::Raster)
        .generate(&polygon)
        .unwrap_err();
    assert!(matches!(err, GeometryError::InvalidSpacing { pitch } if pitch == 0.0));
}

#[test]
fn test_segments_stay_inside_polygon() {
    let polygon = square_with_hole();
    for s in RasterFill.generate(&polygon, 0.25, &params(0.25, 0.0)) {
        assert!(polygon.covers(&s.start, 1e-6));
        assert!(polygon.covers(&s.end, 1e-6));
        assert!(polygon.covers(&s.start.midpoint(&s.end), 1e-6));
    }
}
