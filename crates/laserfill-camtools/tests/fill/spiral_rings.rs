//! Spiral ring generation

use crate::common::square_ring;
use laserfill_camtools::fill::SpiralFill;
use laserfill_camtools::{FillParameters, InfillPattern, PolygonWithHoles};
use laserfill_core::Precision;
use std::collections::BTreeMap;

fn params(voxel: f64) -> FillParameters {
    FillParameters {
        voxel_diameter: voxel,
        overlap: 0.0,
        arc_resolution: 30,
        min_area: 1e-9,
        precision: Precision::default(),
    }
}

#[test]
fn test_square_rings_step_inward() {
    let polygon = PolygonWithHoles::simple(square_ring(5.0, 5.0, 10.0));
    let segments = SpiralFill.generate(&polygon, 1.0, &params(1.0));

    // Transitions start on the previous ring, so the deepest start of a pass is its ring.
    let mut depth_by_pass: BTreeMap<usize, f64> = BTreeMap::new();
    for s in &segments {
        let d = s.start.x.min(s.start.y).min(10.0 - s.start.x).min(10.0 - s.start.y);
        let entry = depth_by_pass.entry(s.pass).or_insert(f64::NEG_INFINITY);
        *entry = entry.max(d);
    }

    // Rings at 0.5, 1.5, 2.5, 3.5 and 4.5 from the boundary.
    assert_eq!(depth_by_pass.len(), 5);
    for (pass, depth) in depth_by_pass {
        assert!(
            (depth - (0.5 + pass as f64)).abs() < 1e-3,
            "pass {} ring sits {} from the boundary",
            pass,
            depth
        );
    }
}

#[test]
fn test_rings_are_joined() {
    let polygon = PolygonWithHoles::simple(square_ring(0.0, 0.0, 8.0));
    let segments = SpiralFill.generate(&polygon, 1.0, &params(1.0));
    assert!(!segments.is_empty());
    for pair in segments.windows(2) {
        assert!(
            pair[0].end.approx_eq(&pair[1].start, 1e-6),
            "gap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_all_segments_inside_outer() {
    let polygon = PolygonWithHoles::simple(square_ring(0.0, 0.0, 6.0));
    for s in SpiralFill.generate(&polygon, 0.4, &params(0.4)) {
        assert!(polygon.covers(&s.start, 1e-6));
        assert!(polygon.covers(&s.end, 1e-6));
    }
}
