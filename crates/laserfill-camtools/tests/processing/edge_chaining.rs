//! Contour assembly from ordered and unordered edges

use laserfill_camtools::{group_connected_edges, ArcDirection, Closure, Edge, EdgeAssembler};
use laserfill_core::{GeometryError, Point3, Precision};

fn assembler() -> EdgeAssembler {
    EdgeAssembler::new(30, 1e-5, Precision::default())
}

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

#[test]
fn test_open_chain_is_flagged() {
    let edges = vec![
        Edge::line(p(0.0, 0.0), p(4.0, 0.0)),
        Edge::line(p(4.0, 0.0), p(4.0, 4.0)),
        Edge::line(p(4.0, 4.0), p(0.0, 4.0)),
        Edge::line(p(0.0, 4.0), p(0.0, 0.5)),
    ];
    let assembly = assembler().assemble(&edges).unwrap();
    match assembly.closure {
        Closure::Open { gap, edge_index } => {
            assert!((gap - 0.5).abs() < 1e-9);
            assert_eq!(edge_index, 3);
        }
        Closure::Closed => panic!("expected an open chain"),
    }
    // The chain is kept for inspection.
    assert_eq!(assembly.points.len(), 5);
    assert!(matches!(
        assembly.into_closed(),
        Err(GeometryError::OpenContour { edge_index: 3, .. })
    ));
}

#[test]
fn test_reversed_edge_is_chained() {
    let edges = vec![
        Edge::line(p(0.0, 0.0), p(4.0, 0.0)),
        Edge::line(p(4.0, 4.0), p(4.0, 0.0)),
        Edge::line(p(4.0, 4.0), p(0.0, 4.0)),
        Edge::line(p(0.0, 4.0), p(0.0, 0.0)),
    ];
    let points = assembler().assemble(&edges).unwrap().into_closed().unwrap();
    assert_eq!(points, vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)]);
}

#[test]
fn test_reversed_arc_is_chained() {
    // Slot: two lines and two half circles, the second arc listed backwards.
    let edges = vec![
        Edge::line(p(0.0, 0.0), p(4.0, 0.0)),
        Edge::arc(p(4.0, 1.0), 1.0, 270.0, 90.0),
        Edge::line(p(4.0, 2.0), p(0.0, 2.0)),
        Edge::Arc {
            center: p(0.0, 1.0),
            radius: 1.0,
            start_angle: 270.0,
            end_angle: 90.0,
            direction: ArcDirection::Clockwise,
        },
    ];
    let assembly = assembler().assemble(&edges).unwrap();
    assert!(assembly.is_closed());
    // 15 chords per half circle at 30 per revolution.
    assert_eq!(assembly.points.len(), 2 * 15 + 2);
    assert!(assembly.points.iter().all(|q| q.x >= -1.0 - 1e-6 && q.x <= 5.0 + 1e-6));
}

#[test]
fn test_zero_length_edges_dropped() {
    let edges = vec![
        Edge::line(p(0.0, 0.0), p(2.0, 0.0)),
        Edge::line(p(2.0, 0.0), p(2.0, 0.0)),
        Edge::line(p(2.0, 0.0), p(2.0, 2.0)),
        Edge::line(p(2.0, 2.0), p(0.0, 0.0)),
    ];
    let assembly = assembler().assemble(&edges).unwrap();
    assert!(assembly.is_closed());
    assert_eq!(assembly.points.len(), 3);
}

#[test]
fn test_near_miss_is_snapped_closed() {
    let edges = vec![
        Edge::line(p(0.0, 0.0), p(2.0, 0.0)),
        Edge::line(p(2.0, 0.0), p(2.0, 2.0)),
        Edge::line(p(2.0, 2.0), p(0.000001, 0.0)),
    ];
    let assembly = assembler().assemble(&edges).unwrap();
    assert!(assembly.is_closed());
    assert_eq!(assembly.points.len(), 3);
}

#[test]
fn test_edge_soup_regrouped() {
    let mut edges = vec![
        Edge::line(p(10.0, 10.0), p(11.0, 10.0)),
        Edge::line(p(0.0, 3.0), p(0.0, 0.0)),
        Edge::line(p(11.0, 11.0), p(11.0, 10.0)),
        Edge::line(p(3.0, 0.0), p(3.0, 3.0)),
        Edge::line(p(11.0, 11.0), p(10.0, 10.0)),
        Edge::line(p(0.0, 0.0), p(3.0, 0.0)),
        Edge::line(p(3.0, 3.0), p(0.0, 3.0)),
    ];
    edges.rotate_left(2);

    let groups = group_connected_edges(&edges, 1e-6);
    assert_eq!(groups.len(), 2);
    for group in &groups {
        let assembly = assembler().assemble(group).unwrap();
        assert!(assembly.is_closed());
    }
}
