//! Plane frame construction and project/lift round trips

use approx::assert_relative_eq;
use laserfill_camtools::PlaneFrame;
use laserfill_core::{Point2, Point3, Precision};
use nalgebra::Vector3;
use proptest::prelude::*;

#[test]
fn test_up_axis_gives_world_basis() {
    let a = PlaneFrame::new(Vector3::z(), Point3::new(3.0, 4.0, 5.0), Precision::default()).unwrap();
    let b = PlaneFrame::new(Vector3::z(), Point3::default(), Precision::default()).unwrap();
    for frame in [a, b] {
        assert_eq!(frame.u(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(frame.v(), Vector3::new(0.0, 1.0, 0.0));
    }
}

#[test]
fn test_tilted_face_projects_to_plane_coordinates() {
    // Face x + z = 0 tilted 45 degrees about Y.
    let normal = Vector3::new(1.0, 0.0, 1.0);
    let frame = PlaneFrame::new(normal, Point3::default(), Precision::default()).unwrap();
    let corner = Point3::new(1.0, 2.0, -1.0);

    let q = frame.project(&corner);
    assert_relative_eq!(q.x.hypot(q.y), 6f64.sqrt(), epsilon = 1e-6);
    assert!(frame.lift(&q, 0.0).approx_eq(&corner, 1e-5));
    assert_relative_eq!(frame.height_of(&corner), 0.0, epsilon = 1e-12);
}

#[test]
fn test_lift_with_height() {
    let frame = PlaneFrame::new(Vector3::z(), Point3::default(), Precision::default()).unwrap();
    assert_eq!(frame.lift(&Point2::new(1.0, 2.0), 0.5), Point3::new(1.0, 2.0, 0.5));
}

proptest! {
    #[test]
    fn project_then_lift_returns_point(
        nx in -1.0f64..1.0,
        ny in -1.0f64..1.0,
        nz in -1.0f64..1.0,
        a in -100.0f64..100.0,
        b in -100.0f64..100.0,
        ox in -50.0f64..50.0,
        oy in -50.0f64..50.0,
        oz in -50.0f64..50.0,
    ) {
        let normal = Vector3::new(nx, ny, nz);
        prop_assume!(normal.norm() > 1e-3);

        let origin = Point3::new(ox, oy, oz);
        let frame = PlaneFrame::new(normal, origin, Precision::default()).unwrap();
        let on_plane = origin.to_vector() + frame.u() * a + frame.v() * b;
        let p = Point3::from_vector(&on_plane);

        let back = frame.lift(&frame.project(&p), 0.0);
        prop_assert!(back.approx_eq(&p, 1e-5), "{} != {}", back, p);
    }

    #[test]
    fn frame_is_orthonormal(nx in -1.0f64..1.0, ny in -1.0f64..1.0, nz in -1.0f64..1.0) {
        let normal = Vector3::new(nx, ny, nz);
        prop_assume!(normal.norm() > 1e-3);

        let frame = PlaneFrame::new(normal, Point3::default(), Precision::default()).unwrap();
        prop_assert!((frame.u().norm() - 1.0).abs() < 1e-9);
        prop_assert!((frame.v().norm() - 1.0).abs() < 1e-9);
        prop_assert!(frame.u().dot(&frame.v()).abs() < 1e-9);
        prop_assert!((frame.u().cross(&frame.v()) - frame.normal()).norm() < 1e-9);
    }
}
