//! Integration tests: geometry kernel properties (tessel-core).
//!
//! Exercises clipping and boolean operations over a handful of operand
//! shapes, checking the invariants the tile editor relies on.

use tessel_core::kernel::{self, clip_to_bounds, difference, points_to_shape, rectangle, union};
use tessel_core::{Point, Shape};

const W: f64 = 240.0;
const H: f64 = 160.0;
const EPS: f64 = 1e-6;

fn poly(points: &[(f64, f64)]) -> Shape {
    let pts: Vec<Point> = points.iter().copied().map(Point::from).collect();
    points_to_shape(&pts)
}

fn operands() -> Vec<Shape> {
    vec![
        // crosses the left edge
        poly(&[(-20.0, 40.0), (30.0, 60.0), (-20.0, 100.0)]),
        // crosses the top-right corner
        poly(&[(200.0, -30.0), (280.0, -30.0), (280.0, 40.0), (200.0, 40.0)]),
        // fully inside
        poly(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]),
        // fully outside
        poly(&[(300.0, 300.0), (340.0, 300.0), (320.0, 340.0)]),
        // concave, straddling the bottom edge
        poly(&[
            (50.0, 140.0),
            (90.0, 140.0),
            (70.0, 150.0),
            (90.0, 190.0),
            (50.0, 190.0),
        ]),
    ]
}

fn assert_contained(shape: &Shape) {
    for p in shape.points() {
        assert!(
            p.x >= -EPS && p.x <= W + EPS && p.y >= -EPS && p.y <= H + EPS,
            "point {p:?} escapes [0,{W}]x[0,{H}]"
        );
    }
}

// ─── Clipping ───────────────────────────────────────────────────────────

#[test]
fn clip_is_idempotent() {
    for shape in operands() {
        let once = clip_to_bounds(&shape, W, H);
        let twice = clip_to_bounds(&once, W, H);
        assert!(
            (once.area() - twice.area()).abs() < EPS,
            "area changed on second clip: {} vs {}",
            once.area(),
            twice.area()
        );
        assert_eq!(once.bounds().is_some(), twice.bounds().is_some());
        if let (Some(a), Some(b)) = (once.bounds(), twice.bounds()) {
            assert!((a.min_x - b.min_x).abs() < EPS && (a.max_x - b.max_x).abs() < EPS);
            assert!((a.min_y - b.min_y).abs() < EPS && (a.max_y - b.max_y).abs() < EPS);
        }
    }
}

#[test]
fn clip_of_full_tile_is_identity_in_area() {
    let tile = rectangle(W, H);
    assert!((clip_to_bounds(&tile, W, H).area() - W * H).abs() < EPS);
}

// ─── Containment ────────────────────────────────────────────────────────

#[test]
fn boolean_results_stay_in_bounds() {
    let mut tile = rectangle(W, H);
    for (i, operand) in operands().iter().enumerate() {
        tile = if i % 2 == 0 {
            difference(&tile, operand, W, H)
        } else {
            union(&tile, operand, W, H)
        };
        assert_contained(&tile);
    }
}

#[test]
fn union_with_inside_piece_after_difference_restores_area() {
    let tile = rectangle(W, H);
    let piece = poly(&[(100.0, 60.0), (140.0, 60.0), (120.0, 100.0)]);
    let cut = difference(&tile, &piece, W, H);
    assert!((cut.area() - (W * H - 800.0)).abs() < 1e-3);
    let restored = union(&cut, &piece, W, H);
    assert!((restored.area() - W * H).abs() < 1e-3);
}

#[test]
fn translate_then_clip_drops_far_piece() {
    let piece = poly(&[(0.0, 60.0), (20.0, 40.0), (20.0, 120.0)]);
    let slid = kernel::translate(&piece, W, 0.0);
    assert!(clip_to_bounds(&slid, W, H).area() < EPS);
}
