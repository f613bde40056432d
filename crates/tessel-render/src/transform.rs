//! Tile geometry → kurbo paths and instance placement transforms.

use kurbo::{Affine, BezPath, Point as KPoint};
use tessel_core::{Point, Ring, Shape};
use tessel_editor::TileInstance;

/// Placement of an instance on the assembly canvas: rotate about the tile
/// centre, then translate the tile origin to `(x, y)`. Positive angles turn
/// clockwise on screen (y points down).
pub fn instance_transform(instance: &TileInstance, tile_w: f64, tile_h: f64) -> Affine {
    let centre = KPoint::new(tile_w / 2.0, tile_h / 2.0);
    Affine::translate((instance.x, instance.y))
        * Affine::rotate_about(instance.rotation.to_radians(), centre)
}

/// Map a canvas point into the instance's tile space. `None` if the
/// transform is degenerate.
pub fn to_tile_space(transform: Affine, p: Point) -> Option<Point> {
    if transform.determinant().abs() < f64::EPSILON {
        return None;
    }
    let local = transform.inverse() * KPoint::new(p.x, p.y);
    Some(Point::new(local.x, local.y))
}

/// Every ring as a closed subpath.
pub fn shape_to_bez_path(shape: &Shape) -> BezPath {
    let mut bez = BezPath::new();
    for ring in shape.rings() {
        push_ring(&mut bez, ring);
    }
    bez
}

/// An open polyline through `points`.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut bez = BezPath::new();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            bez.move_to((p.x, p.y));
        } else {
            bez.line_to((p.x, p.y));
        }
    }
    bez
}

fn push_ring(bez: &mut BezPath, ring: &Ring) {
    let Some(first) = ring.first() else {
        return;
    };
    bez.move_to((first.x, first.y));
    let closing = ring.len() > 1 && ring.last() == Some(first);
    let end = if closing { ring.len() - 1 } else { ring.len() };
    for p in &ring[1..end] {
        bez.line_to((p.x, p.y));
    }
    bez.close_path();
}
