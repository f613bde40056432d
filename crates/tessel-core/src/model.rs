//! Tile geometry data model.
//!
//! A `Shape` is a multi-polygon: an ordered list of polygons, each an
//! exterior ring plus zero or more hole rings. Rings are plain point lists.
//! Rings produced by the boolean kernel are closed (first point repeated at
//! the end); hand-built rings may be open and are closed on conversion.

use crate::kernel;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Points & rings ──────────────────────────────────────────────────────

/// A 2D point in tile space. `+x` right, `+y` down.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// An ordered point sequence forming one boundary.
pub type Ring = Vec<Point>;

// ─── Polygons ────────────────────────────────────────────────────────────

/// One polygon: an exterior boundary and its holes.
/// Most tile polygons have no holes, so one hole is stored inline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    #[serde(default)]
    pub holes: SmallVec<[Ring; 1]>,
}

impl Polygon {
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: SmallVec::new(),
        }
    }

    pub fn with_holes(exterior: Ring, holes: impl IntoIterator<Item = Ring>) -> Self {
        Self {
            exterior,
            holes: holes.into_iter().collect(),
        }
    }

    /// Exterior first, then holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────

/// A multi-polygon. The tile shape, draft operands and slid cut pieces
/// are all `Shape`s.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub polygons: Vec<Polygon>,
}

impl Shape {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// The shape with no polygons.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.exterior.is_empty())
    }

    /// Every ring of every polygon, in order.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons.iter().flat_map(Polygon::rings)
    }

    /// Every point of every ring.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.rings().flat_map(|r| r.iter())
    }

    pub fn point_count(&self) -> usize {
        self.rings().map(Vec::len).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(Point::is_finite)
    }

    /// Filled area (exteriors minus holes).
    pub fn area(&self) -> f64 {
        use geo::Area;
        kernel::to_geo(self).unsigned_area()
    }

    /// Axis-aligned bounding box, `None` for the empty shape.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let first = points.next()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    /// Whether `p` lies in the filled interior. Boundary points and points
    /// inside holes are outside.
    pub fn contains_point(&self, p: Point) -> bool {
        use geo::Contains;
        kernel::to_geo(self).contains(&geo::Point::new(p.x, p.y))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether these bounds sit inside `[0,w] × [0,h]`, allowing `eps` slack.
    pub fn within(&self, w: f64, h: f64, eps: f64) -> bool {
        self.min_x >= -eps && self.min_y >= -eps && self.max_x <= w + eps && self.max_y <= h + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, s: f64) -> Ring {
        vec![
            Point::new(x, y),
            Point::new(x + s, y),
            Point::new(x + s, y + s),
            Point::new(x, y + s),
        ]
    }

    #[test]
    fn area_subtracts_holes() {
        let shape = Shape::new(vec![Polygon::with_holes(
            square(0.0, 0.0, 10.0),
            [square(2.0, 2.0, 4.0)],
        )]);
        assert!((shape.area() - 84.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_all_polygons() {
        let shape = Shape::new(vec![
            Polygon::new(square(0.0, 0.0, 5.0)),
            Polygon::new(square(20.0, 30.0, 5.0)),
        ]);
        let b = shape.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 0.0, 25.0, 35.0));
        assert!(b.within(25.0, 35.0, 0.0));
        assert!(!b.within(24.0, 35.0, 0.5));
    }

    #[test]
    fn empty_shape_has_no_bounds() {
        assert!(Shape::empty().is_empty());
        assert!(Shape::empty().bounds().is_none());
        assert_eq!(Shape::empty().area(), 0.0);
    }

    #[test]
    fn contains_point_respects_holes() {
        let shape = Shape::new(vec![Polygon::with_holes(
            square(0.0, 0.0, 10.0),
            [square(2.0, 2.0, 4.0)],
        )]);
        assert!(shape.contains_point(Point::new(1.0, 1.0)));
        assert!(!shape.contains_point(Point::new(4.0, 4.0)));
        assert!(!shape.contains_point(Point::new(11.0, 1.0)));
    }
}
