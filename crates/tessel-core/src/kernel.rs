//! Geometry kernel: polygon boolean operations with tile-bounds clipping.
//!
//! The boolean provider is `geo::BooleanOps`. Every operation has two forms:
//!
//! - `try_*` returns `Result<Shape, GeometryError>` and never falls back.
//! - The plain form applies the fail-soft policy: a failed operation logs a
//!   warning and hands back its left operand unchanged, so the tile is
//!   always left renderable.
//!
//! Results of `union`, `difference` and `intersect` are always piped through
//! `clip_to_bounds`.

use crate::model::{Point, Polygon, Ring, Shape};
use geo::{BooleanOps, Coord, LineString, MultiPolygon};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Draft rings whose endpoints are farther apart than this get closed.
pub const CLOSE_TOLERANCE: f64 = 1e-6;

/// The set operation handed to the boolean provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    Difference,
    Intersection,
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SetOp::Union => "union",
            SetOp::Difference => "difference",
            SetOp::Intersection => "intersection",
        })
    }
}

/// Why a geometry computation produced no usable shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{op}: operand contains a non-finite coordinate")]
    NonFiniteInput { op: SetOp },
    #[error("{op}: boolean provider failed: {reason}")]
    Provider { op: SetOp, reason: String },
    #[error("{op}: boolean provider returned a non-finite coordinate")]
    NonFiniteOutput { op: SetOp },
}

// ─── Constructors ────────────────────────────────────────────────────────

/// Axis-aligned rectangle `(0,0)-(w,0)-(w,h)-(0,h)`.
pub fn rectangle(w: f64, h: f64) -> Shape {
    Shape::new(vec![Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ])])
}

/// Close a point list into a ring by re-appending the first point, unless
/// it is already closed within `CLOSE_TOLERANCE`.
pub fn close_ring(points: &[Point]) -> Ring {
    let mut ring = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last())
        && points.len() > 1
        && first.distance(last) > CLOSE_TOLERANCE
    {
        ring.push(*first);
    }
    ring
}

/// Wrap a point list as a one-polygon, hole-free shape with a closed ring.
pub fn points_to_shape(points: &[Point]) -> Shape {
    if points.is_empty() {
        return Shape::empty();
    }
    Shape::new(vec![Polygon::new(close_ring(points))])
}

/// Offset every point of every ring.
pub fn translate(shape: &Shape, dx: f64, dy: f64) -> Shape {
    let shift = |ring: &Ring| -> Ring { ring.iter().map(|p| p.offset(dx, dy)).collect() };
    Shape::new(
        shape
            .polygons
            .iter()
            .map(|poly| Polygon::with_holes(shift(&poly.exterior), poly.holes.iter().map(shift)))
            .collect(),
    )
}

// ─── Boolean operations ──────────────────────────────────────────────────

/// Run one boolean operation through the provider, without clipping.
pub fn try_boolean(op: SetOp, a: &Shape, b: &Shape) -> Result<Shape, GeometryError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(GeometryError::NonFiniteInput { op });
    }
    let ga = to_geo(a);
    let gb = to_geo(b);

    // Older sweep-line implementations panic on degenerate input; a panic
    // here must not take the editor down with it.
    let result = panic::catch_unwind(AssertUnwindSafe(|| match op {
        SetOp::Union => ga.union(&gb),
        SetOp::Difference => ga.difference(&gb),
        SetOp::Intersection => ga.intersection(&gb),
    }))
    .map_err(|payload| GeometryError::Provider {
        op,
        reason: panic_reason(payload.as_ref()),
    })?;

    let shape = from_geo(&result);
    if !shape.is_finite() {
        return Err(GeometryError::NonFiniteOutput { op });
    }
    Ok(shape)
}

/// Intersect `shape` with the tile rectangle.
pub fn try_clip_to_bounds(shape: &Shape, w: f64, h: f64) -> Result<Shape, GeometryError> {
    try_boolean(SetOp::Intersection, shape, &rectangle(w, h))
}

/// Fail-soft clip: an empty intersection yields the empty shape, a failed
/// computation yields `shape` unchanged.
pub fn clip_to_bounds(shape: &Shape, w: f64, h: f64) -> Shape {
    match try_clip_to_bounds(shape, w, h) {
        Ok(clipped) => {
            if clipped.is_empty() && !shape.is_empty() {
                log::debug!("clip to {w}x{h} removed the whole shape");
            }
            clipped
        }
        Err(e) => {
            log::warn!("clip to {w}x{h} failed, keeping input: {e}");
            shape.clone()
        }
    }
}

fn try_clipped(op: SetOp, a: &Shape, b: &Shape, w: f64, h: f64) -> Result<Shape, GeometryError> {
    try_boolean(op, a, b).map(|raw| clip_to_bounds(&raw, w, h))
}

fn fail_soft(op: SetOp, a: &Shape, b: &Shape, w: f64, h: f64) -> Shape {
    try_clipped(op, a, b, w, h).unwrap_or_else(|e| {
        log::warn!("{e}; keeping left operand");
        a.clone()
    })
}

pub fn try_union(a: &Shape, b: &Shape, w: f64, h: f64) -> Result<Shape, GeometryError> {
    try_clipped(SetOp::Union, a, b, w, h)
}

pub fn try_difference(a: &Shape, b: &Shape, w: f64, h: f64) -> Result<Shape, GeometryError> {
    try_clipped(SetOp::Difference, a, b, w, h)
}

pub fn try_intersect(a: &Shape, b: &Shape, w: f64, h: f64) -> Result<Shape, GeometryError> {
    try_clipped(SetOp::Intersection, a, b, w, h)
}

/// `a ∪ b`, clipped to `[0,w] × [0,h]`. Falls back to `a` on failure.
pub fn union(a: &Shape, b: &Shape, w: f64, h: f64) -> Shape {
    fail_soft(SetOp::Union, a, b, w, h)
}

/// `a − b`, clipped to `[0,w] × [0,h]`. Falls back to `a` on failure.
pub fn difference(a: &Shape, b: &Shape, w: f64, h: f64) -> Shape {
    fail_soft(SetOp::Difference, a, b, w, h)
}

/// `a ∩ b`, clipped to `[0,w] × [0,h]`. Falls back to `a` on failure.
pub fn intersect(a: &Shape, b: &Shape, w: f64, h: f64) -> Shape {
    fail_soft(SetOp::Intersection, a, b, w, h)
}

// ─── geo conversion ──────────────────────────────────────────────────────

fn ring_to_geo(ring: &Ring) -> LineString<f64> {
    LineString::new(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn ring_from_geo(ls: &LineString<f64>) -> Ring {
    ls.coords().map(|c| Point::new(c.x, c.y)).collect()
}

/// Convert to the provider's multi-polygon. `geo::Polygon::new` closes
/// open rings.
pub(crate) fn to_geo(shape: &Shape) -> MultiPolygon<f64> {
    MultiPolygon::new(
        shape
            .polygons
            .iter()
            .filter(|p| !p.exterior.is_empty())
            .map(|p| {
                geo::Polygon::new(
                    ring_to_geo(&p.exterior),
                    p.holes.iter().map(ring_to_geo).collect(),
                )
            })
            .collect(),
    )
}

pub(crate) fn from_geo(mp: &MultiPolygon<f64>) -> Shape {
    Shape::new(
        mp.0.iter()
            .map(|p| {
                Polygon::with_holes(
                    ring_from_geo(p.exterior()),
                    p.interiors().iter().map(ring_from_geo),
                )
            })
            .collect(),
    )
}

fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
