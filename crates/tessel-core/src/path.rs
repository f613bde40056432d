//! Shape → SVG path data.
//!
//! Each ring becomes one closed subpath (`M … L … Z`); all rings of all
//! polygons are concatenated into one compound path. Holes come out of the
//! boolean kernel wound opposite to their exterior, so the path renders
//! correctly under either fill rule. Renderers here use `evenodd`.

use crate::model::{Point, Ring, Shape};
use std::fmt::Write;

/// Render a shape as SVG path data. The empty shape yields `""`.
pub fn to_path_data(shape: &Shape) -> String {
    let mut d = String::new();
    for ring in shape.rings() {
        write_ring(&mut d, ring);
    }
    d
}

fn write_ring(d: &mut String, ring: &Ring) {
    let Some(first) = ring.first() else {
        return;
    };
    // Closed rings repeat the first point; `Z` already draws that edge.
    let body = match ring.last() {
        Some(last) if ring.len() > 1 && last == first => &ring[..ring.len() - 1],
        _ => &ring[..],
    };
    push_cmd(d, 'M', first);
    for p in &body[1..] {
        push_cmd(d, 'L', p);
    }
    d.push_str(" Z");
}

fn push_cmd(d: &mut String, cmd: char, p: &Point) {
    if !d.is_empty() {
        d.push(' ');
    }
    let _ = write!(d, "{cmd} {} {}", p.x, p.y);
}
