//! Hit testing: assembly canvas point → instance lookup.
//!
//! Instances are painted in list order, so the walk goes in reverse to find
//! the topmost one. The test runs against the actual (possibly holed) tile
//! shape, not its bounding box.

use crate::transform::{instance_transform, to_tile_space};
use tessel_core::{InstanceId, Point};
use tessel_editor::EditorState;

/// Find the topmost instance whose tile covers `(px, py)`.
/// Returns `None` over empty canvas or inside a hole.
pub fn hit_test_instance(state: &EditorState, px: f64, py: f64) -> Option<InstanceId> {
    let p = Point::new(px, py);
    for inst in state.instances.iter().rev() {
        let t = instance_transform(inst, state.tile_width, state.tile_height);
        if let Some(local) = to_tile_space(t, p)
            && state.tile.contains_point(local)
        {
            return Some(inst.id);
        }
    }
    None
}
