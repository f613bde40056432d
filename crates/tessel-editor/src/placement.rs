//! Assembly placement: placed tile instances and drag repositioning.
//!
//! Instance list edits are pure transitions like the tile mutations. The
//! drag controller is transient interaction state and is not part of the
//! snapshot: it only remembers which instance is held and where it was
//! grabbed.

use crate::state::{EditorState, TileInstance};
use tessel_core::{EditorConfig, InstanceId, Point, snap_to};

// ─── Instance list ───────────────────────────────────────────────────────

/// Place a new instance at the configured default origin.
pub fn add_instance(state: &EditorState, rotation: f64, config: &EditorConfig) -> EditorState {
    let (x, y) = config.instance_origin;
    let mut next = state.clone();
    next.instances.push(TileInstance {
        id: InstanceId::generate(),
        x,
        y,
        rotation: normalize_degrees(rotation),
    });
    next
}

pub fn remove_instance(state: &EditorState, id: InstanceId) -> Option<EditorState> {
    state.instance(id)?;
    let mut next = state.clone();
    next.instances.retain(|i| i.id != id);
    Some(next)
}

pub fn clear_instances(state: &EditorState) -> Option<EditorState> {
    if state.instances.is_empty() {
        return None;
    }
    let mut next = state.clone();
    next.instances.clear();
    Some(next)
}

/// Move one instance's origin. `None` if the instance is unknown or already
/// there.
pub fn move_instance(state: &EditorState, id: InstanceId, x: f64, y: f64) -> Option<EditorState> {
    let current = state.instance(id)?;
    if current.x == x && current.y == y {
        return None;
    }
    let mut next = state.clone();
    for inst in next.instances.iter_mut().filter(|i| i.id == id) {
        inst.x = x;
        inst.y = y;
    }
    Some(next)
}

fn normalize_degrees(deg: f64) -> f64 {
    if deg.is_finite() { deg.rem_euclid(360.0) } else { 0.0 }
}

// ─── Drag ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    id: InstanceId,
    /// Pointer position minus instance origin at grab time.
    offset_x: f64,
    offset_y: f64,
}

/// Tracks the instance being dragged, if any.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn dragged(&self) -> Option<InstanceId> {
        self.active.map(|d| d.id)
    }

    /// Grab `id` at `pointer`. Returns `false` (and does nothing) if the id
    /// does not resolve to a placed instance.
    pub fn begin(&mut self, state: &EditorState, id: InstanceId, pointer: Point) -> bool {
        let Some(inst) = state.instance(id) else {
            log::debug!("drag: no instance {id}");
            return false;
        };
        self.active = Some(ActiveDrag {
            id,
            offset_x: pointer.x - inst.x,
            offset_y: pointer.y - inst.y,
        });
        true
    }

    /// Compute the state with the held instance moved under `pointer`.
    /// With snapping on, the origin rounds to multiples of the tile size.
    pub fn update(&self, state: &EditorState, pointer: Point) -> Option<EditorState> {
        let drag = self.active?;
        let mut x = pointer.x - drag.offset_x;
        let mut y = pointer.y - drag.offset_y;
        if state.snap {
            x = snap_to(x, state.tile_width);
            y = snap_to(y, state.tile_height);
        }
        move_instance(state, drag.id, x, y)
    }

    /// Release. Idempotent; returns whether a drag was active.
    pub fn end(&mut self) -> bool {
        self.active.take().is_some()
    }
}
