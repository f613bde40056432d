//! Editor actions and the reducer.
//!
//! `reduce` is the single `(state, action) -> state` transition used by the
//! editor. It returns `None` when the action changes nothing, so no-op
//! actions never create history entries.

use crate::mutation;
use crate::placement;
use crate::state::{BooleanOp, EditorState, Mode, SlideDirection};
use tessel_core::{EditorConfig, InstanceId, Point};

/// Every state change the editor supports.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Settings ──
    SetMode(Mode),
    SetSnap(bool),
    SetGridSize(f64),

    // ── Draft ──
    AddDraftPoint(Point),
    CloseDraft,
    ClearDraft,

    // ── Tile ──
    ApplyBoolean(BooleanOp),
    ApplyCutSlide(SlideDirection),
    /// Run whatever operation the current mode is bound to.
    ApplyCurrentMode,
    ResetTile,
    SetTileSize { width: f64, height: f64 },

    // ── Assembly ──
    AddInstance { rotation: f64 },
    RemoveInstance(InstanceId),
    ClearInstances,
    MoveInstance { id: InstanceId, x: f64, y: f64 },
}

impl Action {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Action::SetMode(_) => "set mode",
            Action::SetSnap(_) => "set snap",
            Action::SetGridSize(_) => "set grid size",
            Action::AddDraftPoint(_) => "add draft point",
            Action::CloseDraft => "close draft",
            Action::ClearDraft => "clear draft",
            Action::ApplyBoolean(BooleanOp::Add) => "boolean add",
            Action::ApplyBoolean(BooleanOp::Subtract) => "boolean subtract",
            Action::ApplyCutSlide(_) => "cut & slide",
            Action::ApplyCurrentMode => "apply",
            Action::ResetTile => "reset tile",
            Action::SetTileSize { .. } => "set tile size",
            Action::AddInstance { .. } => "add instance",
            Action::RemoveInstance(_) => "remove instance",
            Action::ClearInstances => "clear instances",
            Action::MoveInstance { .. } => "move instance",
        }
    }
}

/// Apply `action` to `state`. `None` means nothing changed.
pub fn reduce(state: &EditorState, action: &Action, config: &EditorConfig) -> Option<EditorState> {
    match *action {
        Action::SetMode(mode) => mutation::set_mode(state, mode),
        Action::SetSnap(snap) => mutation::set_snap(state, snap),
        Action::SetGridSize(size) => mutation::set_grid_size(state, size),

        Action::AddDraftPoint(p) => mutation::add_draft_point(state, p, config),
        Action::CloseDraft => mutation::close_draft(state),
        Action::ClearDraft => mutation::clear_draft(state),

        Action::ApplyBoolean(op) => mutation::apply_boolean(state, op),
        Action::ApplyCutSlide(direction) => mutation::apply_cut_slide(state, direction),
        Action::ApplyCurrentMode => mutation::apply_current_mode(state),
        Action::ResetTile => Some(mutation::reset_tile(state)),
        Action::SetTileSize { width, height } => {
            mutation::set_tile_size(state, width, height, config)
        }

        Action::AddInstance { rotation } => Some(placement::add_instance(state, rotation, config)),
        Action::RemoveInstance(id) => placement::remove_instance(state, id),
        Action::ClearInstances => placement::clear_instances(state),
        Action::MoveInstance { id, x, y } => placement::move_instance(state, id, x, y),
    }
}
