//! Tool system for canvas interactions.
//!
//! Each tool translates pointer events into `Gesture`s that the editor
//! applies. The tool in charge follows the interaction mode: `select` uses
//! the arrange tool on the assembly canvas, every other mode uses the draft
//! tool on the tile canvas.

use crate::action::Action;
use crate::input::InputEvent;
use tessel_core::{InstanceId, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Arrange,
    Draft,
}

/// What a tool asks the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    /// A one-shot edit, committed as its own undo step.
    Edit(Action),
    DragStart { id: InstanceId, pointer: Point },
    DragMove { pointer: Point },
    DragEnd,
}

/// Trait for tools that handle input and produce gestures.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event. `hit` is the instance under the pointer on
    /// the assembly canvas, if any.
    fn handle(&mut self, event: &InputEvent, hit: Option<InstanceId>) -> Vec<Gesture>;
}

// ─── Arrange Tool ────────────────────────────────────────────────────────

/// Drags placed instances around the assembly canvas.
///
/// The tool keeps no grab state of its own. Moves and releases always
/// become `DragMove`/`DragEnd`; the editor owns the drag and ignores them
/// when nothing is held.
#[derive(Debug, Default)]
pub struct ArrangeTool;

impl ArrangeTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for ArrangeTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Arrange
    }

    fn handle(&mut self, event: &InputEvent, hit: Option<InstanceId>) -> Vec<Gesture> {
        match event {
            InputEvent::PointerDown { x, y, .. } => match hit {
                Some(id) => vec![Gesture::DragStart {
                    id,
                    pointer: Point::new(*x, *y),
                }],
                None => vec![],
            },
            InputEvent::PointerMove { x, y, .. } => vec![Gesture::DragMove {
                pointer: Point::new(*x, *y),
            }],
            InputEvent::PointerUp { .. } => vec![Gesture::DragEnd],
            InputEvent::Key { .. } => vec![],
        }
    }
}

// ─── Draft Tool ──────────────────────────────────────────────────────────

/// Click-to-place polygon drawing on the tile canvas.
#[derive(Debug, Default)]
pub struct DraftTool;

impl DraftTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for DraftTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Draft
    }

    fn handle(&mut self, event: &InputEvent, _hit: Option<InstanceId>) -> Vec<Gesture> {
        match event {
            InputEvent::PointerDown { x, y, .. } => {
                vec![Gesture::Edit(Action::AddDraftPoint(Point::new(*x, *y)))]
            }
            _ => vec![],
        }
    }
}
