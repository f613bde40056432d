//! Editor state: the unit of undo/redo.
//!
//! `EditorState` is a plain value. Every edit produces a new state from the
//! old one; the history keeps whole snapshots. The tile shape sits behind an
//! `Arc` because it is only ever replaced, never edited in place, so
//! snapshots share it for free.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tessel_core::kernel::{self, CLOSE_TOLERANCE};
use tessel_core::{EditorConfig, InstanceId, Point, Shape};

// ─── Interaction mode ────────────────────────────────────────────────────

/// What a click on the tile canvas does, and which operation "apply" runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    #[default]
    Select,
    Draw,
    CutSlideLR,
    CutSlideRL,
    CutSlideTB,
    CutSlideBT,
    BooleanAdd,
    BooleanSub,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::Select,
        Mode::Draw,
        Mode::CutSlideLR,
        Mode::CutSlideRL,
        Mode::CutSlideTB,
        Mode::CutSlideBT,
        Mode::BooleanAdd,
        Mode::BooleanSub,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Select => "select",
            Mode::Draw => "draw",
            Mode::CutSlideLR => "cutSlideLR",
            Mode::CutSlideRL => "cutSlideRL",
            Mode::CutSlideTB => "cutSlideTB",
            Mode::CutSlideBT => "cutSlideBT",
            Mode::BooleanAdd => "booleanAdd",
            Mode::BooleanSub => "booleanSub",
        }
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Every mode except `Select` places draft points on click.
    pub fn is_drawing(self) -> bool {
        self != Mode::Select
    }

    /// The tile operation "apply" runs in this mode.
    pub fn operation(self) -> Option<TileOp> {
        match self {
            Mode::Select | Mode::Draw => None,
            Mode::CutSlideLR => Some(TileOp::CutSlide(SlideDirection::LeftToRight)),
            Mode::CutSlideRL => Some(TileOp::CutSlide(SlideDirection::RightToLeft)),
            Mode::CutSlideTB => Some(TileOp::CutSlide(SlideDirection::TopToBottom)),
            Mode::CutSlideBT => Some(TileOp::CutSlide(SlideDirection::BottomToTop)),
            Mode::BooleanAdd => Some(TileOp::Boolean(BooleanOp::Add)),
            Mode::BooleanSub => Some(TileOp::Boolean(BooleanOp::Subtract)),
        }
    }
}

// ─── Tile operations ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Add,
    Subtract,
}

/// Direction a cut piece travels: one full tile period toward the
/// opposite edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl SlideDirection {
    /// Translation for a `w × h` tile.
    pub fn offset(self, w: f64, h: f64) -> (f64, f64) {
        match self {
            SlideDirection::LeftToRight => (w, 0.0),
            SlideDirection::RightToLeft => (-w, 0.0),
            SlideDirection::TopToBottom => (0.0, h),
            SlideDirection::BottomToTop => (0.0, -h),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileOp {
    Boolean(BooleanOp),
    CutSlide(SlideDirection),
}

// ─── Instances ───────────────────────────────────────────────────────────

/// A placed copy of the tile on the assembly canvas. Carries no geometry:
/// it always renders the current tile shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub id: InstanceId,
    pub x: f64,
    pub y: f64,
    /// Degrees, clockwise, about the tile centre. In `[0, 360)`.
    pub rotation: f64,
}

impl TileInstance {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ─── Editor state ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub tile_width: f64,
    pub tile_height: f64,
    /// Always inside `[0,tile_width] × [0,tile_height]`.
    pub tile: Arc<Shape>,
    /// Points of the polygon being drawn.
    pub draft: Vec<Point>,
    pub mode: Mode,
    pub snap: bool,
    pub grid_size: f64,
    pub instances: Vec<TileInstance>,
}

impl EditorState {
    /// Fresh session state: a full rectangular tile, no draft, no instances.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            tile_width: config.tile_width,
            tile_height: config.tile_height,
            tile: Arc::new(kernel::rectangle(config.tile_width, config.tile_height)),
            draft: Vec::new(),
            mode: Mode::default(),
            snap: config.snap,
            grid_size: config.grid_size,
            instances: Vec::new(),
        }
    }

    /// A draft needs three points before it can be applied.
    pub fn draft_is_usable(&self) -> bool {
        self.draft.len() >= 3
    }

    /// Whether the draft has been explicitly closed (first point repeated).
    pub fn draft_is_closed(&self) -> bool {
        match (self.draft.first(), self.draft.last()) {
            (Some(first), Some(last)) => {
                self.draft.len() >= 4 && first.distance(last) <= CLOSE_TOLERANCE
            }
            _ => false,
        }
    }

    pub fn instance(&self, id: InstanceId) -> Option<&TileInstance> {
        self.instances.iter().find(|i| i.id == id)
    }
}
