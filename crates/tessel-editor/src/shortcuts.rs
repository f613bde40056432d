//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Whether an
//! action applies in the current state (e.g. closing a draft outside draw
//! mode) is decided by the editor, not here.

use crate::input::Modifiers;
use crate::state::Mode;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── History ──
    Undo,
    Redo,
    /// Drop everything and start a fresh session.
    ResetAll,

    // ── Draft ──
    CloseDraft,
    ClearDraft,
    ApplyDraft,

    // ── Modes ──
    SetMode(Mode),
    ToggleSnap,

    // ── Assembly ──
    AddInstance,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` plays the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Enter"`).
    /// Returns `None` if the key combo has no binding. Alt is ignored.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let cmd = modifiers.command();
        let shift = modifiers.shift;

        // ── Modifier combos first (most specific) ──
        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                "Backspace" | "Delete" => Some(ShortcutAction::ResetAll),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                "Enter" => Some(ShortcutAction::ApplyDraft),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        // ── Single keys (no modifiers) ──
        match key {
            "Enter" => Some(ShortcutAction::CloseDraft),
            "Escape" => Some(ShortcutAction::ClearDraft),
            "v" | "V" => Some(ShortcutAction::SetMode(Mode::Select)),
            "d" | "D" => Some(ShortcutAction::SetMode(Mode::Draw)),
            "a" | "A" => Some(ShortcutAction::SetMode(Mode::BooleanAdd)),
            "s" | "S" => Some(ShortcutAction::SetMode(Mode::BooleanSub)),
            "1" => Some(ShortcutAction::SetMode(Mode::CutSlideLR)),
            "2" => Some(ShortcutAction::SetMode(Mode::CutSlideRL)),
            "3" => Some(ShortcutAction::SetMode(Mode::CutSlideTB)),
            "4" => Some(ShortcutAction::SetMode(Mode::CutSlideBT)),
            "g" | "G" => Some(ShortcutAction::ToggleSnap),
            "n" | "N" => Some(ShortcutAction::AddInstance),
            _ => None,
        }
    }
}

/// Stable name reported back to hosts.
pub fn action_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::ResetAll => "resetAll",
        ShortcutAction::CloseDraft => "closeDraft",
        ShortcutAction::ClearDraft => "clearDraft",
        ShortcutAction::ApplyDraft => "apply",
        ShortcutAction::SetMode(_) => "setMode",
        ShortcutAction::ToggleSnap => "toggleSnap",
        ShortcutAction::AddInstance => "addInstance",
    }
}
