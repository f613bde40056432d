//! The editor: history, drag state, tools and config behind one handle.
//!
//! All state changes flow through `dispatch` (one undo step each) or
//! through a drag gesture (one undo step per gesture). A held drag is
//! released before any other edit lands, so gestures never absorb
//! unrelated steps. Hosts feed pointer and key events in and read
//! `state()` back for rendering.

use crate::action::{Action, reduce};
use crate::history::History;
use crate::input::{InputEvent, Modifiers};
use crate::placement::DragController;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::state::EditorState;
use crate::tools::{ArrangeTool, DraftTool, Gesture, Tool, ToolKind};
use tessel_core::{EditorConfig, InstanceId, Point};

pub struct Editor {
    history: History<EditorState>,
    drag: DragController,
    arrange_tool: ArrangeTool,
    draft_tool: DraftTool,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(mut config: EditorConfig) -> Self {
        config.normalize();
        let initial = EditorState::new(&config);
        Self {
            history: History::new(initial, config.history_depth),
            drag: DragController::new(),
            arrange_tool: ArrangeTool::new(),
            draft_tool: DraftTool::new(),
            config,
        }
    }

    pub fn state(&self) -> &EditorState {
        self.history.current()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History<EditorState> {
        &self.history
    }

    /// Apply one action. Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match reduce(self.state(), &action, &self.config) {
            Some(next) => {
                log::debug!("{}", action.label());
                self.end_drag();
                self.history.commit(next);
                true
            }
            None => {
                log::trace!("{}: no-op", action.label());
                false
            }
        }
    }

    pub fn undo(&mut self) -> bool {
        self.drag.end();
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.drag.end();
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Start over: fresh state from config, empty history.
    pub fn reset_all(&mut self) {
        self.drag.end();
        self.history.reset_history(EditorState::new(&self.config));
        log::debug!("reset all");
    }

    // ─── Drag ────────────────────────────────────────────────────────────

    /// Grab an instance. Does nothing for an unknown id. A grab that is
    /// still held (its release never arrived) is ended first.
    pub fn begin_drag(&mut self, id: InstanceId, pointer: Point) -> bool {
        if self.state().instance(id).is_none() {
            return false;
        }
        if self.end_drag() {
            log::debug!("drag on {id} replaced a stale grab");
        }
        if self.drag.begin(self.history.current(), id, pointer) {
            self.history.begin_batch();
            true
        } else {
            false
        }
    }

    /// Move the held instance. Returns `true` if it moved.
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        match self.drag.update(self.history.current(), pointer) {
            Some(next) => {
                self.history.commit(next);
                true
            }
            None => false,
        }
    }

    /// Release the held instance; the whole gesture becomes one undo step.
    pub fn end_drag(&mut self) -> bool {
        if self.drag.end() {
            self.history.end_batch();
            true
        } else {
            false
        }
    }

    pub fn dragged_instance(&self) -> Option<InstanceId> {
        self.drag.dragged()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// The tool that pointer events go to right now.
    pub fn active_tool(&self) -> ToolKind {
        if self.pointer_goes_to_arrange() {
            self.arrange_tool.kind()
        } else {
            self.draft_tool.kind()
        }
    }

    fn pointer_goes_to_arrange(&self) -> bool {
        self.drag.is_active() || !self.state().mode.is_drawing()
    }

    /// Handle a pointer or key event. `hit` is the instance under the
    /// pointer on the assembly canvas. Returns `true` if the state changed.
    pub fn handle_input(&mut self, event: &InputEvent, hit: Option<InstanceId>) -> bool {
        if let InputEvent::Key { key, modifiers } = event {
            return self.handle_key(key, *modifiers).is_some_and(|(_, changed)| changed);
        }
        let tool: &mut dyn Tool = if self.pointer_goes_to_arrange() {
            &mut self.arrange_tool
        } else {
            &mut self.draft_tool
        };
        let gestures = tool.handle(event, hit);
        let mut changed = false;
        for gesture in gestures {
            changed |= match gesture {
                Gesture::Edit(action) => self.dispatch(action),
                Gesture::DragStart { id, pointer } => {
                    self.begin_drag(id, pointer);
                    false
                }
                Gesture::DragMove { pointer } => self.update_drag(pointer),
                Gesture::DragEnd => {
                    self.end_drag();
                    false
                }
            };
        }
        changed
    }

    /// Resolve and run a keyboard shortcut. Returns the action and whether
    /// the state changed, or `None` if the key is unbound.
    pub fn handle_key(&mut self, key: &str, m: Modifiers) -> Option<(ShortcutAction, bool)> {
        let action = ShortcutMap::resolve(key, m)?;
        Some((action, self.apply_shortcut(action)))
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::ResetAll => {
                self.reset_all();
                true
            }
            ShortcutAction::CloseDraft => {
                // Only while drawing; Enter means nothing in select mode.
                let state = self.state();
                if state.mode.is_drawing() && state.draft_is_usable() {
                    self.dispatch(Action::CloseDraft)
                } else {
                    false
                }
            }
            ShortcutAction::ClearDraft => self.dispatch(Action::ClearDraft),
            ShortcutAction::ApplyDraft => self.dispatch(Action::ApplyCurrentMode),
            ShortcutAction::SetMode(mode) => self.dispatch(Action::SetMode(mode)),
            ShortcutAction::ToggleSnap => {
                let snap = !self.state().snap;
                self.dispatch(Action::SetSnap(snap))
            }
            ShortcutAction::AddInstance => self.dispatch(Action::AddInstance { rotation: 0.0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Mode;

    fn click(editor: &mut Editor, x: f64, y: f64) -> bool {
        editor.handle_input(&InputEvent::pointer_down(x, y, Modifiers::default()), None)
    }

    #[test]
    fn clicks_only_draw_in_drawing_modes() {
        let mut editor = Editor::default();
        assert!(!click(&mut editor, 10.0, 10.0));
        assert!(editor.state().draft.is_empty());

        editor.dispatch(Action::SetMode(Mode::Draw));
        assert!(click(&mut editor, 10.0, 10.0));
        assert_eq!(editor.state().draft, vec![Point::new(10.0, 10.0)]);
    }

    #[test]
    fn enter_closes_only_when_drawing_with_three_points() {
        let mut editor = Editor::default();
        let enter = InputEvent::Key {
            key: "Enter".into(),
            modifiers: Modifiers::default(),
        };
        editor.dispatch(Action::SetMode(Mode::Draw));
        click(&mut editor, 0.0, 0.0);
        click(&mut editor, 10.0, 0.0);
        assert!(!editor.handle_input(&enter, None));
        click(&mut editor, 10.0, 10.0);
        assert!(editor.handle_input(&enter, None));
        assert!(editor.state().draft_is_closed());

        // Back in select mode Enter does nothing.
        editor.dispatch(Action::ClearDraft);
        editor.dispatch(Action::SetMode(Mode::Select));
        assert!(!editor.handle_input(&enter, None));
    }

    #[test]
    fn no_op_actions_do_not_create_history() {
        let mut editor = Editor::default();
        assert!(!editor.dispatch(Action::ApplyCurrentMode));
        assert!(!editor.dispatch(Action::ClearInstances));
        assert!(!editor.can_undo());
    }

    #[test]
    fn drag_gesture_is_one_undo_step() {
        let mut editor = Editor::default();
        editor.dispatch(Action::AddInstance { rotation: 0.0 });
        let id = editor.state().instances[0].id;
        let m = Modifiers::default();

        editor.handle_input(&InputEvent::pointer_down(40.0, 40.0, m), Some(id));
        assert_eq!(editor.dragged_instance(), Some(id));
        for step in 1..=4 {
            let x = 40.0 + f64::from(step) * 10.0;
            editor.handle_input(&InputEvent::pointer_move(x, 40.0, m), None);
        }
        editor.handle_input(&InputEvent::pointer_up(80.0, 40.0, m), None);
        assert_eq!(editor.state().instances[0].x, 72.0);
        assert_eq!(editor.history().undo_depth(), 2);

        assert!(editor.undo());
        assert_eq!(editor.state().instances[0].x, 32.0);
    }

    #[test]
    fn undo_mid_drag_hands_the_pointer_back() {
        let mut editor = Editor::default();
        editor.dispatch(Action::SetMode(Mode::Draw));
        editor.dispatch(Action::AddInstance { rotation: 0.0 });
        let id = editor.state().instances[0].id;

        assert!(editor.begin_drag(id, Point::new(40.0, 40.0)));
        assert_eq!(editor.active_tool(), ToolKind::Arrange);
        assert!(editor.undo());
        assert_eq!(editor.active_tool(), ToolKind::Draft);
        assert!(click(&mut editor, 16.0, 16.0));
    }

    #[test]
    fn reset_all_clears_history() {
        let mut editor = Editor::default();
        editor.dispatch(Action::AddInstance { rotation: 0.0 });
        editor.apply_shortcut(ShortcutAction::ResetAll);
        assert!(editor.state().instances.is_empty());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
    }

    #[test]
    fn toggle_snap_shortcut() {
        let mut editor = Editor::default();
        let g = editor.handle_key("g", Modifiers::default());
        assert_eq!(g, Some((ShortcutAction::ToggleSnap, true)));
        assert!(editor.state().snap);
        assert_eq!(editor.handle_key("q", Modifiers::default()), None);
    }
}
