//! WASM bridge for Tessel: exposes the tile editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns two
//! `<canvas>` elements: the tile canvas (drawing) and the assembly canvas
//! (placing instances). Pointer events from each are routed to the matching
//! tool; everything else goes through `TessCanvas` methods.

mod render2d;

use serde::Serialize;
use tessel_core::{EditorConfig, InstanceId, Point};
use tessel_editor::input::{InputEvent, Modifiers};
use tessel_editor::shortcuts::action_name;
use tessel_editor::tools::ToolKind;
use tessel_editor::{Action, BooleanOp, Editor, Mode, SlideDirection};
use tessel_render::{AssemblyCanvas, Theme};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing editor controller.
///
/// Holds the editor (state, history, tools) and view settings. All
/// interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct TessCanvas {
    editor: Editor,
    canvas: AssemblyCanvas,
    /// Tile canvas pixels per tile unit.
    tile_scale: f64,
    theme: Theme,
}

/// Result of a key press, reported back to the page as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyOutcome<'a> {
    changed: bool,
    action: &'a str,
    mode: &'a str,
}

#[wasm_bindgen]
impl TessCanvas {
    /// Create a controller from a (possibly empty or partial) JSON config.
    /// A malformed config is logged and replaced by defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();

        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json).unwrap_or_else(|err| {
                log::warn!("{err}; using defaults");
                EditorConfig::default()
            })
        };
        Self {
            canvas: AssemblyCanvas::from_config(&config),
            editor: Editor::new(config),
            tile_scale: 2.0,
            theme: Theme::light(),
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn render_tile(&self, ctx: &CanvasRenderingContext2d) {
        let theme = self.theme();
        if let Err(err) = render2d::render_tile(ctx, self.editor.state(), &theme, self.tile_scale) {
            log::error!("render_tile: {err:?}");
        }
    }

    pub fn render_assembly(&self, ctx: &CanvasRenderingContext2d) {
        let dragged = self.editor.dragged_instance();
        if let Err(err) =
            render2d::render_assembly(ctx, self.editor.state(), &self.canvas, &self.theme(), dragged)
        {
            log::error!("render_assembly: {err:?}");
        }
    }

    /// Set the canvas theme by name: `"light"` or `"dark"`. Unknown names
    /// select light.
    pub fn set_theme(&mut self, name: &str) {
        self.theme = Theme::from_name(name);
    }

    /// Tile canvas pixels per tile unit. Non-positive values are ignored.
    pub fn set_tile_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.tile_scale = scale;
        }
    }

    /// Pixel size the tile canvas element should have, as `[w, h]`.
    pub fn tile_canvas_size(&self) -> Vec<f64> {
        let state = self.editor.state();
        vec![state.tile_width * self.tile_scale, state.tile_height * self.tile_scale]
    }

    pub fn assembly_canvas_size(&self) -> Vec<f64> {
        vec![self.canvas.width, self.canvas.height]
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer press on the tile canvas, in canvas pixels. Returns true if
    /// the state changed.
    pub fn handle_tile_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        if self.editor.active_tool() != ToolKind::Draft {
            return false;
        }
        let mods = Modifiers { shift, ctrl, alt, meta };
        let (tx, ty) = (x / self.tile_scale, y / self.tile_scale);
        self.editor.handle_input(&InputEvent::pointer_down(tx, ty, mods), None)
    }

    /// Pointer press on the assembly canvas. Grabs the topmost instance
    /// under the pointer, if any. Returns true if a drag started.
    pub fn handle_assembly_pointer_down(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        if self.editor.active_tool() != ToolKind::Arrange {
            return false;
        }
        let mods = Modifiers { shift, ctrl, alt, meta };
        let hit = tessel_render::hit_test_instance(self.editor.state(), x, y);
        self.editor.handle_input(&InputEvent::pointer_down(x, y, mods), hit);
        self.editor.dragged_instance().is_some()
    }

    /// Returns true if an instance moved.
    pub fn handle_assembly_pointer_move(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        if self.editor.active_tool() != ToolKind::Arrange {
            return false;
        }
        let mods = Modifiers { shift, ctrl, alt, meta };
        self.editor.handle_input(&InputEvent::pointer_move(x, y, mods), None)
    }

    /// Returns true if a drag ended.
    pub fn handle_assembly_pointer_up(
        &mut self,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let was_dragging = self.editor.dragged_instance().is_some();
        let mods = Modifiers { shift, ctrl, alt, meta };
        if self.editor.active_tool() == ToolKind::Arrange {
            self.editor.handle_input(&InputEvent::pointer_up(x, y, mods), None);
        }
        was_dragging && self.editor.dragged_instance().is_none()
    }

    /// Id of the instance under an assembly canvas point, or `""`.
    pub fn hit_test(&self, x: f64, y: f64) -> String {
        tessel_render::hit_test_instance(self.editor.state(), x, y)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a key press. Returns JSON:
    /// `{"changed":bool,"action":"<name>","mode":"<mode>"}`.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let mods = Modifiers { shift, ctrl, alt, meta };
        let (action, changed) = match self.editor.handle_key(key, mods) {
            Some((action, changed)) => (action_name(action), changed),
            None => ("none", false),
        };
        let outcome = KeyOutcome {
            changed,
            action,
            mode: self.editor.state().mode.name(),
        };
        serde_json::to_string(&outcome).unwrap_or_else(|_| r#"{"changed":false}"#.to_string())
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Switch interaction mode by name (`"select"`, `"draw"`,
    /// `"cutSlideLR"`, …). Unknown names are ignored.
    pub fn set_mode(&mut self, name: &str) -> bool {
        match Mode::from_name(name) {
            Some(mode) => self.editor.dispatch(Action::SetMode(mode)),
            None => {
                log::debug!("unknown mode {name:?}");
                false
            }
        }
    }

    pub fn get_mode_name(&self) -> String {
        self.editor.state().mode.name().to_string()
    }

    pub fn set_snap(&mut self, snap: bool) -> bool {
        self.editor.dispatch(Action::SetSnap(snap))
    }

    pub fn set_grid_size(&mut self, size: f64) -> bool {
        self.editor.dispatch(Action::SetGridSize(size))
    }

    pub fn set_tile_size(&mut self, width: f64, height: f64) -> bool {
        self.editor.dispatch(Action::SetTileSize { width, height })
    }

    /// Apply the operation bound to the current mode.
    pub fn apply(&mut self) -> bool {
        self.editor.dispatch(Action::ApplyCurrentMode)
    }

    /// `"add"` or `"subtract"`, regardless of mode.
    pub fn apply_boolean(&mut self, op: &str) -> bool {
        let op = match op {
            "add" => BooleanOp::Add,
            "subtract" => BooleanOp::Subtract,
            _ => return false,
        };
        self.editor.dispatch(Action::ApplyBoolean(op))
    }

    /// `"LR"`, `"RL"`, `"TB"` or `"BT"`, regardless of mode.
    pub fn apply_cut_slide(&mut self, direction: &str) -> bool {
        let direction = match direction {
            "LR" => SlideDirection::LeftToRight,
            "RL" => SlideDirection::RightToLeft,
            "TB" => SlideDirection::TopToBottom,
            "BT" => SlideDirection::BottomToTop,
            _ => return false,
        };
        self.editor.dispatch(Action::ApplyCutSlide(direction))
    }

    pub fn add_draft_point(&mut self, x: f64, y: f64) -> bool {
        self.editor.dispatch(Action::AddDraftPoint(Point::new(x, y)))
    }

    pub fn close_draft(&mut self) -> bool {
        self.editor.dispatch(Action::CloseDraft)
    }

    pub fn clear_draft(&mut self) -> bool {
        self.editor.dispatch(Action::ClearDraft)
    }

    pub fn reset_tile(&mut self) -> bool {
        self.editor.dispatch(Action::ResetTile)
    }

    /// Fresh tile, no instances, empty history.
    pub fn reset_all(&mut self) {
        self.editor.reset_all();
    }

    /// Place a new instance. Returns its id.
    pub fn add_instance(&mut self, rotation: f64) -> String {
        self.editor.dispatch(Action::AddInstance { rotation });
        self.editor
            .state()
            .instances
            .last()
            .map(|inst| inst.id.to_string())
            .unwrap_or_default()
    }

    pub fn remove_instance(&mut self, id: &str) -> bool {
        match InstanceId::lookup(id) {
            Some(id) => self.editor.dispatch(Action::RemoveInstance(id)),
            None => false,
        }
    }

    pub fn clear_instances(&mut self) -> bool {
        self.editor.dispatch(Action::ClearInstances)
    }

    // ─── Queries and export ──────────────────────────────────────────────

    /// The whole editor state as JSON, for host UI panels.
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(self.editor.state()).unwrap_or_else(|err| {
            log::error!("state serialization failed: {err}");
            "{}".to_string()
        })
    }

    pub fn get_tile_path_data(&self) -> String {
        tessel_core::to_path_data(&self.editor.state().tile)
    }

    pub fn get_tile_area(&self) -> f64 {
        self.editor.state().tile.area()
    }

    pub fn export_tile_svg(&self) -> String {
        tessel_render::export_tile_svg(self.editor.state(), &self.theme())
    }

    pub fn export_assembly_svg(&self) -> String {
        tessel_render::export_assembly_svg(self.editor.state(), &self.canvas, &self.theme())
    }

    /// Rasterize the assembly canvas to PNG bytes at `scale` pixels per
    /// canvas unit.
    pub fn export_assembly_png(&self, scale: f64) -> Result<js_sys::Uint8Array, JsValue> {
        let state = self.editor.state();
        let pixmap = tessel_render::rasterize_assembly(state, &self.canvas, &self.theme(), scale)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        let bytes = tessel_render::encode_png(&pixmap)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(js_sys::Uint8Array::from(bytes.as_slice()))
    }
}

impl TessCanvas {
    fn theme(&self) -> Theme {
        self.theme
    }
}

/// Validate a config JSON string. Returns `""` when valid, otherwise the
/// error message.
#[wasm_bindgen]
pub fn validate_config(json: &str) -> String {
    match EditorConfig::from_json(json) {
        Ok(_) => String::new(),
        Err(err) => err.to_string(),
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Tessel WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bad_config_falls_back_to_defaults() {
        let canvas = TessCanvas::new("{not json");
        assert_eq!(canvas.tile_canvas_size(), vec![480.0, 320.0]);
        assert_eq!(validate_config("{\"gridSize\": 8}"), "");
        assert!(!validate_config(r#"{"tileWidth": "wide"}"#).is_empty());
    }

    #[test]
    fn partial_config_is_applied() {
        let canvas = TessCanvas::new(r#"{"tileWidth": 300, "canvasWidth": 1200}"#);
        assert_eq!(canvas.tile_canvas_size(), vec![600.0, 320.0]);
        assert_eq!(canvas.assembly_canvas_size(), vec![1200.0, 640.0]);
    }

    #[test]
    fn key_outcome_json() {
        let mut canvas = TessCanvas::new("");
        assert_eq!(
            canvas.handle_key("d", false, false, false, false),
            r#"{"changed":true,"action":"setMode","mode":"draw"}"#
        );
        assert_eq!(
            canvas.handle_key("q", false, false, false, false),
            r#"{"changed":false,"action":"none","mode":"draw"}"#
        );
    }

    #[test]
    fn tile_clicks_are_scaled_and_routed_by_mode() {
        let mut canvas = TessCanvas::new("");
        // Select mode: the tile canvas ignores clicks.
        assert!(!canvas.handle_tile_pointer_down(20.0, 20.0, false, false, false, false));
        canvas.set_mode("draw");
        assert!(canvas.handle_tile_pointer_down(20.0, 40.0, false, false, false, false));
        assert_eq!(canvas.editor.state().draft, vec![Point::new(10.0, 20.0)]);
    }

    #[test]
    fn assembly_drag_round_trip() {
        let mut canvas = TessCanvas::new("");
        let id = canvas.add_instance(0.0);
        assert_eq!(canvas.hit_test(40.0, 40.0), id);
        assert!(canvas.handle_assembly_pointer_down(40.0, 40.0, false, false, false, false));
        assert!(canvas.handle_assembly_pointer_move(140.0, 40.0, false, false, false, false));
        assert!(canvas.handle_assembly_pointer_up(140.0, 40.0, false, false, false, false));
        assert_eq!(canvas.hit_test(40.0, 40.0), "");
        assert!(canvas.undo());
        assert_eq!(canvas.hit_test(40.0, 40.0), id);
    }

    #[test]
    fn theme_is_chosen_by_name() {
        let mut canvas = TessCanvas::new("");
        assert!(canvas.export_assembly_svg().contains("fill=\"#FFFFFF\""));
        canvas.set_theme("dark");
        assert!(canvas.export_assembly_svg().contains("fill=\"#111827\""));
        canvas.set_theme("sepia");
        assert!(canvas.export_assembly_svg().contains("fill=\"#FFFFFF\""));
    }

    #[test]
    fn state_json_uses_camel_case() {
        let mut canvas = TessCanvas::new("");
        canvas.add_instance(90.0);
        let json: serde_json::Value = serde_json::from_str(&canvas.get_state_json()).unwrap();
        assert_eq!(json["tileWidth"], 240.0);
        assert_eq!(json["mode"], "select");
        assert_eq!(json["instances"][0]["rotation"], 90.0);
    }

    #[test]
    fn string_commands() {
        let mut canvas = TessCanvas::new("");
        for (x, y) in [(40.0, 40.0), (120.0, 40.0), (80.0, 120.0)] {
            canvas.add_draft_point(x, y);
        }
        assert!(!canvas.apply_boolean("xor"));
        assert!(canvas.apply_boolean("subtract"));
        assert!(canvas.get_tile_area() < 240.0 * 160.0);
        assert!(!canvas.apply_cut_slide("LR"));
        assert!(!canvas.remove_instance("tile_missing"));
        assert!(!canvas.set_mode("spiral"));
    }
}
