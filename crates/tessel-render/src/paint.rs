//! Editor state → Vello drawing commands.
//!
//! Two scenes: the tile editing canvas (tile, bounds, draft) and the
//! assembly canvas (grid plus every instance rendering the current tile).

use crate::canvas::{AssemblyCanvas, Theme};
use crate::transform::{instance_transform, polyline, shape_to_bez_path};
use kurbo::{Affine, Circle, Line, Rect, Stroke};
use peniko::Fill;
use tessel_editor::EditorState;
use vello::Scene;

const OUTLINE_WIDTH: f64 = 1.5;
const GRID_WIDTH: f64 = 1.0;
const VERTEX_RADIUS: f64 = 3.0;

/// Paint the tile editing canvas.
///
/// Call once per frame with a freshly-cleared `Scene`. `scale` maps tile
/// units to device pixels.
pub fn paint_tile(scene: &mut Scene, state: &EditorState, theme: &Theme, scale: f64) {
    let view = Affine::scale(scale);
    let (w, h) = (state.tile_width, state.tile_height);

    scene.fill(
        Fill::NonZero,
        view,
        theme.background.to_peniko(),
        None,
        &Rect::new(0.0, 0.0, w, h),
    );
    paint_grid(scene, view, w, h, state.grid_size, theme);

    let path = shape_to_bez_path(&state.tile);
    scene.fill(Fill::EvenOdd, view, theme.tile_fill.to_peniko(), None, &path);
    scene.stroke(
        &Stroke::new(OUTLINE_WIDTH / scale),
        view,
        theme.tile_stroke.to_peniko(),
        None,
        &path,
    );
    scene.stroke(
        &Stroke::new(GRID_WIDTH / scale),
        view,
        theme.bounds_stroke.to_peniko(),
        None,
        &Rect::new(0.0, 0.0, w, h),
    );

    if !state.draft.is_empty() {
        log::trace!("draft: {} points", state.draft.len());
        scene.stroke(
            &Stroke::new(OUTLINE_WIDTH / scale),
            view,
            theme.draft_stroke.to_peniko(),
            None,
            &polyline(&state.draft),
        );
        for p in &state.draft {
            let dot = Circle::new((p.x, p.y), VERTEX_RADIUS / scale);
            scene.fill(Fill::NonZero, view, theme.draft_vertex.to_peniko(), None, &dot);
        }
    }
}

/// Paint the assembly canvas: background, reference grid, then instances
/// in list order (last on top).
pub fn paint_assembly(scene: &mut Scene, state: &EditorState, canvas: &AssemblyCanvas, theme: &Theme) {
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        theme.background.to_peniko(),
        None,
        &Rect::new(0.0, 0.0, canvas.width, canvas.height),
    );
    paint_grid(scene, Affine::IDENTITY, canvas.width, canvas.height, state.grid_size, theme);

    if state.tile.is_empty() {
        return;
    }
    let path = shape_to_bez_path(&state.tile);
    for inst in &state.instances {
        let t = instance_transform(inst, state.tile_width, state.tile_height);
        scene.fill(Fill::EvenOdd, t, theme.tile_fill.to_peniko(), None, &path);
        scene.stroke(
            &Stroke::new(OUTLINE_WIDTH),
            t,
            theme.tile_stroke.to_peniko(),
            None,
            &path,
        );
    }
}

fn paint_grid(scene: &mut Scene, view: Affine, w: f64, h: f64, spacing: f64, theme: &Theme) {
    let (xs, ys) = AssemblyCanvas::new(w, h).grid_lines(spacing);
    let color = theme.grid.to_peniko();
    let stroke = Stroke::new(GRID_WIDTH);
    for x in xs {
        scene.stroke(&stroke, view, color, None, &Line::new((x, 0.0), (x, h)));
    }
    for y in ys {
        scene.stroke(&stroke, view, color, None, &Line::new((0.0, y), (w, y)));
    }
}
