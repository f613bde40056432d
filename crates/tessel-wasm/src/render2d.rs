//! Canvas2D software renderer.
//!
//! Draws the tile editing canvas and the assembly canvas to HTML `<canvas>`
//! elements via `CanvasRenderingContext2d`. Colours come from the shared
//! render theme so the on-screen view matches the exports.

use std::f64::consts::TAU;
use tessel_core::{InstanceId, Point, Shape};
use tessel_editor::EditorState;
use tessel_render::{AssemblyCanvas, Rgba8, Theme, instance_transform};
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule};

const VERTEX_RADIUS: f64 = 3.0;

/// Render the tile editing canvas: grid, tile bounds, tile, draft.
/// `scale` maps tile units to canvas pixels.
pub fn render_tile(
    ctx: &CanvasRenderingContext2d,
    state: &EditorState,
    theme: &Theme,
    scale: f64,
) -> Result<(), JsValue> {
    let (w, h) = (state.tile_width, state.tile_height);
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(&css(theme.background));
    ctx.fill_rect(0.0, 0.0, w * scale, h * scale);

    ctx.save();
    ctx.scale(scale, scale)?;
    draw_grid(ctx, w, h, state.grid_size, theme, 1.0 / scale);

    trace_shape(ctx, &state.tile);
    ctx.set_fill_style_str(&css(theme.tile_fill));
    ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
    ctx.set_stroke_style_str(&css(theme.tile_stroke));
    ctx.set_line_width(1.5 / scale);
    ctx.stroke();

    ctx.set_stroke_style_str(&css(theme.bounds_stroke));
    ctx.set_line_width(1.0 / scale);
    ctx.stroke_rect(0.0, 0.0, w, h);

    draw_draft(ctx, &state.draft, theme, scale)?;
    ctx.restore();
    Ok(())
}

/// Render the assembly canvas: grid, then every instance as the current
/// tile under its placement transform. The dragged instance is outlined in
/// the draft colour.
pub fn render_assembly(
    ctx: &CanvasRenderingContext2d,
    state: &EditorState,
    canvas: &AssemblyCanvas,
    theme: &Theme,
    dragged: Option<InstanceId>,
) -> Result<(), JsValue> {
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
    ctx.set_fill_style_str(&css(theme.background));
    ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);
    draw_grid(ctx, canvas.width, canvas.height, state.grid_size, theme, 1.0);

    for inst in &state.instances {
        let [a, b, c, d, e, f] =
            instance_transform(inst, state.tile_width, state.tile_height).as_coeffs();
        ctx.save();
        ctx.transform(a, b, c, d, e, f)?;
        trace_shape(ctx, &state.tile);
        ctx.set_fill_style_str(&css(theme.tile_fill));
        ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
        let outline = if dragged == Some(inst.id) {
            theme.draft_stroke
        } else {
            theme.tile_stroke
        };
        ctx.set_stroke_style_str(&css(outline));
        ctx.set_line_width(1.5);
        ctx.stroke();
        ctx.restore();
    }
    Ok(())
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: &Shape) {
    ctx.begin_path();
    for ring in shape.rings() {
        let Some(first) = ring.first() else {
            continue;
        };
        ctx.move_to(first.x, first.y);
        for p in &ring[1..] {
            ctx.line_to(p.x, p.y);
        }
        ctx.close_path();
    }
}

fn draw_draft(
    ctx: &CanvasRenderingContext2d,
    draft: &[Point],
    theme: &Theme,
    scale: f64,
) -> Result<(), JsValue> {
    let Some(first) = draft.first() else {
        return Ok(());
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in &draft[1..] {
        ctx.line_to(p.x, p.y);
    }
    ctx.set_stroke_style_str(&css(theme.draft_stroke));
    ctx.set_line_width(1.5 / scale);
    ctx.stroke();

    ctx.set_fill_style_str(&css(theme.draft_vertex));
    for p in draft {
        ctx.begin_path();
        ctx.arc(p.x, p.y, VERTEX_RADIUS / scale, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    spacing: f64,
    theme: &Theme,
    line_width: f64,
) {
    let (xs, ys) = AssemblyCanvas::new(width, height).grid_lines(spacing);
    ctx.begin_path();
    for x in xs {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, height);
    }
    for y in ys {
        ctx.move_to(0.0, y);
        ctx.line_to(width, y);
    }
    ctx.set_stroke_style_str(&css(theme.grid));
    ctx.set_line_width(line_width);
    ctx.stroke();
}

/// CSS colour string.
pub fn css(c: Rgba8) -> String {
    if c.a == 255 {
        c.hex()
    } else {
        format!("rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, c.opacity())
    }
}
