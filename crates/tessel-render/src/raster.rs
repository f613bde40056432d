//! CPU rasterization of the assembly canvas and PNG encoding.
//!
//! Draws the same picture as the SVG export with tiny-skia: background,
//! grid, then every instance as an even-odd fill plus outline, all
//! anti-aliased.

use crate::canvas::{AssemblyCanvas, Rgba8, Theme};
use crate::transform::instance_transform;
use kurbo::Affine;
use tessel_core::Shape;
use tessel_editor::EditorState;
use thiserror::Error;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

/// Largest accepted output side, in pixels.
pub const MAX_DIMENSION: u32 = 8192;

/// Outline width in canvas units, as in the SVG export.
const OUTLINE_WIDTH: f32 = 1.5;
const GRID_WIDTH: f32 = 1.0;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("raster size {width}×{height} is out of range")]
    InvalidSize { width: f64, height: f64 },
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

/// Render the assembly canvas at `scale` device pixels per canvas unit.
pub fn rasterize_assembly(
    state: &EditorState,
    canvas: &AssemblyCanvas,
    theme: &Theme,
    scale: f64,
) -> Result<Pixmap, RasterError> {
    let (width, height) = (canvas.width * scale, canvas.height * scale);
    let in_range = |v: f64| (1.0..=f64::from(MAX_DIMENSION)).contains(&v);
    if !in_range(width) || !in_range(height) {
        return Err(RasterError::InvalidSize { width, height });
    }
    let (pw, ph) = (width.round() as u32, height.round() as u32);
    let mut pixmap =
        Pixmap::new(pw, ph).ok_or(RasterError::InvalidSize { width, height })?;
    pixmap.fill(theme.background.to_skia());

    let view = Affine::scale(scale);
    if let Some(grid) = grid_path(canvas, state.grid_size) {
        let stroke = Stroke {
            width: GRID_WIDTH,
            ..Default::default()
        };
        pixmap.stroke_path(&grid, &paint(theme.grid), &stroke, to_skia_transform(view), None);
    }

    if let Some(tile) = shape_path(&state.tile) {
        let fill = paint(theme.tile_fill);
        let outline = paint(theme.tile_stroke);
        let stroke = Stroke {
            width: OUTLINE_WIDTH,
            ..Default::default()
        };
        for inst in &state.instances {
            let t = to_skia_transform(
                view * instance_transform(inst, state.tile_width, state.tile_height),
            );
            pixmap.fill_path(&tile, &fill, FillRule::EvenOdd, t, None);
            pixmap.stroke_path(&tile, &outline, &stroke, t, None);
        }
    }
    log::debug!(
        "rasterized {} instances at {pw}×{ph}",
        state.instances.len()
    );
    Ok(pixmap)
}

/// Encode a rendered canvas as PNG bytes.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    pixmap
        .encode_png()
        .map_err(|err| RasterError::Png(err.to_string()))
}

fn paint(color: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// All rings of `shape` as closed subpaths, in tile units.
fn shape_path(shape: &Shape) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for ring in shape.rings() {
        let Some((first, rest)) = ring.split_first() else {
            continue;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
    }
    pb.finish()
}

fn grid_path(canvas: &AssemblyCanvas, spacing: f64) -> Option<Path> {
    let (xs, ys) = canvas.grid_lines(spacing);
    let (w, h) = (canvas.width as f32, canvas.height as f32);
    let mut pb = PathBuilder::new();
    for x in xs {
        pb.move_to(x as f32, 0.0);
        pb.line_to(x as f32, h);
    }
    for y in ys {
        pb.move_to(0.0, y as f32);
        pb.line_to(w, y as f32);
    }
    pb.finish()
}

/// kurbo's `[a b c d e f]` and tiny-skia's row order agree.
fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}
