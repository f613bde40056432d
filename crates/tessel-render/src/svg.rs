//! SVG export.
//!
//! Both exports are standalone documents. The tile export is bounded by the
//! tile rectangle; the assembly export by the fixed assembly canvas, with
//! the reference grid underneath and every instance drawn as the current
//! tile path under its placement transform.

use crate::canvas::{AssemblyCanvas, Theme};
use std::fmt::Write;
use tessel_core::to_path_data;
use tessel_editor::{EditorState, TileInstance};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The tile alone: `viewBox="0 0 tileW tileH"`, one even-odd path.
pub fn export_tile_svg(state: &EditorState, theme: &Theme) -> String {
    let (w, h) = (state.tile_width, state.tile_height);
    let mut svg = open_svg(w, h);
    if !state.tile.is_empty() {
        let _ = writeln!(
            svg,
            "  <path d=\"{}\" {}/>",
            to_path_data(&state.tile),
            tile_style(theme)
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// The assembly canvas with grid and all placed instances.
pub fn export_assembly_svg(state: &EditorState, canvas: &AssemblyCanvas, theme: &Theme) -> String {
    let mut svg = open_svg(canvas.width, canvas.height);
    let _ = writeln!(
        svg,
        "  <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
        canvas.width,
        canvas.height,
        theme.background.hex()
    );

    let (xs, ys) = canvas.grid_lines(state.grid_size);
    if !xs.is_empty() || !ys.is_empty() {
        let _ = writeln!(
            svg,
            "  <g stroke=\"{}\" stroke-width=\"1\">",
            theme.grid.hex()
        );
        for x in xs {
            let _ = writeln!(
                svg,
                "    <line x1=\"{x}\" y1=\"0\" x2=\"{x}\" y2=\"{}\"/>",
                canvas.height
            );
        }
        for y in ys {
            let _ = writeln!(
                svg,
                "    <line x1=\"0\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\"/>",
                canvas.width
            );
        }
        svg.push_str("  </g>\n");
    }

    if !state.tile.is_empty() && !state.instances.is_empty() {
        let d = to_path_data(&state.tile);
        let style = tile_style(theme);
        for inst in &state.instances {
            let _ = writeln!(
                svg,
                "  <path id=\"{}\" d=\"{d}\" transform=\"{}\" {style}/>",
                inst.id,
                svg_transform(inst, state.tile_width, state.tile_height)
            );
        }
    }
    svg.push_str("</svg>\n");
    svg
}

/// `translate(x y) rotate(deg cx cy)`, the SVG spelling of
/// [`crate::transform::instance_transform`].
pub fn svg_transform(inst: &TileInstance, tile_w: f64, tile_h: f64) -> String {
    if inst.rotation == 0.0 {
        format!("translate({} {})", inst.x, inst.y)
    } else {
        format!(
            "translate({} {}) rotate({} {} {})",
            inst.x,
            inst.y,
            inst.rotation,
            tile_w / 2.0,
            tile_h / 2.0
        )
    }
}

fn open_svg(w: f64, h: f64) -> String {
    format!("<svg xmlns=\"{SVG_NS}\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n")
}

fn tile_style(theme: &Theme) -> String {
    let mut style = format!(
        "fill=\"{}\" fill-rule=\"evenodd\" stroke=\"{}\" stroke-width=\"1.5\"",
        theme.tile_fill.hex(),
        theme.tile_stroke.hex()
    );
    if theme.tile_fill.a < 255 {
        let _ = write!(style, " fill-opacity=\"{}\"", theme.tile_fill.opacity());
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tessel_editor::{Action, Editor};

    #[test]
    fn tile_svg_of_fresh_rectangle() {
        let editor = Editor::default();
        let svg = export_tile_svg(editor.state(), &Theme::light());
        assert_eq!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"240\" height=\"160\" viewBox=\"0 0 240 160\">\n\
             \x20 <path d=\"M 0 0 L 240 0 L 240 160 L 0 160 Z\" fill=\"#93C5FD\" fill-rule=\"evenodd\" stroke=\"#1E40AF\" stroke-width=\"1.5\"/>\n\
             </svg>\n"
        );
    }

    #[test]
    fn assembly_svg_has_grid_and_instances() {
        let mut editor = Editor::default();
        editor.dispatch(Action::AddInstance { rotation: 0.0 });
        editor.dispatch(Action::AddInstance { rotation: 90.0 });
        let svg = export_assembly_svg(editor.state(), &AssemblyCanvas::default(), &Theme::light());

        assert!(svg.contains("viewBox=\"0 0 960 640\""));
        // 960/16 + 1 vertical, 640/16 + 1 horizontal.
        assert_eq!(svg.matches("<line ").count(), 61 + 41);
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.contains("transform=\"translate(32 32)\""));
        assert!(svg.contains("transform=\"translate(32 32) rotate(90 120 80)\""));
    }

    #[test]
    fn assembly_without_instances_is_grid_only() {
        let editor = Editor::default();
        let svg = export_assembly_svg(editor.state(), &AssemblyCanvas::new(32.0, 32.0), &Theme::dark());
        assert_eq!(svg.matches("<path ").count(), 0);
        assert_eq!(svg.matches("<line ").count(), 6);
        assert!(svg.contains("fill=\"#111827\""));
    }
}
