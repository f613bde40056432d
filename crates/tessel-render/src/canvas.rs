//! Assembly canvas geometry and colour theme shared by every renderer.

use tessel_core::EditorConfig;

/// The fixed-size surface instances are arranged on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblyCanvas {
    pub width: f64,
    pub height: f64,
}

impl Default for AssemblyCanvas {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
        }
    }
}

impl AssemblyCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.canvas_width, config.canvas_height)
    }

    /// Positions of the vertical and horizontal reference grid lines,
    /// starting at 0. Empty for a non-positive spacing.
    pub fn grid_lines(&self, spacing: f64) -> (Vec<f64>, Vec<f64>) {
        (steps(self.width, spacing), steps(self.height, spacing))
    }
}

fn steps(extent: f64, spacing: f64) -> Vec<f64> {
    if spacing.is_nan() || spacing <= 0.0 || !extent.is_finite() {
        return Vec::new();
    }
    let count = (extent / spacing).floor() as usize;
    (0..=count).map(|i| i as f64 * spacing).collect()
}

// ─── Colours ─────────────────────────────────────────────────────────────

/// 8-bit straight-alpha colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#RRGGBB`, ignoring alpha.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Alpha as a 0–1 opacity.
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    pub fn to_peniko(self) -> peniko::Color {
        peniko::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Colours for the tile, instances, grid and draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Rgba8,
    pub grid: Rgba8,
    pub tile_fill: Rgba8,
    pub tile_stroke: Rgba8,
    pub draft_stroke: Rgba8,
    pub draft_vertex: Rgba8,
    /// Outline of the `tileW × tileH` bounding rectangle.
    pub bounds_stroke: Rgba8,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Rgba8::rgb(0xFF, 0xFF, 0xFF),
            grid: Rgba8::rgb(0xE5, 0xE7, 0xEB),
            tile_fill: Rgba8::rgb(0x93, 0xC5, 0xFD),
            tile_stroke: Rgba8::rgb(0x1E, 0x40, 0xAF),
            draft_stroke: Rgba8::rgb(0xDC, 0x26, 0x26),
            draft_vertex: Rgba8::rgb(0x99, 0x1B, 0x1B),
            bounds_stroke: Rgba8::rgb(0x9C, 0xA3, 0xAF),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Rgba8::rgb(0x11, 0x18, 0x27),
            grid: Rgba8::rgb(0x1F, 0x29, 0x37),
            tile_fill: Rgba8::rgb(0x1D, 0x4E, 0xD8),
            tile_stroke: Rgba8::rgb(0x93, 0xC5, 0xFD),
            draft_stroke: Rgba8::rgb(0xF8, 0x71, 0x71),
            draft_vertex: Rgba8::rgb(0xFE, 0xCA, 0xCA),
            bounds_stroke: Rgba8::rgb(0x4B, 0x55, 0x63),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
