//! Editor configuration.
//!
//! Every field has a default; hosts pass a partial JSON object and the
//! rest is filled in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a new editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Initial tile width. Default: **240**.
    pub tile_width: f64,
    /// Initial tile height. Default: **160**.
    pub tile_height: f64,
    /// Smallest accepted tile dimension. Default: **40**.
    pub min_tile_size: f64,

    /// Display grid spacing. Default: **16**.
    pub grid_size: f64,
    /// Whether snapping starts enabled. Default: **false**.
    pub snap: bool,
    /// Draft points snap to `grid_size / snap_subdivisions` (the minor grid
    /// lines). Default: **2**.
    pub snap_subdivisions: u32,

    /// Maximum number of undo steps kept. Default: **200**.
    pub history_depth: usize,

    /// Where `add_instance` places new instances. Default: **(32, 32)**.
    pub instance_origin: (f64, f64),

    /// Assembly canvas size, used by assembly export. Default: **960×640**.
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tile_width: 240.0,
            tile_height: 160.0,
            min_tile_size: 40.0,
            grid_size: 16.0,
            snap: false,
            snap_subdivisions: 2,
            history_depth: 200,
            instance_origin: (32.0, 32.0),
            canvas_width: 960.0,
            canvas_height: 640.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        config.normalize();
        Ok(config)
    }

    /// Clamp out-of-range values instead of rejecting the whole config.
    pub fn normalize(&mut self) {
        self.min_tile_size = self.min_tile_size.max(1.0);
        self.tile_width = self.tile_width.max(self.min_tile_size);
        self.tile_height = self.tile_height.max(self.min_tile_size);
        self.grid_size = self.grid_size.max(MIN_GRID_SIZE);
        self.snap_subdivisions = self.snap_subdivisions.max(1);
        self.history_depth = self.history_depth.max(1);
    }

    /// Step that draft points snap to.
    pub fn draft_snap_step(&self, grid_size: f64) -> f64 {
        grid_size / f64::from(self.snap_subdivisions.max(1))
    }
}

/// Smallest accepted grid spacing.
pub const MIN_GRID_SIZE: f64 = 2.0;

/// Round `v` to the nearest multiple of `step`. A non-positive step leaves
/// `v` alone.
pub fn snap_to(v: f64, step: f64) -> f64 {
    if step > 0.0 { (v / step).round() * step } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_fills_defaults() {
        let config = EditorConfig::from_json(r#"{"tileWidth": 300, "snap": true}"#).unwrap();
        assert_eq!(config.tile_width, 300.0);
        assert_eq!(config.tile_height, 160.0);
        assert!(config.snap);
        assert_eq!(config.grid_size, 16.0);
    }

    #[test]
    fn undersized_values_are_clamped() {
        let config =
            EditorConfig::from_json(r#"{"tileWidth": 5, "gridSize": 0, "snapSubdivisions": 0}"#)
                .unwrap();
        assert_eq!(config.tile_width, 40.0);
        assert_eq!(config.grid_size, MIN_GRID_SIZE);
        assert_eq!(config.snap_subdivisions, 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EditorConfig::from_json("{tileWidth").is_err());
    }

    #[test]
    fn snap_rounds_to_nearest_step() {
        assert_eq!(snap_to(23.0, 8.0), 24.0);
        assert_eq!(snap_to(57.0, 8.0), 56.0);
        assert_eq!(snap_to(250.0, 240.0), 240.0);
        assert_eq!(snap_to(-130.0, 240.0), -240.0);
        assert_eq!(snap_to(7.0, 0.0), 7.0);
    }

    #[test]
    fn draft_snap_step_uses_subdivisions() {
        let config = EditorConfig::default();
        assert_eq!(config.draft_snap_step(16.0), 8.0);
    }
}
