//! Tunables for a drawing session, loadable from JSON.

use crate::model::{
    Color, MAX_HEIGHT, MAX_WIDTH, SizeRange, SurfaceDimensions, ToolConfig, ToolKind,
};
use serde::{Deserialize, Serialize};

/// Default number of snapshots kept for undo/redo.
pub const DEFAULT_MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    /// Snapshot capacity of the history buffer.
    pub max_history: usize,
    pub max_width: u32,
    pub max_height: u32,
    /// Fill used on mount, on resize and on reset.
    pub background: Color,
    pub pen_color: Color,
    pub pen_width: u32,
    pub eraser_width: u32,
    pub pen_width_range: SizeRange,
    pub eraser_width_range: SizeRange,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            max_width: MAX_WIDTH,
            max_height: MAX_HEIGHT,
            background: Color::WHITE,
            pen_color: Color::BLACK,
            pen_width: 2,
            eraser_width: 20,
            pen_width_range: SizeRange::new(1, 50),
            eraser_width_range: SizeRange::new(5, 100),
        }
    }
}

impl SketchConfig {
    /// History capacity, never below one entry.
    pub fn history_capacity(&self) -> usize {
        self.max_history.max(1)
    }

    pub fn max_dimensions(&self) -> SurfaceDimensions {
        SurfaceDimensions::new(self.max_width, self.max_height)
    }

    /// Initial toolbar state: nothing armed, widths clamped into range.
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            tool: ToolKind::None,
            color: self.pen_color,
            pen_width: self.pen_width_range.clamp(self.pen_width),
            eraser_width: self.eraser_width_range.clamp(self.eraser_width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let cfg = SketchConfig::default();
        assert_eq!(cfg.history_capacity(), 20);
        assert_eq!(cfg.max_dimensions(), SurfaceDimensions::new(2000, 1500));
        assert_eq!(cfg.tool_config(), ToolConfig::default());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SketchConfig =
            serde_json::from_str(r##"{ "maxHistory": 5, "penColor": "#FF3030" }"##).unwrap();
        assert_eq!(cfg.max_history, 5);
        assert_eq!(cfg.pen_color, Color::rgb(0xFF, 0x30, 0x30));
        assert_eq!(cfg.max_width, 2000);
        assert_eq!(cfg.background, Color::WHITE);
    }

    #[test]
    fn zero_history_still_keeps_one() {
        let cfg = SketchConfig {
            max_history: 0,
            ..Default::default()
        };
        assert_eq!(cfg.history_capacity(), 1);
    }
}
