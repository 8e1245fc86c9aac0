//! Drawing state owned by the UI: colors, tools, and surface geometry.
//!
//! Nothing in here touches pixels. The drawing engine reads a `ToolConfig`
//! on every pointer event and never writes back to it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A point in surface-local coordinates (origin at the surface's top-left).
pub type StrokePoint = kurbo::Point;

/// Hard cap on the live surface width, in pixels.
pub const MAX_WIDTH: u32 = 2000;
/// Hard cap on the live surface height, in pixels.
pub const MAX_HEIGHT: u32 = 1500;

// ─── Color ───────────────────────────────────────────────────────────────

/// An 8-bit straight-alpha sRGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RRGGBB`, `#RRGGBBAA`.
    /// The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair =
            |i: usize| -> Option<u8> { Some(hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xFF {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color {s:?}")))
    }
}

/// The swatches offered by the toolbar, left to right.
pub const PALETTE: [Color; 11] = [
    Color::rgb(0x00, 0x00, 0x00), // black
    Color::rgb(0xFF, 0x30, 0x30), // red
    Color::rgb(0xFF, 0x69, 0xB4), // pink
    Color::rgb(0x93, 0x70, 0xDB), // purple
    Color::rgb(0x8B, 0x45, 0x13), // brown
    Color::rgb(0x1E, 0x90, 0xFF), // blue
    Color::rgb(0x00, 0x00, 0xCD), // dark blue
    Color::rgb(0x32, 0xCD, 0x32), // green
    Color::rgb(0x00, 0x80, 0x00), // dark green
    Color::rgb(0xFF, 0xD7, 0x00), // gold
    Color::rgb(0xFF, 0xA5, 0x00), // orange
];

// ─── Tools ───────────────────────────────────────────────────────────────

/// The active tool. `None` makes every pointer event a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    None,
    Pen,
    Eraser,
}

/// Inclusive width bounds for a size slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range. Widths are never zero.
    pub fn clamp(&self, value: u32) -> u32 {
        let lo = self.min.max(1);
        let hi = self.max.max(lo);
        value.clamp(lo, hi)
    }
}

/// Tool selection plus per-tool parameters, as chosen in the toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    pub tool: ToolKind,
    pub color: Color,
    pub pen_width: u32,
    pub eraser_width: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::None,
            color: Color::BLACK,
            pen_width: 2,
            eraser_width: 20,
        }
    }
}

impl ToolConfig {
    /// Stroke width for the active tool, or `None` when no tool is active.
    pub fn active_width(&self) -> Option<u32> {
        match self.tool {
            ToolKind::Pen => Some(self.pen_width),
            ToolKind::Eraser => Some(self.eraser_width),
            ToolKind::None => None,
        }
    }

    /// Pick a pen color. Choosing a color always arms the pen.
    pub fn select_color(&mut self, color: Color) {
        self.color = color;
        self.tool = ToolKind::Pen;
    }

    /// Eraser → Pen, anything else → Eraser.
    pub fn toggle_eraser(&mut self) {
        self.tool = match self.tool {
            ToolKind::Eraser => ToolKind::Pen,
            _ => ToolKind::Eraser,
        };
    }

    pub fn set_pen_width(&mut self, width: u32, range: SizeRange) {
        self.pen_width = range.clamp(width);
    }

    pub fn set_eraser_width(&mut self, width: u32, range: SizeRange) {
        self.eraser_width = range.clamp(width);
    }
}

// ─── Surface geometry ────────────────────────────────────────────────────

/// Pixel size of the live raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SurfaceDimensions {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest surface permitted by default.
    pub const MAX: SurfaceDimensions = SurfaceDimensions::new(MAX_WIDTH, MAX_HEIGHT);

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Component-wise minimum with `max`.
    pub fn clamp_to(self, max: SurfaceDimensions) -> Self {
        Self {
            width: self.width.min(max.width),
            height: self.height.min(max.height),
        }
    }

    /// Convert a container size in CSS pixels into surface dimensions.
    /// Negative and non-finite values collapse to zero.
    pub fn from_container(width: f64, height: f64) -> Self {
        let px = |v: f64| {
            if v.is_finite() && v > 0.0 {
                v.floor().min(u32::MAX as f64) as u32
            } else {
                0
            }
        };
        Self::new(px(width), px(height))
    }
}

impl fmt::Display for SurfaceDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_hex_forms() {
        assert_eq!(Color::from_hex("#FF3030"), Some(Color::rgb(0xFF, 0x30, 0x30)));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color::rgba(0, 0, 0, 0x80))
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn hex_emits_uppercase() {
        assert_eq!(Color::rgb(0x1e, 0x90, 0xff).to_hex(), "#1E90FF");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn default_tool_state() {
        let cfg = ToolConfig::default();
        assert_eq!(cfg.tool, ToolKind::None);
        assert_eq!(cfg.color, Color::BLACK);
        assert_eq!(cfg.pen_width, 2);
        assert_eq!(cfg.eraser_width, 20);
        assert_eq!(cfg.active_width(), None);
    }

    #[test]
    fn selecting_color_arms_pen() {
        let mut cfg = ToolConfig {
            tool: ToolKind::Eraser,
            ..Default::default()
        };
        cfg.select_color(PALETTE[5]);
        assert_eq!(cfg.tool, ToolKind::Pen);
        assert_eq!(cfg.color.to_hex(), "#1E90FF");
        assert_eq!(cfg.active_width(), Some(2));
    }

    #[test]
    fn eraser_toggle() {
        let mut cfg = ToolConfig::default();
        cfg.toggle_eraser();
        assert_eq!(cfg.tool, ToolKind::Eraser);
        assert_eq!(cfg.active_width(), Some(20));
        cfg.toggle_eraser();
        assert_eq!(cfg.tool, ToolKind::Pen);
    }

    #[test]
    fn widths_are_clamped() {
        let mut cfg = ToolConfig::default();
        cfg.set_pen_width(0, SizeRange::new(1, 50));
        assert_eq!(cfg.pen_width, 1);
        cfg.set_eraser_width(500, SizeRange::new(5, 100));
        assert_eq!(cfg.eraser_width, 100);
    }

    #[test]
    fn dimensions_clamp_and_container() {
        let dims = SurfaceDimensions::new(2400, 900).clamp_to(SurfaceDimensions::MAX);
        assert_eq!(dims, SurfaceDimensions::new(2000, 900));
        assert_eq!(
            SurfaceDimensions::from_container(799.6, -3.0),
            SurfaceDimensions::new(799, 0)
        );
        assert!(SurfaceDimensions::from_container(f64::NAN, 10.0).is_empty());
    }

    #[test]
    fn color_serde_as_hex() {
        let json = serde_json::to_string(&Color::rgb(0xFF, 0xD7, 0x00)).unwrap();
        assert_eq!(json, "\"#FFD700\"");
        let back: Color = serde_json::from_str("\"#ffa500\"").unwrap();
        assert_eq!(back, PALETTE[10]);
        assert!(serde_json::from_str::<Color>("\"orange\"").is_err());
    }
}
