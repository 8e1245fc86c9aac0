//! The host raster surface, as seen by the drawing core.
//!
//! Mirrors the subset of the HTML Canvas 2D API the core calls: sizing,
//! whole-buffer pixel read/write, a background fill, and the
//! `beginPath`/`moveTo`/`lineTo`/`stroke` path primitives with their
//! style state. Implemented by `RasterSurface` (software) and by the WASM
//! bridge on top of `CanvasRenderingContext2d`.

use kurbo::{Cap, Join, Rect};
use sk_core::{Color, Result, Snapshot, StrokePoint, SurfaceDimensions, ToolConfig, ToolKind};

/// Pixel blend rule applied when stroking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Paint over existing content (`source-over`).
    #[default]
    SourceOver,
    /// Remove existing content where the stroke lands (`destination-out`).
    /// The source color is irrelevant; only its coverage counts.
    DestinationOut,
}

impl CompositeMode {
    /// The Canvas 2D `globalCompositeOperation` keyword.
    pub fn as_canvas_op(self) -> &'static str {
        match self {
            CompositeMode::SourceOver => "source-over",
            CompositeMode::DestinationOut => "destination-out",
        }
    }
}

/// Everything that configures how `stroke()` renders the current path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub composite: CompositeMode,
    pub color: Color,
    pub width: f64,
    pub cap: Cap,
    pub join: Join,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            composite: CompositeMode::SourceOver,
            color: Color::BLACK,
            width: 1.0,
            cap: Cap::Butt,
            join: Join::Miter,
        }
    }
}

impl StrokeStyle {
    /// Map the toolbar state onto render parameters.
    ///
    /// Pen draws `color` at `pen_width`; eraser cuts at `eraser_width`
    /// with an opaque source so coverage is total. Both use round caps and
    /// joins. Returns `None` when no tool is armed.
    pub fn for_tool(config: &ToolConfig) -> Option<Self> {
        let (composite, color, width) = match config.tool {
            ToolKind::Pen => (CompositeMode::SourceOver, config.color, config.pen_width),
            ToolKind::Eraser => (CompositeMode::DestinationOut, Color::BLACK, config.eraser_width),
            ToolKind::None => return None,
        };
        Some(Self {
            composite,
            color,
            width: width as f64,
            cap: Cap::Round,
            join: Join::Round,
        })
    }
}

/// Raster drawing target.
///
/// Operations are synchronous; every call completes before the next input
/// event is handled.
pub trait Surface {
    /// Current pixel size.
    fn dimensions(&self) -> SurfaceDimensions;

    /// Apply a new pixel size. Existing content is discarded and the
    /// surface becomes fully transparent.
    fn set_dimensions(&mut self, dims: SurfaceDimensions) -> Result<()>;

    /// Fill the whole surface with an opaque color, ignoring the current
    /// composite mode.
    fn fill(&mut self, color: Color);

    /// Read back the full pixel buffer.
    fn read_pixels(&self) -> Result<Snapshot>;

    /// Write `snapshot` at the origin, replacing pixels it covers. A
    /// snapshot of a different size is clipped to the surface.
    fn write_pixels(&mut self, snapshot: &Snapshot) -> Result<()>;

    /// Bounding rectangle of the surface in viewport (client) coordinates.
    fn client_rect(&self) -> Rect;

    fn set_stroke_style(&mut self, style: &StrokeStyle);

    fn begin_path(&mut self);

    fn move_to(&mut self, point: StrokePoint);

    fn line_to(&mut self, point: StrokePoint);

    /// Render the current path with the current stroke style.
    fn stroke(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pen_style() {
        let cfg = ToolConfig {
            tool: ToolKind::Pen,
            color: Color::rgb(0xFF, 0x30, 0x30),
            pen_width: 5,
            eraser_width: 30,
        };
        let style = StrokeStyle::for_tool(&cfg).unwrap();
        assert_eq!(style.composite, CompositeMode::SourceOver);
        assert_eq!(style.color, Color::rgb(0xFF, 0x30, 0x30));
        assert_eq!(style.width, 5.0);
        assert_eq!(style.cap, Cap::Round);
        assert_eq!(style.join, Join::Round);
    }

    #[test]
    fn eraser_style_ignores_pen_color() {
        let cfg = ToolConfig {
            tool: ToolKind::Eraser,
            color: Color::rgb(0xFF, 0xD7, 0x00),
            pen_width: 5,
            eraser_width: 30,
        };
        let style = StrokeStyle::for_tool(&cfg).unwrap();
        assert_eq!(style.composite, CompositeMode::DestinationOut);
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 30.0);
        assert_eq!(style.composite.as_canvas_op(), "destination-out");
    }

    #[test]
    fn no_tool_no_style() {
        assert_eq!(StrokeStyle::for_tool(&ToolConfig::default()), None);
    }
}
