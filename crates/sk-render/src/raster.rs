//! Software raster surface backed by a tiny-skia `Pixmap`.
//!
//! Follows Canvas 2D semantics closely enough that pixel captures taken
//! here behave like `getImageData`/`putImageData` in a browser: resizing
//! clears to transparent, `stroke()` renders the whole current path, and
//! `write_pixels` replaces (not blends) the pixels it covers.

use crate::surface::{CompositeMode, StrokeStyle, Surface};
use kurbo::{BezPath, Cap, Join, PathEl, Point, Rect};
use sk_core::{Color, Result, Snapshot, StrokePoint, SurfaceDimensions, SurfaceError};
use tiny_skia::{
    BlendMode, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

pub struct RasterSurface {
    /// `None` while the surface has zero area.
    pixmap: Option<Pixmap>,
    dims: SurfaceDimensions,
    /// Top-left corner in client coordinates.
    origin: Point,
    style: StrokeStyle,
    path: BezPath,
}

impl RasterSurface {
    /// A transparent surface of the given size at client origin (0, 0).
    pub fn new(dims: SurfaceDimensions) -> Result<Self> {
        let mut surface = Self {
            pixmap: None,
            dims: SurfaceDimensions::default(),
            origin: Point::ZERO,
            style: StrokeStyle::default(),
            path: BezPath::new(),
        };
        surface.set_dimensions(dims)?;
        Ok(surface)
    }

    /// Place the surface at `origin` in client coordinates.
    pub fn with_client_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Premultiplied RGBA at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let px = self.pixmap.as_ref()?.pixel(x, y)?;
        Some([px.red(), px.green(), px.blue(), px.alpha()])
    }

    fn paint(&self) -> Paint<'static> {
        let Color { r, g, b, a } = self.style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint.blend_mode = match self.style.composite {
            CompositeMode::SourceOver => BlendMode::SourceOver,
            CompositeMode::DestinationOut => BlendMode::DestinationOut,
        };
        paint
    }

    fn skia_stroke(&self) -> Stroke {
        Stroke {
            width: self.style.width as f32,
            line_cap: match self.style.cap {
                Cap::Butt => LineCap::Butt,
                Cap::Round => LineCap::Round,
                Cap::Square => LineCap::Square,
            },
            line_join: match self.style.join {
                Join::Bevel => LineJoin::Bevel,
                Join::Miter => LineJoin::Miter,
                Join::Round => LineJoin::Round,
            },
            ..Stroke::default()
        }
    }
}

fn build_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

impl Surface for RasterSurface {
    fn dimensions(&self) -> SurfaceDimensions {
        self.dims
    }

    fn set_dimensions(&mut self, dims: SurfaceDimensions) -> Result<()> {
        self.pixmap = if dims.is_empty() {
            None
        } else {
            Some(Pixmap::new(dims.width, dims.height).ok_or(SurfaceError::InvalidDimensions {
                width: dims.width,
                height: dims.height,
            })?)
        };
        self.dims = dims;
        self.path = BezPath::new();
        Ok(())
    }

    fn fill(&mut self, color: Color) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
        }
    }

    fn read_pixels(&self) -> Result<Snapshot> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| SurfaceError::Capture(format!("surface {} has zero area", self.dims)))?;
        Snapshot::new(self.dims, pixmap.data().to_vec())
    }

    fn write_pixels(&mut self, snapshot: &Snapshot) -> Result<()> {
        let dims = self.dims;
        let pixmap = self
            .pixmap
            .as_mut()
            .ok_or_else(|| SurfaceError::Restore(format!("surface {dims} has zero area")))?;

        if snapshot.dimensions() == dims {
            pixmap.data_mut().copy_from_slice(snapshot.as_bytes());
            return Ok(());
        }

        log::debug!("clipping {} snapshot onto {dims} surface", snapshot.dimensions());
        let size = IntSize::from_wh(snapshot.width(), snapshot.height()).ok_or_else(|| {
            SurfaceError::Restore(format!("bad snapshot size {}", snapshot.dimensions()))
        })?;
        let src = Pixmap::from_vec(snapshot.as_bytes().to_vec(), size)
            .ok_or_else(|| SurfaceError::Restore("snapshot buffer rejected".to_string()))?;
        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::identity(), None);
        Ok(())
    }

    fn client_rect(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (self.dims.width as f64, self.dims.height as f64),
        )
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.style = *style;
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, point: StrokePoint) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: StrokePoint) {
        // Canvas 2D: lineTo on an empty path behaves as moveTo.
        if self.path.elements().is_empty() {
            self.path.move_to(point);
        } else {
            self.path.line_to(point);
        }
    }

    fn stroke(&mut self) {
        let Some(path) = build_path(&self.path) else {
            log::trace!("stroke skipped: degenerate path");
            return;
        };
        let paint = self.paint();
        let stroke = self.skia_stroke();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}
