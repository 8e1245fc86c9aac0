//! `Surface` on top of an HTML `<canvas>` and its 2D context.

use kurbo::{Cap, Join, Rect};
use sk_core::{Color, Result, Snapshot, StrokePoint, SurfaceDimensions, SurfaceError};
use sk_render::{StrokeStyle, Surface};
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Acquire the 2D context. `None` when the browser refuses one.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// Size of the canvas's parent element, if it has one.
    pub fn container_dimensions(&self) -> Option<SurfaceDimensions> {
        let parent = self.canvas.parent_element()?;
        Some(SurfaceDimensions::from_container(
            parent.client_width() as f64,
            parent.client_height() as f64,
        ))
    }
}

fn cap_keyword(cap: Cap) -> &'static str {
    match cap {
        Cap::Butt => "butt",
        Cap::Round => "round",
        Cap::Square => "square",
    }
}

fn join_keyword(join: Join) -> &'static str {
    match join {
        Join::Bevel => "bevel",
        Join::Miter => "miter",
        Join::Round => "round",
    }
}

impl Surface for WebSurface {
    fn dimensions(&self) -> SurfaceDimensions {
        SurfaceDimensions::new(self.canvas.width(), self.canvas.height())
    }

    fn set_dimensions(&mut self, dims: SurfaceDimensions) -> Result<()> {
        self.canvas.set_width(dims.width);
        self.canvas.set_height(dims.height);
        Ok(())
    }

    fn fill(&mut self, color: Color) {
        let dims = self.dimensions();
        self.ctx.save();
        if let Err(e) = self.ctx.set_global_composite_operation("source-over") {
            log::warn!("fill: cannot reset composite mode: {e:?}");
        }
        self.ctx.set_fill_style_str(&color.to_hex());
        self.ctx
            .fill_rect(0.0, 0.0, dims.width as f64, dims.height as f64);
        self.ctx.restore();
    }

    fn read_pixels(&self) -> Result<Snapshot> {
        let dims = self.dimensions();
        if dims.is_empty() {
            return Err(SurfaceError::Capture(format!("surface {dims} has zero area")));
        }
        let image = self
            .ctx
            .get_image_data(0.0, 0.0, dims.width as f64, dims.height as f64)
            .map_err(|e| SurfaceError::Capture(format!("{e:?}")))?;
        Snapshot::new(dims, image.data().0)
    }

    fn write_pixels(&mut self, snapshot: &Snapshot) -> Result<()> {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(snapshot.as_bytes()),
            snapshot.width(),
            snapshot.height(),
        )
        .map_err(|e| SurfaceError::Restore(format!("{e:?}")))?;
        self.ctx
            .put_image_data(&image, 0.0, 0.0)
            .map_err(|e| SurfaceError::Restore(format!("{e:?}")))
    }

    fn client_rect(&self) -> Rect {
        let r = self.canvas.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        if let Err(e) = self
            .ctx
            .set_global_composite_operation(style.composite.as_canvas_op())
        {
            log::warn!("cannot set composite mode: {e:?}");
        }
        self.ctx.set_stroke_style_str(&style.color.to_hex());
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_cap(cap_keyword(style.cap));
        self.ctx.set_line_join(join_keyword(style.join));
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, point: StrokePoint) {
        self.ctx.move_to(point.x, point.y);
    }

    fn line_to(&mut self, point: StrokePoint) {
        self.ctx.line_to(point.x, point.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
