//! Surface lifecycle: sizing, content-preserving resize, and raw
//! snapshot/restore.
//!
//! The adapter is constructed once and handed to both the drawing engine
//! and the history. When the host could not produce a rendering context
//! the adapter is *unavailable*: every operation degrades to a no-op (or
//! an `Unavailable` error for reads) and the UI stays responsive.

use crate::surface::Surface;
use sk_core::{Color, Result, SketchConfig, Snapshot, SurfaceDimensions, SurfaceError};

pub struct SurfaceAdapter<S: Surface> {
    surface: Option<S>,
    max: SurfaceDimensions,
    background: Color,
}

impl<S: Surface> SurfaceAdapter<S> {
    pub fn new(surface: S, config: &SketchConfig) -> Self {
        Self {
            surface: Some(surface),
            max: config.max_dimensions(),
            background: config.background,
        }
    }

    /// An adapter with no rendering context.
    pub fn unavailable(config: &SketchConfig) -> Self {
        log::warn!("{}; drawing is disabled", SurfaceError::Unavailable);
        Self {
            surface: None,
            max: config.max_dimensions(),
            background: config.background,
        }
    }

    pub fn is_available(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Zero when unavailable.
    pub fn dimensions(&self) -> SurfaceDimensions {
        self.surface
            .as_ref()
            .map(|s| s.dimensions())
            .unwrap_or_default()
    }

    pub fn max_dimensions(&self) -> SurfaceDimensions {
        self.max
    }

    /// Resize to `requested`, clamped to the maximum size.
    ///
    /// When the clamped size differs from the current one, the old content
    /// is captured (if there was any), the new size applied, the surface
    /// filled with the background, and the old content put back at the
    /// origin, clipped if the surface shrank. Capture and restore failures
    /// are logged, never returned. Returns whether the size changed.
    pub fn resize(&mut self, requested: SurfaceDimensions) -> bool {
        let background = self.background;
        let target = requested.clamp_to(self.max);
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let current = surface.dimensions();
        if current == target {
            return false;
        }

        let preserved = if current.is_empty() {
            None
        } else {
            match surface.read_pixels() {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    log::warn!("resize {current} -> {target}: {e}");
                    None
                }
            }
        };

        if let Err(e) = surface.set_dimensions(target) {
            log::warn!("resize {current} -> {target}: {e}");
            return false;
        }
        surface.fill(background);

        if let Some(snapshot) = preserved
            && let Err(e) = surface.write_pixels(&snapshot)
        {
            log::warn!("resize {current} -> {target}: {e}");
        }
        log::debug!("surface resized {current} -> {target}");
        true
    }

    /// Capture the full pixel buffer.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let surface = self.surface.as_ref().ok_or(SurfaceError::Unavailable)?;
        surface.read_pixels()
    }

    /// Write `snapshot` back at the origin. When the sizes differ, the
    /// area the snapshot does not cover is reset to the background.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        let background = self.background;
        let surface = self.surface.as_mut().ok_or(SurfaceError::Unavailable)?;
        let dims = surface.dimensions();
        if snapshot.dimensions() != dims {
            log::debug!("restoring {} snapshot onto {dims} surface", snapshot.dimensions());
            surface.fill(background);
        }
        surface.write_pixels(snapshot)
    }

    /// Fill the whole surface with the opaque background.
    pub fn clear(&mut self) {
        let background = self.background;
        if let Some(surface) = self.surface.as_mut() {
            surface.fill(background);
        }
    }
}
