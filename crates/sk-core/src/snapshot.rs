//! Immutable full-surface pixel captures.

use crate::error::{Result, SurfaceError};
use crate::model::SurfaceDimensions;
use std::sync::Arc;

/// A width × height × RGBA8 capture of the whole surface.
///
/// The byte layout is whatever the producing surface reads back (row-major,
/// four bytes per pixel); a snapshot is only ever restored onto the same
/// kind of surface that produced it. Cloning shares the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    dims: SurfaceDimensions,
    data: Arc<[u8]>,
}

impl Snapshot {
    /// Wrap a pixel buffer. Fails if the buffer is empty or its length
    /// does not match `dims`.
    pub fn new(dims: SurfaceDimensions, data: Vec<u8>) -> Result<Self> {
        if dims.is_empty() {
            return Err(SurfaceError::Capture(format!("surface {dims} has zero area")));
        }
        let expected = dims.area() * 4;
        if data.len() != expected {
            return Err(SurfaceError::Capture(format!(
                "expected {expected} bytes for {dims}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            dims,
            data: data.into(),
        })
    }

    pub fn dimensions(&self) -> SurfaceDimensions {
        self.dims
    }

    pub fn width(&self) -> u32 {
        self.dims.width
    }

    pub fn height(&self) -> u32 {
        self.dims.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// RGBA bytes at `(x, y)`, or `None` outside the capture.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.dims.width || y >= self.dims.height {
            return None;
        }
        let i = (y as usize * self.dims.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("dims", &self.dims)
            .field("bytes", &self.data.len())
            .finish()
    }
}
