pub mod adapter;
pub mod raster;
pub mod surface;

pub use adapter::SurfaceAdapter;
pub use raster::RasterSurface;
pub use surface::{CompositeMode, StrokeStyle, Surface};
