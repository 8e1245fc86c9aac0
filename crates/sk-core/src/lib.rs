pub mod config;
pub mod error;
pub mod model;
pub mod snapshot;

pub use config::SketchConfig;
pub use error::{Result, SurfaceError};
pub use model::*;
pub use snapshot::Snapshot;
