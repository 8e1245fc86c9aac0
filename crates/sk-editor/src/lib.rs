pub mod context;
pub mod engine;
pub mod history;
pub mod input;
pub mod shortcuts;

pub use context::SketchContext;
pub use engine::{DrawingEngine, StrokeState};
pub use history::History;
pub use input::{InputEvent, Modifiers};
