pub mod engine;
pub mod path;

pub use engine::{AnimationPhase, PathAnimation};
pub use path::rendered_path;
