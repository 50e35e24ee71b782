pub mod document;
pub mod surface;

pub use document::{render, DocumentNode, MapBinding, RenderedDocument};
pub use surface::{MapSurface, SurfaceFactory};
