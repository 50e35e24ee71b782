//! # maptext
//!
//! Embeds interactive, animated maps inside free-form rich text.
//!
//! The library recognizes inline `[MAP:...]` directives, decodes each one into
//! a typed [`MapConfig`], renders the surrounding prose and the decoded maps
//! against an injected rendering surface, and drives path animations over
//! those surfaces with pause/resume tied to viewport visibility.
//!
//! The map-rendering surface itself (tiles, camera, markers, popups) is an
//! external collaborator behind the [`MapSurface`] trait; this crate never
//! fetches tiles or touches the network.

pub mod animation;
pub mod core;
pub mod data;
pub mod directive;
pub mod prelude;
pub mod render;
pub mod visibility;

// Re-export public API
pub use crate::core::{
    config::{AnimationConfig, GeoJsonConfig, GeoJsonStyle, MapConfig, Marker},
    geo::LatLng,
    style::resolve_style,
};

pub use directive::{
    decoder::decode,
    scanner::{scan, Segment},
};

pub use data::geojson::GeoJsonGeometry;

pub use render::{
    document::{render, MapBinding, RenderedDocument},
    surface::{MapSurface, SurfaceFactory},
};

pub use animation::engine::{AnimationPhase, PathAnimation};

pub use visibility::{VisibilityCoordinator, VisibilitySignal};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapTextError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapTextError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapTextError;
