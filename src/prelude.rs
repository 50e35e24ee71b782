//! Prelude module for common maptext types and traits
//!
//! Re-exports the most commonly used types and functions for easy importing
//! with `use maptext::prelude::*;`

pub use crate::core::{
    config::{AnimationConfig, GeoJsonConfig, GeoJsonStyle, MapConfig, Marker},
    geo::LatLng,
    style::resolve_style,
};

pub use crate::directive::{
    decoder::decode,
    scanner::{scan, Segment},
};

pub use crate::data::geojson::GeoJsonGeometry;

pub use crate::render::{
    document::{render, MapBinding, RenderedDocument},
    surface::{MapSurface, SurfaceFactory},
};

pub use crate::animation::{
    engine::{AnimationPhase, PathAnimation},
    path::rendered_path,
};

pub use crate::visibility::{VisibilityCoordinator, VisibilitySignal};

pub use crate::{Error as MapTextError, Result};

pub use std::time::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
