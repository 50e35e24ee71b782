use crate::core::geo::LatLng;
use crate::data::geojson::GeoJsonGeometry;
use serde::{Deserialize, Serialize};

/// Default zoom level applied when a directive's zoom field fails to parse
pub const DEFAULT_ZOOM: u8 = 13;

/// Fully decoded configuration for one map directive
///
/// Produced by the directive decoder and consumed by the segment renderer.
/// `coordinates` are guaranteed finite; the optional sub-configs are `None`
/// when their payload was absent or failed to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub coordinates: LatLng,
    pub style_key: String,
    pub zoom: u8,
    pub title: Option<String>,
    pub markers: Vec<Marker>,
    pub geojson: Option<GeoJsonConfig>,
    pub animation: Option<AnimationConfig>,
}

impl MapConfig {
    pub fn new(coordinates: LatLng, style_key: String, zoom: u8) -> Self {
        Self {
            coordinates,
            style_key,
            zoom,
            title: None,
            markers: Vec::new(),
            geojson: None,
            animation: None,
        }
    }
}

/// A named point of interest attached to a map directive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: Option<String>,
}

impl Marker {
    pub fn new(title: String, latitude: f64, longitude: f64) -> Self {
        Self {
            title,
            latitude,
            longitude,
            description: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// GeoJSON overlay carried by a directive's `geojson:inline:` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonConfig {
    pub data: GeoJsonGeometry,
    pub style: GeoJsonStyle,
}

/// Paint properties for a GeoJSON fill/stroke layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonStyle {
    pub fill: String,
    pub stroke: String,
    pub opacity: f64,
    pub fill_opacity: f64,
}

impl Default for GeoJsonStyle {
    fn default() -> Self {
        Self {
            fill: "#3388ff".to_string(),
            stroke: "#3388ff".to_string(),
            opacity: 1.0,
            fill_opacity: 0.2,
        }
    }
}

/// Configuration for a path animation carried by a directive's
/// `animation:inline:` section
///
/// Invariants enforced by the decoder: `path.len() >= 2` and
/// `duration_ms > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub path: Vec<LatLng>,
    pub duration_ms: u64,
    pub color: String,
    pub width: f64,
    pub auto_start: bool,
    pub looped: bool,
    pub loop_delay_ms: u64,
}

impl AnimationConfig {
    pub fn new(path: Vec<LatLng>) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            duration_ms: 2000,
            color: "#ff0000".to_string(),
            width: 3.0,
            auto_start: true,
            looped: true,
            loop_delay_ms: 1000,
        }
    }
}
