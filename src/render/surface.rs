//! The external map-rendering surface.
//!
//! Tile loading, the camera, and marker/popup primitives live behind these
//! traits; this crate only issues commands against them. Every map segment
//! gets its own isolated surface instance so layer ids never collide across
//! bindings.

use crate::core::config::GeoJsonStyle;
use crate::core::geo::LatLng;
use crate::data::geojson::GeoJsonGeometry;
use crate::Result;

/// One live map-rendering surface, owned by exactly one binding
pub trait MapSurface {
    /// Applies a style URL (resolved from the directive's style key)
    fn set_style(&mut self, style_url: &str) -> Result<()>;

    /// Positions the camera
    fn set_camera(&mut self, center: LatLng, zoom: u8) -> Result<()>;

    /// Adds a point marker with an optional popup
    fn add_marker(&mut self, position: LatLng, title: &str, popup: Option<&str>) -> Result<()>;

    /// Removes all markers from the surface
    fn clear_markers(&mut self) -> Result<()>;

    /// Creates a named line layer+source pair with paint properties
    fn add_line_layer(&mut self, id: &str, color: &str, width: f64) -> Result<()>;

    /// Creates a named fill/stroke layer for a GeoJSON geometry
    fn add_fill_layer(
        &mut self,
        id: &str,
        geometry: &GeoJsonGeometry,
        style: &GeoJsonStyle,
    ) -> Result<()>;

    /// Replaces a layer's geometry with the given polyline
    fn set_layer_geometry(&mut self, id: &str, points: &[LatLng]) -> Result<()>;

    /// Destroys a named layer+source pair
    fn remove_layer(&mut self, id: &str) -> Result<()>;

    /// Whether the surface has finished its initial style load
    fn is_style_loaded(&self) -> bool;
}

/// Produces one surface instance per map binding
///
/// Injected into the renderer so the core stays testable without a real
/// rendering backend.
pub trait SurfaceFactory {
    fn create_surface(&mut self, id: &str) -> Result<Box<dyn MapSurface>>;
}
