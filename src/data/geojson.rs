use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};

/// GeoJSON geometry types
///
/// Coordinates follow GeoJSON order: `[longitude, latitude]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

impl GeoJsonGeometry {
    /// Parses a geometry from a raw JSON string
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        let geometry: GeoJsonGeometry = serde_json::from_str(geojson_str)?;
        Ok(geometry)
    }

    /// Converts coordinates to LatLng points
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                vec![LatLng::new(coordinates[1], coordinates[0])]
            }
            GeoJsonGeometry::LineString { coordinates } => coordinates
                .iter()
                .map(|c| LatLng::new(c[1], c[0]))
                .collect(),
            GeoJsonGeometry::Polygon { coordinates } => {
                if let Some(exterior) = coordinates.first() {
                    exterior.iter().map(|c| LatLng::new(c[1], c[0])).collect()
                } else {
                    Vec::new()
                }
            }
            GeoJsonGeometry::MultiPoint { coordinates } => coordinates
                .iter()
                .map(|c| LatLng::new(c[1], c[0]))
                .collect(),
            GeoJsonGeometry::MultiLineString { coordinates } => {
                let mut points = Vec::new();
                for line in coordinates {
                    for c in line {
                        points.push(LatLng::new(c[1], c[0]));
                    }
                }
                points
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                let mut points = Vec::new();
                for polygon in coordinates {
                    if let Some(exterior) = polygon.first() {
                        for c in exterior {
                            points.push(LatLng::new(c[1], c[0]));
                        }
                    }
                }
                points
            }
            GeoJsonGeometry::GeometryCollection { geometries } => {
                let mut points = Vec::new();
                for geom in geometries {
                    points.extend(geom.to_lat_lng_points());
                }
                points
            }
        }
    }

    /// Gets the bounding box of the geometry, used to fit the camera to an
    /// overlay
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let points = self.to_lat_lng_points();
        let first = points.first()?;
        let mut bounds = LatLngBounds::new(*first, *first);
        for point in points.iter().skip(1) {
            bounds.extend(point);
        }
        Some(bounds)
    }
}
