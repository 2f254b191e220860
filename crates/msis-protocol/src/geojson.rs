//! GeoJSON rendering of the surface grid.
//!
//! Each 5° cell becomes a Polygon feature whose properties hold the model
//! output at the tile centre.

use serde::{Deserialize, Serialize};

use crate::grid::SURFACE_TILE_HALF_WIDTH;
use crate::responses::{SpeciesPoint, SurfaceResponse};

/// A GeoJSON FeatureCollection of surface tiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    pub features: Vec<TileFeature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }

    pub fn with_features(mut self, features: Vec<TileFeature>) -> Self {
        self.features.extend(features);
        self
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// One surface tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    pub geometry: Polygon,

    pub properties: TileProperties,
}

/// A GeoJSON Polygon geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Polygon {
    /// Type identifier (always "Polygon").
    #[serde(rename = "type")]
    pub type_: String,

    /// Linear rings of [longitude, latitude] pairs; only the exterior ring is used.
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    /// Closed counterclockwise square ring around a tile centre.
    pub fn tile(lon: f64, lat: f64, half_width: f64) -> Self {
        let ring = vec![
            [lon - half_width, lat - half_width],
            [lon + half_width, lat - half_width],
            [lon + half_width, lat + half_width],
            [lon - half_width, lat + half_width],
            [lon - half_width, lat - half_width],
        ];
        Self {
            type_: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }
}

/// Tile centre plus the model output there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TileProperties {
    pub longitude: f64,
    pub latitude: f64,
    #[serde(flatten)]
    pub values: SpeciesPoint,
}

impl TileFeature {
    pub fn new(lon: f64, lat: f64, values: SpeciesPoint) -> Self {
        Self {
            type_: "Feature".to_string(),
            geometry: Polygon::tile(lon, lat, SURFACE_TILE_HALF_WIDTH),
            properties: TileProperties {
                longitude: lon,
                latitude: lat,
                values,
            },
        }
    }
}

impl From<&SurfaceResponse> for FeatureCollection {
    fn from(surface: &SurfaceResponse) -> Self {
        let features = surface
            .longitude
            .iter()
            .zip(&surface.latitude)
            .enumerate()
            .filter_map(|(i, (&lon, &lat))| {
                surface
                    .species
                    .point(i)
                    .map(|values| TileFeature::new(lon, lat, values))
            })
            .collect();

        FeatureCollection::new().with_features(features)
    }
}
