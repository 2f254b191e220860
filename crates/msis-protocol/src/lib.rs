//! NRLMSIS atmosphere query protocol
//!
//! Types and utilities shared by the MSIS API service and the model binding:
//! request parsing and validation, the Cartesian grid that is handed to the
//! atmosphere model, and the JSON shapes returned to clients.
//!
//! # Example
//!
//! ```rust
//! use msis_protocol::{GridRequest, ModelOptions, SpaceWeather, ApIndex};
//! use msis_protocol::time::parse_date;
//!
//! let date = parse_date("2024-03-20T12:00").unwrap();
//! let weather = SpaceWeather::new(150.0, 150.0, ApIndex::Daily(4.0));
//! let grid = GridRequest::altitude_profile(date, -105.0, 40.0, weather, ModelOptions::default());
//!
//! assert_eq!(grid.point_count(), 181);
//! ```

pub mod errors;
pub mod geojson;
pub mod grid;
pub mod options;
pub mod queries;
pub mod responses;
pub mod species;
pub mod time;

// Re-export commonly used types
pub use errors::{MsisError, MsisResult};
pub use geojson::{FeatureCollection, TileFeature};
pub use grid::{
    ApIndex, FlatInputRow, GridIndex, GridKind, GridRequest, GridShape, SpaceWeather,
};
pub use options::ModelOptions;
pub use queries::{AltitudeQueryParams, BulkRequest, SurfaceQueryParams};
pub use responses::{AltitudeResponse, ExceptionResponse, SpeciesPoint, SpeciesSeries, SurfaceResponse};
pub use species::{Species, NUM_OUTPUTS};

/// Media types used in MSIS API responses
pub mod media_types {
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// Problem document media type for error responses
    pub const PROBLEM_JSON: &str = "application/problem+json";
}
