//! MSIS API response types.
//!
//! The bulk endpoint returns the raw nested model array; the surface and
//! altitude endpoints return one array per output column, aligned with the
//! coordinate arrays that precede them.

use serde::{Deserialize, Serialize};

use crate::species::{Species, NUM_OUTPUTS};

/// Model output for a single grid point, one field per column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SpeciesPoint {
    #[serde(rename = "Mass")]
    pub mass: f64,
    #[serde(rename = "N2")]
    pub n2: f64,
    #[serde(rename = "O2")]
    pub o2: f64,
    #[serde(rename = "O")]
    pub o: f64,
    #[serde(rename = "He")]
    pub he: f64,
    #[serde(rename = "H")]
    pub h: f64,
    #[serde(rename = "Ar")]
    pub ar: f64,
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "AnomO")]
    pub anomalous_o: f64,
    #[serde(rename = "NO")]
    pub no: f64,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
}

impl SpeciesPoint {
    pub fn from_row(row: [f64; NUM_OUTPUTS]) -> Self {
        Self {
            mass: row[Species::Mass.index()],
            n2: row[Species::N2.index()],
            o2: row[Species::O2.index()],
            o: row[Species::O.index()],
            he: row[Species::He.index()],
            h: row[Species::H.index()],
            ar: row[Species::Ar.index()],
            n: row[Species::N.index()],
            anomalous_o: row[Species::AnomalousO.index()],
            no: row[Species::NO.index()],
            temperature: row[Species::Temperature.index()],
        }
    }
}

/// Column-oriented model output: one array per species.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpeciesSeries {
    #[serde(rename = "Mass")]
    pub mass: Vec<f64>,
    #[serde(rename = "N2")]
    pub n2: Vec<f64>,
    #[serde(rename = "O2")]
    pub o2: Vec<f64>,
    #[serde(rename = "O")]
    pub o: Vec<f64>,
    #[serde(rename = "He")]
    pub he: Vec<f64>,
    #[serde(rename = "H")]
    pub h: Vec<f64>,
    #[serde(rename = "Ar")]
    pub ar: Vec<f64>,
    #[serde(rename = "N")]
    pub n: Vec<f64>,
    #[serde(rename = "AnomO")]
    pub anomalous_o: Vec<f64>,
    #[serde(rename = "NO")]
    pub no: Vec<f64>,
    #[serde(rename = "Temperature")]
    pub temperature: Vec<f64>,
}

impl SpeciesSeries {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mass: Vec::with_capacity(capacity),
            n2: Vec::with_capacity(capacity),
            o2: Vec::with_capacity(capacity),
            o: Vec::with_capacity(capacity),
            he: Vec::with_capacity(capacity),
            h: Vec::with_capacity(capacity),
            ar: Vec::with_capacity(capacity),
            n: Vec::with_capacity(capacity),
            anomalous_o: Vec::with_capacity(capacity),
            no: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
        }
    }

    /// Append one output row.
    pub fn push_row(&mut self, row: [f64; NUM_OUTPUTS]) {
        let point = SpeciesPoint::from_row(row);
        self.mass.push(point.mass);
        self.n2.push(point.n2);
        self.o2.push(point.o2);
        self.o.push(point.o);
        self.he.push(point.he);
        self.h.push(point.h);
        self.ar.push(point.ar);
        self.n.push(point.n);
        self.anomalous_o.push(point.anomalous_o);
        self.no.push(point.no);
        self.temperature.push(point.temperature);
    }

    pub fn len(&self) -> usize {
        self.mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Values for a single column.
    pub fn column(&self, species: Species) -> &[f64] {
        match species {
            Species::Mass => &self.mass,
            Species::N2 => &self.n2,
            Species::O2 => &self.o2,
            Species::O => &self.o,
            Species::He => &self.he,
            Species::H => &self.h,
            Species::Ar => &self.ar,
            Species::N => &self.n,
            Species::AnomalousO => &self.anomalous_o,
            Species::NO => &self.no,
            Species::Temperature => &self.temperature,
        }
    }

    /// All columns at one position.
    pub fn point(&self, index: usize) -> Option<SpeciesPoint> {
        if index >= self.len() {
            return None;
        }
        let mut row = [0.0; NUM_OUTPUTS];
        for species in Species::ALL {
            row[species.index()] = self.column(species)[index];
        }
        Some(SpeciesPoint::from_row(row))
    }
}

/// Surface endpoint response: one entry per 5° tile, longitude-major.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SurfaceResponse {
    /// Tile-centre longitude of each cell.
    pub longitude: Vec<f64>,
    /// Tile-centre latitude of each cell.
    pub latitude: Vec<f64>,
    #[serde(flatten)]
    pub species: SpeciesSeries,
}

impl SurfaceResponse {
    pub fn len(&self) -> usize {
        self.longitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitude.is_empty()
    }
}

/// Altitude-profile endpoint response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AltitudeResponse {
    /// Altitude of each sample in km.
    pub altitude: Vec<f64>,
    #[serde(flatten)]
    pub species: SpeciesSeries,
}

/// Exception response for errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionResponse {
    /// Exception type identifier.
    #[serde(rename = "type")]
    pub type_: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// HTTP status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Detailed error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI of the request that caused the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ExceptionResponse {
    /// Create a new exception response.
    pub fn new(type_: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            title: None,
            status: Some(status),
            detail: Some(detail.into()),
            instance: None,
        }
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Create a 400 Bad Request exception.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new("/errors/invalid-parameter-value", 400, detail).with_title("Bad Request")
    }

    /// Create a 406 Not Acceptable exception.
    pub fn not_acceptable(detail: impl Into<String>) -> Self {
        Self::new("/errors/not-acceptable", 406, detail).with_title("Not Acceptable")
    }

    /// Create a 413 Payload Too Large exception.
    pub fn payload_too_large(detail: impl Into<String>) -> Self {
        Self::new("/errors/too-many-points", 413, detail).with_title("Payload Too Large")
    }

    /// Create a 500 Internal Server Error exception.
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new("/errors/model-failure", 500, detail).with_title("Internal Server Error")
    }

    /// Create a 503 Service Unavailable exception.
    pub fn service_unavailable(detail: impl Into<String>) -> Self {
        Self::new("/errors/model-unavailable", 503, detail).with_title("Service Unavailable")
    }
}
