//! Request parsing and validation.
//!
//! The bulk endpoint takes a JSON body; the surface and altitude endpoints
//! take query-string parameters. All of them end in a [`GridRequest`].

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::{MsisError, MsisResult};
use crate::grid::{ApIndex, GridRequest, SpaceWeather};
use crate::options::ModelOptions;
use crate::time::{parse_date, DATE_FORMAT};

/// Fields every bulk request must carry, in validation order.
pub const REQUIRED_BULK_FIELDS: [&str; 7] = ["dates", "lons", "lats", "alts", "f107s", "f107as", "aps"];

/// Parsed body of a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkRequest {
    pub dates: Vec<String>,
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub alts: Vec<f64>,
    pub f107s: Vec<f64>,
    pub f107as: Vec<f64>,
    pub aps: Vec<ApIndex>,
    pub options: Option<ModelOptions>,
}

impl BulkRequest {
    /// Parse a raw JSON body.
    pub fn parse(body: &[u8]) -> MsisResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| MsisError::InvalidBody(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Validate and decode an already-parsed body.
    ///
    /// Presence and list-ness of every required field are checked before any
    /// element is decoded, so the first error names the first offending field.
    pub fn from_json(value: &Value) -> MsisResult<Self> {
        let Some(body) = value.as_object() else {
            return Err(MsisError::InvalidBody("expected a JSON object".to_string()));
        };

        for field in REQUIRED_BULK_FIELDS {
            match body.get(field) {
                None => return Err(MsisError::MissingField(field.to_string())),
                Some(Value::Array(_)) => {}
                Some(_) => return Err(MsisError::NotAnArray(field.to_string())),
            }
        }

        let options = match body.get("options") {
            None | Some(Value::Null) => None,
            Some(value) => Some(ModelOptions::from_json(value)?),
        };

        Ok(Self {
            dates: decode_list(body, "dates")?,
            lons: decode_list(body, "lons")?,
            lats: decode_list(body, "lats")?,
            alts: decode_list(body, "alts")?,
            f107s: decode_list(body, "f107s")?,
            f107as: decode_list(body, "f107as")?,
            aps: decode_list(body, "aps")?,
            options,
        })
    }

    pub fn check_lengths(&self) -> MsisResult<()> {
        let ndates = self.dates.len();
        if self.f107s.len() != ndates || self.f107as.len() != ndates || self.aps.len() != ndates {
            return Err(MsisError::LengthMismatch);
        }
        Ok(())
    }

    /// Number of grid points the request would evaluate.
    pub fn point_count(&self) -> usize {
        self.dates
            .len()
            .saturating_mul(self.lons.len())
            .saturating_mul(self.lats.len())
            .saturating_mul(self.alts.len())
    }

    /// Check lengths and the point ceiling, then parse dates into a grid.
    pub fn into_grid(self, max_points: usize) -> MsisResult<GridRequest> {
        self.check_lengths()?;

        let requested = self.point_count();
        if requested > max_points {
            return Err(MsisError::TooManyPoints {
                requested,
                limit: max_points,
            });
        }

        let dates = self
            .dates
            .iter()
            .enumerate()
            .map(|(i, s)| parse_field_date(&format!("dates[{}]", i), s))
            .collect::<MsisResult<Vec<_>>>()?;

        let space_weather = self
            .f107s
            .iter()
            .zip(&self.f107as)
            .zip(&self.aps)
            .map(|((&f107, &f107a), &ap)| SpaceWeather::new(f107, f107a, ap))
            .collect();

        GridRequest::bulk(
            dates,
            self.lons,
            self.lats,
            self.alts,
            space_weather,
            self.options.unwrap_or_default(),
        )
    }
}

/// Decode every element of a list field, naming the element on failure.
fn decode_list<T: DeserializeOwned>(body: &Map<String, Value>, field: &str) -> MsisResult<Vec<T>> {
    let Some(Value::Array(items)) = body.get(field) else {
        return Err(MsisError::NotAnArray(field.to_string()));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            T::deserialize(item).map_err(|e| MsisError::invalid(format!("{}[{}]", field, i), e.to_string()))
        })
        .collect()
}

fn parse_field_date(field: &str, value: &str) -> MsisResult<NaiveDateTime> {
    parse_date(value).map_err(|e| {
        MsisError::invalid(
            field,
            format!("expected {} (e.g. 2024-03-20T12:00), {}", DATE_FORMAT, e),
        )
    })
}

/// Query parameters for the surface endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurfaceQueryParams {
    pub date: Option<String>,
    pub altitude: Option<String>,
    pub f107: Option<String>,
    pub f107a: Option<String>,
    pub ap: Option<String>,
    /// JSON-encoded 25-element switch array.
    pub options: Option<String>,
    /// Output format (`json` or `geojson`).
    pub f: Option<String>,
}

impl SurfaceQueryParams {
    pub fn into_grid(self) -> MsisResult<GridRequest> {
        let date = parse_field_date("date", required(&self.date, "date")?)?;
        let altitude = parse_number("altitude", required(&self.altitude, "altitude")?)?;
        let weather = parse_space_weather(&self.f107, &self.f107a, &self.ap)?;
        let options = ModelOptions::from_query(self.options.as_deref())?;

        Ok(GridRequest::surface(date, altitude, weather, options))
    }
}

/// Query parameters for the altitude-profile endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AltitudeQueryParams {
    pub date: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub f107: Option<String>,
    pub f107a: Option<String>,
    pub ap: Option<String>,
    /// JSON-encoded 25-element switch array.
    pub options: Option<String>,
}

impl AltitudeQueryParams {
    pub fn into_grid(self) -> MsisResult<GridRequest> {
        let date = parse_field_date("date", required(&self.date, "date")?)?;
        let longitude = parse_number("longitude", required(&self.longitude, "longitude")?)?;
        let latitude = parse_number("latitude", required(&self.latitude, "latitude")?)?;
        let weather = parse_space_weather(&self.f107, &self.f107a, &self.ap)?;
        let options = ModelOptions::from_query(self.options.as_deref())?;

        Ok(GridRequest::altitude_profile(
            date, longitude, latitude, weather, options,
        ))
    }
}

fn parse_space_weather(
    f107: &Option<String>,
    f107a: &Option<String>,
    ap: &Option<String>,
) -> MsisResult<SpaceWeather> {
    let f107 = parse_number("f107", required(f107, "f107")?)?;
    let f107a = parse_number("f107a", required(f107a, "f107a")?)?;
    let ap = parse_ap(required(ap, "ap")?)?;
    Ok(SpaceWeather::new(f107, f107a, ap))
}

/// Required query parameter; blank values count as missing.
fn required<'a>(value: &'a Option<String>, name: &str) -> MsisResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim()),
        _ => Err(MsisError::MissingParameter(name.to_string())),
    }
}

fn parse_number(name: &str, value: &str) -> MsisResult<f64> {
    let parsed: f64 = value
        .parse()
        .map_err(|e| MsisError::invalid(name, format!("'{}' is not a number ({})", value, e)))?;
    if !parsed.is_finite() {
        return Err(MsisError::invalid(name, "must be finite"));
    }
    Ok(parsed)
}

/// A daily Ap number, or a JSON array with the seven-value ap history.
fn parse_ap(value: &str) -> MsisResult<ApIndex> {
    if value.starts_with('[') {
        let history: [f64; 7] = serde_json::from_str(value)
            .map_err(|e| MsisError::invalid("ap", format!("expected 7 ap values ({})", e)))?;
        return Ok(ApIndex::History(history));
    }
    parse_number("ap", value).map(ApIndex::Daily)
}
