//! NRLMSIS switch vector.
//!
//! The model takes 25 switches. Index 0 is F10.7, 1 time independent, 2-5 the
//! annual/semiannual terms, 6-7 diurnal/semidiurnal, 8 geomagnetic activity
//! (`1.0` daily Ap, `-1.0` storm-time ap history), 9-12 UT/longitude effects
//! and 13 terdiurnal. Switches 14-24 are unused by NRLMSIS 2.0.

use serde_json::Value;

use crate::errors::{MsisError, MsisResult};

/// Number of switches the model accepts.
pub const NUM_SWITCHES: usize = 25;

const WRONG_LENGTH: &str = "options requires a length 25 array";

/// Model switches passed alongside every model invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelOptions([f64; NUM_SWITCHES]);

impl Default for ModelOptions {
    fn default() -> Self {
        Self([1.0; NUM_SWITCHES])
    }
}

impl ModelOptions {
    /// Create options from a full switch vector.
    pub fn new(switches: [f64; NUM_SWITCHES]) -> Self {
        Self(switches)
    }

    /// Build options from a slice, rejecting anything that is not 25 long.
    pub fn from_slice(values: &[f64]) -> MsisResult<Self> {
        let switches: [f64; NUM_SWITCHES] = values
            .try_into()
            .map_err(|_| MsisError::InvalidOptions(WRONG_LENGTH.to_string()))?;
        Ok(Self(switches))
    }

    /// Parse a JSON-encoded array such as `"[1,1,...,1]"`.
    pub fn parse_str(encoded: &str) -> MsisResult<Self> {
        let values: Vec<f64> = serde_json::from_str(encoded.trim()).map_err(|e| {
            MsisError::InvalidOptions(format!("options must be a JSON array of numbers: {}", e))
        })?;
        Self::from_slice(&values)
    }

    /// Accept either a decoded JSON array or a string holding one.
    pub fn from_json(value: &Value) -> MsisResult<Self> {
        match value {
            Value::String(encoded) => Self::parse_str(encoded),
            Value::Array(items) => {
                let values = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        item.as_f64().ok_or_else(|| {
                            MsisError::invalid(format!("options[{}]", i), "expected a number")
                        })
                    })
                    .collect::<MsisResult<Vec<f64>>>()?;
                Self::from_slice(&values)
            }
            _ => Err(MsisError::InvalidOptions(WRONG_LENGTH.to_string())),
        }
    }

    /// Parse an optional query-string value, defaulting to all switches on.
    pub fn from_query(encoded: Option<&str>) -> MsisResult<Self> {
        match encoded {
            Some(s) if !s.trim().is_empty() => Self::parse_str(s),
            _ => Ok(Self::default()),
        }
    }

    /// The switch values.
    pub fn switches(&self) -> &[f64; NUM_SWITCHES] {
        &self.0
    }

    /// Switches narrowed to single precision for the native model.
    pub fn to_f32(&self) -> [f32; NUM_SWITCHES] {
        self.0.map(|v| v as f32)
    }

    /// Whether storm-time ap mode (switch 9 set to -1) is selected.
    pub fn storm_time_ap(&self) -> bool {
        self.0[8] == -1.0
    }
}
