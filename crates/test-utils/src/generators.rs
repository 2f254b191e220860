//! Deterministic stand-ins for the atmosphere model.
//!
//! The service under test sees these through `Arc<dyn AtmosphereModel>`,
//! so tests can check exactly which inputs reached each output cell.

use std::sync::atomic::{AtomicUsize, Ordering};

use msis_model::{AtmosphereModel, ModelError};
use msis_protocol::{FlatInputRow, ModelOptions, Species, NUM_OUTPUTS};
use ndarray::Array2;

/// Echoes each row's inputs into its output columns.
///
/// | column      | value              |
/// |-------------|--------------------|
/// | Mass        | altitude           |
/// | N2          | latitude           |
/// | O2          | longitude          |
/// | O           | day of year        |
/// | He          | seconds of day     |
/// | H           | F10.7              |
/// | Ar          | 81-day F10.7       |
/// | N           | ap[0]              |
/// | AnomO       | switch 0           |
/// | NO          | NaN (fill value)   |
/// | Temperature | ap[6]              |
#[derive(Debug, Default)]
pub struct SyntheticModel {
    calls: AtomicUsize,
}

impl SyntheticModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `calculate` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The row this model produces for a single input.
    pub fn expected_row(row: &FlatInputRow, options: &ModelOptions) -> [f64; NUM_OUTPUTS] {
        let mut out = [0.0; NUM_OUTPUTS];
        out[Species::Mass.index()] = row.altitude;
        out[Species::N2.index()] = row.latitude;
        out[Species::O2.index()] = row.longitude;
        out[Species::O.index()] = row.day_of_year;
        out[Species::He.index()] = row.seconds_of_day;
        out[Species::H.index()] = row.f107;
        out[Species::Ar.index()] = row.f107a;
        out[Species::N.index()] = row.ap[0];
        out[Species::AnomalousO.index()] = options.switches()[0];
        out[Species::NO.index()] = f64::NAN;
        out[Species::Temperature.index()] = row.ap[6];
        out
    }
}

impl AtmosphereModel for SyntheticModel {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn calculate(
        &self,
        rows: &[FlatInputRow],
        options: &ModelOptions,
    ) -> Result<Array2<f64>, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out = Array2::zeros((rows.len(), NUM_OUTPUTS));
        for (i, row) in rows.iter().enumerate() {
            for (k, value) in Self::expected_row(row, options).into_iter().enumerate() {
                out[[i, k]] = value;
            }
        }
        Ok(out)
    }
}

/// Fails every call with a non-zero status.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingModel;

impl AtmosphereModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn calculate(
        &self,
        _rows: &[FlatInputRow],
        _options: &ModelOptions,
    ) -> Result<Array2<f64>, ModelError> {
        Err(ModelError::CalcFailed { row: 0, status: 1 })
    }
}
