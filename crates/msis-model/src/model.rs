//! The atmosphere model seam.

use msis_protocol::{FlatInputRow, ModelOptions};
use ndarray::Array2;

use crate::error::ModelError;

/// A model that maps flattened grid points to the 11 output columns.
///
/// Implementations must return an `(rows.len(), 11)` array in input order,
/// columns ordered Mass, N2, O2, O, He, H, Ar, N, AnomO, NO, Temperature.
/// Switches arrive with every call; backends that hold global switch state
/// are responsible for applying them before evaluating.
pub trait AtmosphereModel: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Whether the backend can evaluate requests.
    fn is_available(&self) -> bool {
        true
    }

    fn calculate(
        &self,
        rows: &[FlatInputRow],
        options: &ModelOptions,
    ) -> Result<Array2<f64>, ModelError>;
}

/// Placeholder backend used when no model is compiled in.
#[derive(Debug, Clone)]
pub struct UnavailableModel {
    reason: String,
}

impl UnavailableModel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl AtmosphereModel for UnavailableModel {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn calculate(
        &self,
        _rows: &[FlatInputRow],
        _options: &ModelOptions,
    ) -> Result<Array2<f64>, ModelError> {
        Err(ModelError::Unavailable(format!(
            "NRLMSIS backend not loaded: {}",
            self.reason
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_model_refuses() {
        let model = UnavailableModel::new("built without the `native` feature");
        assert!(!model.is_available());

        let err = model.calculate(&[], &ModelOptions::default()).unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
        assert!(err.to_string().contains("native"));
    }
}
