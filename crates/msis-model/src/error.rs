use msis_protocol::MsisError;
use thiserror::Error;

/// Failures raised by an atmosphere model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// No backend is available in this build or deployment.
    #[error("{0}")]
    Unavailable(String),

    /// Switch initialisation was rejected by the native library.
    #[error("model initialisation failed with status {0}")]
    InitFailed(i32),

    /// A single-point evaluation was rejected by the native library.
    #[error("model evaluation failed at row {row} with status {status}")]
    CalcFailed { row: usize, status: i32 },

    /// The backend returned an array that does not match the grid.
    #[error("model returned shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{0}")]
    Backend(String),
}

impl From<ModelError> for MsisError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unavailable(msg) => MsisError::ModelUnavailable(msg),
            other => MsisError::ModelFailure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_to_api_error() {
        let err: MsisError = ModelError::Unavailable("no backend".to_string()).into();
        assert_eq!(err.status_code(), 503);

        let err: MsisError = ModelError::CalcFailed { row: 3, status: 2 }.into();
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("row 3"));
    }
}
