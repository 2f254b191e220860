//! MSIS API error types.

use thiserror::Error;

use crate::responses::ExceptionResponse;

/// Result type alias using MsisError.
pub type MsisResult<T> = Result<T, MsisError>;

/// Errors that can occur while serving an atmosphere query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MsisError {
    // === Client input errors ===
    /// A required body field is absent.
    #[error("{0} is required as input.")]
    MissingField(String),

    /// A body field that must be a list is something else.
    #[error("{0} must be an iterable.")]
    NotAnArray(String),

    /// A required query-string parameter is absent.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A field or parameter could not be parsed.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// The request body is not a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The per-date arrays do not line up with `dates`.
    #[error("Dates, F107, F107a, and Ap must be the same length.")]
    LengthMismatch,

    /// The requested grid is larger than the configured ceiling.
    #[error("Too many calculations requested. The maximum number of points is {limit}")]
    TooManyPoints { requested: usize, limit: usize },

    /// The model switch vector is malformed.
    #[error("{0}")]
    InvalidOptions(String),

    /// Unsupported output format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    // === Model errors ===
    /// The atmosphere model failed to evaluate the grid.
    #[error("Model evaluation failed: {0}")]
    ModelFailure(String),

    /// No atmosphere model backend is loaded.
    #[error("Model backend unavailable: {0}")]
    ModelUnavailable(String),
}

impl MsisError {
    /// Shorthand for an [`MsisError::InvalidValue`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        MsisError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by the client's input.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            MsisError::MissingField(_) => 400,
            MsisError::NotAnArray(_) => 400,
            MsisError::MissingParameter(_) => 400,
            MsisError::InvalidValue { .. } => 400,
            MsisError::InvalidBody(_) => 400,
            MsisError::LengthMismatch => 400,
            MsisError::TooManyPoints { .. } => 413,
            MsisError::InvalidOptions(_) => 400,
            MsisError::UnsupportedFormat(_) => 400,
            MsisError::ModelFailure(_) => 500,
            MsisError::ModelUnavailable(_) => 503,
        }
    }

    /// Convert to an ExceptionResponse.
    pub fn to_exception(&self) -> ExceptionResponse {
        let detail = self.to_string();
        match self {
            MsisError::TooManyPoints { .. } => ExceptionResponse::payload_too_large(detail),
            MsisError::ModelFailure(_) => ExceptionResponse::internal_error(detail),
            MsisError::ModelUnavailable(_) => ExceptionResponse::service_unavailable(detail),
            _ => ExceptionResponse::bad_request(detail),
        }
    }
}
