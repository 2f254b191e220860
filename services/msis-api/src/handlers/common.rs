//! Shared handler plumbing: grid evaluation and response building.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::rejection::QueryRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use msis_model::{evaluate, GridOutput};
use msis_protocol::{media_types, ExceptionResponse, GridKind, GridRequest, MsisError};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::limits::GridSizeEstimate;
use crate::metrics;
use crate::state::AppState;

/// Evaluate a grid on the blocking pool.
///
/// Only bulk grids are checked against the configured point ceiling; the
/// surface map and altitude profile have fixed sizes.
///
/// The grid is handed back alongside the output so callers can label the
/// response axes.
pub async fn run_grid(
    state: &Arc<AppState>,
    grid: GridRequest,
) -> Result<(GridRequest, GridOutput), MsisError> {
    let endpoint = grid.kind.as_str();
    let estimate = GridSizeEstimate::for_shape(grid.shape());
    if grid.kind == GridKind::Bulk {
        estimate.check_limits(&state.config.limits)?;
    }
    if grid.broadcasts_daily_ap_in_storm_mode() {
        warn!(
            endpoint,
            "Storm-time ap switch set with a daily Ap; using it for all seven ap values"
        );
    }

    debug!(
        endpoint,
        points = estimate.num_points,
        estimated_mb = estimate.estimated_mb(),
        "Evaluating grid"
    );
    metrics::record_grid_points(endpoint, estimate.num_points);

    let model = Arc::clone(&state.model);
    let start = Instant::now();
    let (grid, result) = tokio::task::spawn_blocking(move || {
        let result = evaluate(model.as_ref(), &grid);
        (grid, result)
    })
    .await
    .map_err(|e| MsisError::ModelFailure(format!("model task failed: {}", e)))?;
    metrics::record_model_duration(endpoint, start.elapsed());

    Ok((grid, result?))
}

/// A query string the extractor could not deserialize, such as a repeated
/// parameter or a non-numeric altitude.
pub fn query_error(rejection: QueryRejection) -> MsisError {
    MsisError::invalid("query", rejection.body_text())
}

/// Serialize a successful response body.
pub fn json_response<T: Serialize>(content_type: &'static str, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type)],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to serialize response: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &ExceptionResponse::internal_error("Failed to serialize response"),
            )
        }
    }
}

/// Build a problem-document error response.
pub fn error_response(status: StatusCode, exc: &ExceptionResponse) -> Response {
    let json = serde_json::to_string(exc).unwrap_or_default();
    (
        status,
        [(header::CONTENT_TYPE, media_types::PROBLEM_JSON)],
        json,
    )
        .into_response()
}

/// Log, count and render a failed request.
pub fn msis_error_response(endpoint: &'static str, err: &MsisError) -> Response {
    let status = err.status_code();
    if err.is_client_error() {
        warn!(endpoint, status, error = %err, "Rejected request");
    } else {
        error!(endpoint, status, error = %err, "Request failed");
    }
    metrics::record_error(endpoint, status);

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, &err.to_exception())
}
