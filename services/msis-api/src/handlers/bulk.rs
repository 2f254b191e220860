//! Bulk grid handler.

use axum::{body::Bytes, extract::Extension, response::Response};
use msis_protocol::{media_types, BulkRequest, MsisError};
use std::sync::Arc;

use super::common::{json_response, msis_error_response, run_grid};
use crate::metrics;
use crate::state::AppState;

const ENDPOINT: &str = "bulk";

/// POST /msis
///
/// Body: `{dates, lons, lats, alts, f107s, f107as, aps, options?}`. Responds
/// with a nested `[date][lon][lat][alt][11]` array.
pub async fn bulk_handler(Extension(state): Extension<Arc<AppState>>, body: Bytes) -> Response {
    metrics::record_request(ENDPOINT);

    match bulk_query(&state, &body).await {
        Ok(response) => response,
        Err(e) => msis_error_response(ENDPOINT, &e),
    }
}

async fn bulk_query(state: &Arc<AppState>, body: &[u8]) -> Result<Response, MsisError> {
    let request = BulkRequest::parse(body)?;
    let grid = request.into_grid(state.config.limits.max_grid_points)?;
    let (_, output) = run_grid(state, grid).await?;

    Ok(json_response(media_types::JSON, &output.to_nested()))
}
