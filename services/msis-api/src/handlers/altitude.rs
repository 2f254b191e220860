//! Altitude profile handler.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    response::Response,
};
use msis_protocol::{media_types, AltitudeQueryParams, MsisError};
use std::sync::Arc;

use super::common::{json_response, msis_error_response, query_error, run_grid};
use crate::metrics;
use crate::state::AppState;

const ENDPOINT: &str = "altitude";

/// GET /msis/altitude
///
/// One date and location, sampled from 100 to 1000 km every 5 km.
pub async fn altitude_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<AltitudeQueryParams>, QueryRejection>,
) -> Response {
    metrics::record_request(ENDPOINT);

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return msis_error_response(ENDPOINT, &query_error(rejection)),
    };

    match altitude_query(&state, params).await {
        Ok(response) => response,
        Err(e) => msis_error_response(ENDPOINT, &e),
    }
}

async fn altitude_query(
    state: &Arc<AppState>,
    params: AltitudeQueryParams,
) -> Result<Response, MsisError> {
    let grid = params.into_grid()?;
    let (grid, output) = run_grid(state, grid).await?;

    Ok(json_response(
        media_types::JSON,
        &output.altitude_profile(&grid),
    ))
}
