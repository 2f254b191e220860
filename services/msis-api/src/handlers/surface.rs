//! Global surface map handler.

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use msis_protocol::{FeatureCollection, MsisError, SurfaceQueryParams};
use std::sync::Arc;

use super::common::{error_response, json_response, msis_error_response, query_error, run_grid};
use crate::content_negotiation::{negotiate_format, OutputFormat};
use crate::metrics;
use crate::state::AppState;

const ENDPOINT: &str = "surface";

/// GET /msis/surface
///
/// Evaluates one date and altitude on the 5° tile grid. `f=geojson` (or an
/// `application/geo+json` Accept header) returns one polygon per tile.
pub async fn surface_handler(
    Extension(state): Extension<Arc<AppState>>,
    params: Result<Query<SurfaceQueryParams>, QueryRejection>,
    headers: HeaderMap,
) -> Response {
    metrics::record_request(ENDPOINT);

    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return msis_error_response(ENDPOINT, &query_error(rejection)),
    };

    let format = match negotiate_format(&headers, params.f.as_deref()) {
        Ok(format) => format,
        Err(e) => {
            let status = e.status_code();
            metrics::record_error(ENDPOINT, status);
            return error_response(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
                &e.to_exception(),
            );
        }
    };

    match surface_query(&state, params, format).await {
        Ok(response) => response,
        Err(e) => msis_error_response(ENDPOINT, &e),
    }
}

async fn surface_query(
    state: &Arc<AppState>,
    params: SurfaceQueryParams,
    format: OutputFormat,
) -> Result<Response, MsisError> {
    let grid = params.into_grid()?;
    let (grid, output) = run_grid(state, grid).await?;
    let surface = output.surface(&grid);

    Ok(match format {
        OutputFormat::Json => json_response(format.content_type(), &surface),
        OutputFormat::GeoJson => {
            json_response(format.content_type(), &FeatureCollection::from(&surface))
        }
    })
}
