//! MSIS API Service Library
//!
//! This crate provides the HTTP server for NRLMSIS 2.0 atmosphere queries:
//! bulk grids, the global surface map and single-column altitude profiles.

pub mod config;
pub mod content_negotiation;
pub mod handlers;
pub mod limits;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::state::AppState;

/// Build the service router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Model queries
        .route("/msis", post(handlers::bulk::bulk_handler))
        .route("/msis/surface", get(handlers::surface::surface_handler))
        .route("/msis/altitude", get(handlers::altitude::altitude_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        // Every response, errors included, is readable cross-origin
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
}
