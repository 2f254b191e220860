//! Request metrics.
//!
//! Recorded through the `metrics` facade; the binary installs the Prometheus
//! recorder that `/metrics` renders. Without a recorder these are no-ops.

use std::time::Duration;

use metrics::{counter, histogram};

/// Count a request to a model endpoint.
pub fn record_request(endpoint: &'static str) {
    counter!("msis_requests_total", "endpoint" => endpoint).increment(1);
}

/// Count a failed request, labelled with its HTTP status.
pub fn record_error(endpoint: &'static str, status: u16) {
    counter!(
        "msis_request_errors_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record the size of an evaluated grid.
pub fn record_grid_points(endpoint: &'static str, points: usize) {
    histogram!("msis_grid_points", "endpoint" => endpoint).record(points as f64);
}

/// Record how long the model took.
pub fn record_model_duration(endpoint: &'static str, elapsed: Duration) {
    histogram!("msis_model_duration_seconds", "endpoint" => endpoint)
        .record(elapsed.as_secs_f64());
}
