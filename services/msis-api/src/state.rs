//! Application state for the MSIS API.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use msis_model::AtmosphereModel;
use std::sync::Arc;

use crate::config::ApiConfig;

/// Shared application state.
pub struct AppState {
    /// Service configuration.
    pub config: ApiConfig,

    /// Atmosphere model backend.
    pub model: Arc<dyn AtmosphereModel>,

    /// Prometheus recorder handle, when one is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new AppState, loading the model backend named by `config`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let model = msis_model::load_backend(config.model.parm_path.as_deref())
            .context("Failed to load NRLMSIS backend")?;

        if model.is_available() {
            tracing::info!(model = model.name(), "Model backend loaded");
        } else {
            tracing::warn!(
                model = model.name(),
                "No model backend available, model endpoints will answer 503"
            );
        }

        Ok(Self::with_model(config, model))
    }

    /// Create an AppState around an already constructed model.
    pub fn with_model(config: ApiConfig, model: Arc<dyn AtmosphereModel>) -> Self {
        Self {
            config,
            model,
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
