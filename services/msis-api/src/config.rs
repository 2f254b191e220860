//! Service configuration loading and types.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration loaded from `config/msis-api.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Request size limits.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Model backend settings.
    #[serde(default)]
    pub model: ModelConfig,
}

impl ApiConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!(
                "MSIS config file {} does not exist, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config: ApiConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse: {:?}", path))?;

        tracing::info!(
            max_grid_points = config.limits.max_grid_points,
            parm_path = ?config.model.parm_path,
            "Loaded MSIS config from {:?}",
            path
        );

        Ok(config)
    }
}

/// Request size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum number of grid points evaluated per request.
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_grid_points: default_max_grid_points(),
        }
    }
}

fn default_max_grid_points() -> usize {
    10_000
}

/// Model backend settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding `msis20.parm`.
    #[serde(default)]
    pub parm_path: Option<PathBuf>,
}
