//! Atmosphere model interface.
//!
//! The physics lives in an external model (NRLMSIS 2.0). This crate hides it
//! behind [`AtmosphereModel`], evaluates a whole [`GridRequest`] in one call
//! and reshapes the flat `(N, 11)` result back onto the request's axes.
//!
//! [`GridRequest`]: msis_protocol::GridRequest

pub mod error;
pub mod model;
#[cfg(feature = "native")]
pub mod native;
pub mod output;
pub mod runner;
pub mod switches;

use std::path::Path;
use std::sync::Arc;

pub use error::ModelError;
pub use model::{AtmosphereModel, UnavailableModel};
#[cfg(feature = "native")]
pub use native::NativeMsis;
pub use output::GridOutput;
pub use runner::evaluate;
pub use switches::SwitchCache;

/// Load the NRLMSIS 2.0 native backend.
#[cfg(feature = "native")]
pub fn load_backend(parm_path: Option<&Path>) -> Result<Arc<dyn AtmosphereModel>, ModelError> {
    Ok(Arc::new(NativeMsis::new(parm_path)?))
}

/// Without the `native` feature there is no model to load; the returned
/// backend reports itself unavailable and refuses every evaluation.
#[cfg(not(feature = "native"))]
pub fn load_backend(parm_path: Option<&Path>) -> Result<Arc<dyn AtmosphereModel>, ModelError> {
    if let Some(path) = parm_path {
        tracing::warn!(
            parm_path = %path.display(),
            "Model parameter file configured but the native backend is not compiled in"
        );
    }
    Ok(Arc::new(UnavailableModel::new(
        "built without the `native` feature",
    )))
}
