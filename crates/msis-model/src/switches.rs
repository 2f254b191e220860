//! Tracking of the switch vector loaded into a stateful backend.
//!
//! Re-initialising NRLMSIS reads its parameter file, so a backend only
//! re-applies switches when a request asks for different ones.

use msis_protocol::ModelOptions;
use tracing::debug;

use crate::error::ModelError;

/// The switches last applied successfully, if any.
#[derive(Debug, Default)]
pub struct SwitchCache {
    active: Option<ModelOptions>,
}

impl SwitchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ModelOptions> {
        self.active.as_ref()
    }

    /// Run `init` unless `options` are already loaded.
    ///
    /// Returns `true` when `init` ran. A failed `init` leaves the backend in
    /// an unknown state, so the cache is cleared and the next call retries.
    pub fn apply<F>(&mut self, options: &ModelOptions, init: F) -> Result<bool, ModelError>
    where
        F: FnOnce(&ModelOptions) -> Result<(), ModelError>,
    {
        if self.active.as_ref() == Some(options) {
            return Ok(false);
        }

        self.active = None;
        init(options)?;

        debug!("Applied new model switches");
        self.active = Some(*options);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn storm_time() -> ModelOptions {
        let mut switches = [1.0; 25];
        switches[8] = -1.0;
        ModelOptions::new(switches)
    }

    #[test]
    fn test_same_options_initialise_once() {
        let inits = Cell::new(0);
        let init = |_: &ModelOptions| {
            inits.set(inits.get() + 1);
            Ok(())
        };

        let mut cache = SwitchCache::new();
        assert!(cache.apply(&ModelOptions::default(), init).unwrap());
        assert!(!cache.apply(&ModelOptions::default(), init).unwrap());

        assert_eq!(inits.get(), 1);
        assert_eq!(cache.active(), Some(&ModelOptions::default()));
    }

    #[test]
    fn test_different_options_reinitialise() {
        let seen = Cell::new(None);
        let init = |options: &ModelOptions| {
            seen.set(Some(*options));
            Ok(())
        };

        let mut cache = SwitchCache::new();
        cache.apply(&ModelOptions::default(), init).unwrap();
        assert!(cache.apply(&storm_time(), init).unwrap());

        assert_eq!(seen.get(), Some(storm_time()));
        assert_eq!(cache.active(), Some(&storm_time()));

        // Switching back runs init again
        assert!(cache.apply(&ModelOptions::default(), init).unwrap());
        assert_eq!(seen.get(), Some(ModelOptions::default()));
    }

    #[test]
    fn test_failed_init_clears_cache() {
        let mut cache = SwitchCache::new();
        cache
            .apply(&ModelOptions::default(), |_| Ok(()))
            .unwrap();

        let result = cache.apply(&storm_time(), |_| Err(ModelError::InitFailed(3)));
        assert!(matches!(result, Err(ModelError::InitFailed(3))));
        assert_eq!(cache.active(), None);

        // The previous switches are no longer trusted and get re-applied
        let inits = Cell::new(0);
        let reapplied = cache
            .apply(&ModelOptions::default(), |_| {
                inits.set(inits.get() + 1);
                Ok(())
            })
            .unwrap();
        assert!(reapplied);
        assert_eq!(inits.get(), 1);
    }
}
