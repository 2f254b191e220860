//! Grid size limit calculation.

use msis_protocol::{GridShape, MsisError, NUM_OUTPUTS};

use crate::config::LimitsConfig;

/// Estimated size of a grid evaluation.
#[derive(Debug, Clone)]
pub struct GridSizeEstimate {
    /// Axis lengths of the grid.
    pub shape: GridShape,

    /// Number of model evaluations.
    pub num_points: usize,

    /// Estimated JSON response size in bytes.
    pub estimated_bytes: usize,
}

impl GridSizeEstimate {
    /// Estimate the work and response size for a grid.
    pub fn for_shape(shape: GridShape) -> Self {
        let num_points = shape.point_count();
        // ~20 bytes per serialized value plus coordinate arrays
        let data_bytes = num_points.saturating_mul(NUM_OUTPUTS * 20);
        let axis_bytes = (shape.nlons + shape.nlats + shape.nalts) * 20;
        let base_overhead = 100;

        Self {
            shape,
            num_points,
            estimated_bytes: data_bytes
                .saturating_add(axis_bytes)
                .saturating_add(base_overhead),
        }
    }

    /// Get estimated size in megabytes.
    pub fn estimated_mb(&self) -> f64 {
        self.estimated_bytes as f64 / (1024.0 * 1024.0)
    }

    /// Check if this estimate exceeds the limits.
    pub fn check_limits(&self, limits: &LimitsConfig) -> Result<(), LimitExceeded> {
        if self.num_points > limits.max_grid_points {
            return Err(LimitExceeded::TooManyPoints {
                requested: self.num_points,
                limit: limits.max_grid_points,
            });
        }

        Ok(())
    }
}

/// Limit exceeded error.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitExceeded {
    TooManyPoints { requested: usize, limit: usize },
}

impl std::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitExceeded::TooManyPoints { requested, limit } => {
                write!(
                    f,
                    "Too many grid points: {} requested, limit is {}",
                    requested, limit
                )
            }
        }
    }
}

impl std::error::Error for LimitExceeded {}

impl From<LimitExceeded> for MsisError {
    fn from(err: LimitExceeded) -> Self {
        match err {
            LimitExceeded::TooManyPoints { requested, limit } => {
                MsisError::TooManyPoints { requested, limit }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_estimate() {
        let estimate = GridSizeEstimate::for_shape(GridShape::new(1, 72, 36, 1));

        assert_eq!(estimate.num_points, 2592);
        assert!(estimate.estimated_bytes > 2592 * NUM_OUTPUTS);
        assert!(estimate.estimated_mb() > 0.0);
    }

    #[test]
    fn test_check_limits_ok() {
        let estimate = GridSizeEstimate::for_shape(GridShape::new(1, 1, 1, 181));
        assert!(estimate.check_limits(&LimitsConfig::default()).is_ok());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let estimate = GridSizeEstimate::for_shape(GridShape::new(1, 10, 10, 100));
        assert_eq!(estimate.num_points, 10_000);
        assert!(estimate.check_limits(&LimitsConfig::default()).is_ok());
    }

    #[test]
    fn test_check_limits_too_many_points() {
        let estimate = GridSizeEstimate::for_shape(GridShape::new(3, 10, 10, 34));
        let result = estimate.check_limits(&LimitsConfig::default());

        assert_eq!(
            result,
            Err(LimitExceeded::TooManyPoints {
                requested: 10_200,
                limit: 10_000
            })
        );
    }

    #[test]
    fn test_custom_limit() {
        let estimate = GridSizeEstimate::for_shape(GridShape::new(1, 1, 1, 181));
        let limits = LimitsConfig {
            max_grid_points: 100,
        };
        assert!(estimate.check_limits(&limits).is_err());
    }

    #[test]
    fn test_limit_exceeded_converts_to_413() {
        let err: MsisError = LimitExceeded::TooManyPoints {
            requested: 20_000,
            limit: 10_000,
        }
        .into();
        assert_eq!(err.status_code(), 413);
        assert!(err.to_string().contains("10000"));
    }
}
