//! Estimator error types

use crate::core::GeometryError;
use thiserror::Error;

/// Failures at the estimator boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    /// Optional operation the implementation does not provide
    #[error("estimator does not support {operation}")]
    Unsupported { operation: &'static str },

    /// The native library keeps global state and is already bound
    #[error("native estimator is already in use")]
    AlreadyInUse,

    #[error("estimator stepped before initialize")]
    NotInitialized,

    #[error("invalid timestep {dt}")]
    InvalidTimestep { dt: f64 },

    /// The filter returned NaN or infinite values
    #[error("estimator diverged: ({x}, {y}) var ({var_x}, {var_y}) cov {cov_xy}")]
    Diverged {
        x: f64,
        y: f64,
        var_x: f64,
        var_y: f64,
        cov_xy: f64,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type for estimator operations
pub type EstimatorResult<T> = Result<T, EstimatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EstimatorError::Unsupported {
            operation: "set_max_acceleration",
        };
        assert_eq!(err.to_string(), "estimator does not support set_max_acceleration");

        let err: EstimatorError = GeometryError::DangerCircle.into();
        assert_eq!(err.to_string(), GeometryError::DangerCircle.to_string());
    }
}
