//! Estimator interface trait and state

use crate::core::{BearingAngles, Covariance2x2, Vector2};
use crate::estimator::{EstimatorError, EstimatorResult};
use serde::{Deserialize, Serialize};

/// Boundary to the state estimator that turns bearing angles into a position
/// estimate with covariance
pub trait Estimator {
    /// Reset the estimator to a known position with zero uncertainty
    fn initialize(&mut self, x: f64, y: f64) -> EstimatorResult<()>;

    /// Covariance of the position fixes fed to the estimator
    fn set_measurement_covariance(&mut self, covariance: Covariance2x2) -> EstimatorResult<()>;

    /// Advance the estimate by `dt` seconds.
    /// With `use_measurement == false` the angles are ignored and only the
    /// prediction runs.
    fn step(
        &mut self,
        angles: &BearingAngles,
        dt: f64,
        use_measurement: bool,
    ) -> EstimatorResult<EstimatorState>;

    /// Upper bound on the robot acceleration assumed by the process model
    fn set_max_acceleration(&mut self, _max_acceleration: f64) -> EstimatorResult<()> {
        Err(EstimatorError::Unsupported {
            operation: "set_max_acceleration",
        })
    }

    /// Scale of the process noise relative to the acceleration bound
    fn set_process_noise_proportion(&mut self, _proportion: f64) -> EstimatorResult<()> {
        Err(EstimatorError::Unsupported {
            operation: "set_process_noise_proportion",
        })
    }

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Position estimate returned by one estimator step
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorState {
    pub position: Vector2,
    pub covariance: Covariance2x2,
}

impl EstimatorState {
    pub fn new(position: Vector2, covariance: Covariance2x2) -> Self {
        Self {
            position,
            covariance,
        }
    }

    /// Flat `(x, y, var_x, var_y, cov_xy)` form used across the native boundary
    pub fn to_tuple(&self) -> (f64, f64, f64, f64, f64) {
        (
            self.position.x,
            self.position.y,
            self.covariance.var_x,
            self.covariance.var_y,
            self.covariance.cov_xy,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite() && self.covariance.is_finite()
    }

    /// Reject NaN or infinite output
    pub fn checked(self) -> EstimatorResult<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            let (x, y, var_x, var_y, cov_xy) = self.to_tuple();
            Err(EstimatorError::Diverged {
                x,
                y,
                var_x,
                var_y,
                cov_xy,
            })
        }
    }
}

impl From<(f64, f64, f64, f64, f64)> for EstimatorState {
    fn from((x, y, var_x, var_y, cov_xy): (f64, f64, f64, f64, f64)) -> Self {
        Self {
            position: Vector2::new(x, y),
            covariance: Covariance2x2::new(var_x, var_y, cov_xy),
        }
    }
}

/// Timesteps must be finite and non-negative
pub fn validate_dt(dt: f64) -> EstimatorResult<f64> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(EstimatorError::InvalidTimestep { dt })
    }
}
