//! Filter-free estimator
//!
//! Reports the raw resection fix of every measurement, with the measurement
//! covariance as its uncertainty. Prediction-only steps hold the last fix.
//! Useful as a baseline and for running the simulator without the native
//! Kalman library.

use crate::algorithms::ReferenceTriangle;
use crate::core::{BearingAngles, Covariance2x2, GeometryError, LandmarkSet, Vector2};
use crate::estimator::{
    interface::validate_dt, Estimator, EstimatorError, EstimatorResult, EstimatorState,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ResectionEstimator {
    triangle: ReferenceTriangle,
    measurement_covariance: Covariance2x2,
    last: Option<EstimatorState>,
}

impl ResectionEstimator {
    pub fn new(landmarks: LandmarkSet) -> EstimatorResult<Self> {
        Ok(Self {
            triangle: ReferenceTriangle::new(landmarks)?,
            measurement_covariance: Covariance2x2::ZERO,
            last: None,
        })
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        self.triangle.landmarks()
    }
}

impl Estimator for ResectionEstimator {
    fn initialize(&mut self, x: f64, y: f64) -> EstimatorResult<()> {
        self.last = Some(EstimatorState::new(Vector2::new(x, y), Covariance2x2::ZERO));
        Ok(())
    }

    fn set_measurement_covariance(&mut self, covariance: Covariance2x2) -> EstimatorResult<()> {
        self.measurement_covariance = covariance;
        Ok(())
    }

    fn step(
        &mut self,
        angles: &BearingAngles,
        dt: f64,
        use_measurement: bool,
    ) -> EstimatorResult<EstimatorState> {
        validate_dt(dt)?;
        let last = self.last.ok_or(EstimatorError::NotInitialized)?;

        if !use_measurement {
            return Ok(last);
        }

        let state = match self.triangle.position_from_angles(angles) {
            Ok(position) => EstimatorState::new(position, self.measurement_covariance),
            Err(GeometryError::DangerCircle) => {
                debug!(
                    alpha = angles.alpha,
                    beta = angles.beta,
                    gamma = angles.gamma,
                    "fix on the danger circle, holding last estimate"
                );
                last
            }
            Err(e) => return Err(e.into()),
        };

        self.last = Some(state);
        Ok(state)
    }

    fn name(&self) -> &'static str {
        "resection"
    }
}
