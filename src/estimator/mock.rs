//! Scripted estimator for testing and development

use crate::core::{BearingAngles, Covariance2x2};
use crate::estimator::{
    interface::validate_dt, Estimator, EstimatorError, EstimatorResult, EstimatorState,
};
use std::collections::VecDeque;

/// One call received by a [`StubEstimator`]
#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorCall {
    Initialize { x: f64, y: f64 },
    SetMeasurementCovariance(Covariance2x2),
    Step {
        angles: BearingAngles,
        dt: f64,
        use_measurement: bool,
    },
    SetMaxAcceleration(f64),
    SetProcessNoiseProportion(f64),
}

/// In-memory estimator double.
///
/// Each step returns the next scripted state, or repeats the fallback state
/// once the script is exhausted. Every call is recorded.
#[derive(Debug, Clone)]
pub struct StubEstimator {
    script: VecDeque<EstimatorState>,
    fallback: EstimatorState,
    calls: Vec<EstimatorCall>,
    supports_tuning: bool,
    initialized: bool,
}

impl StubEstimator {
    /// Estimator that always answers with `state`
    pub fn echo(state: EstimatorState) -> Self {
        Self {
            script: VecDeque::new(),
            fallback: state,
            calls: Vec::new(),
            supports_tuning: false,
            initialized: false,
        }
    }

    /// Queue a state to be returned by the next unanswered step
    pub fn push_state(&mut self, state: EstimatorState) {
        self.script.push_back(state);
    }

    /// Accept the optional tuning calls instead of reporting them unsupported
    pub fn with_tuning(mut self, enabled: bool) -> Self {
        self.supports_tuning = enabled;
        self
    }

    pub fn calls(&self) -> &[EstimatorCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of steps taken, with and without measurement
    pub fn step_count(&self) -> (usize, usize) {
        self.calls.iter().fold((0, 0), |(with, without), call| match call {
            EstimatorCall::Step {
                use_measurement: true,
                ..
            } => (with + 1, without),
            EstimatorCall::Step { .. } => (with, without + 1),
            _ => (with, without),
        })
    }

    pub fn queued_state_count(&self) -> usize {
        self.script.len()
    }
}

impl Default for StubEstimator {
    fn default() -> Self {
        Self::echo(EstimatorState::default())
    }
}

impl Estimator for StubEstimator {
    fn initialize(&mut self, x: f64, y: f64) -> EstimatorResult<()> {
        self.calls.push(EstimatorCall::Initialize { x, y });
        self.initialized = true;
        Ok(())
    }

    fn set_measurement_covariance(&mut self, covariance: Covariance2x2) -> EstimatorResult<()> {
        self.calls.push(EstimatorCall::SetMeasurementCovariance(covariance));
        Ok(())
    }

    fn step(
        &mut self,
        angles: &BearingAngles,
        dt: f64,
        use_measurement: bool,
    ) -> EstimatorResult<EstimatorState> {
        if !self.initialized {
            return Err(EstimatorError::NotInitialized);
        }
        let dt = validate_dt(dt)?;

        self.calls.push(EstimatorCall::Step {
            angles: *angles,
            dt,
            use_measurement,
        });

        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }

    fn set_max_acceleration(&mut self, max_acceleration: f64) -> EstimatorResult<()> {
        if !self.supports_tuning {
            return Err(EstimatorError::Unsupported {
                operation: "set_max_acceleration",
            });
        }
        self.calls.push(EstimatorCall::SetMaxAcceleration(max_acceleration));
        Ok(())
    }

    fn set_process_noise_proportion(&mut self, proportion: f64) -> EstimatorResult<()> {
        if !self.supports_tuning {
            return Err(EstimatorError::Unsupported {
                operation: "set_process_noise_proportion",
            });
        }
        self.calls.push(EstimatorCall::SetProcessNoiseProportion(proportion));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
