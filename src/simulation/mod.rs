//! Step-driven simulation of a robot tracked by bearing angles
//!
//! Every tick moves the robot, samples a noisy observation, turns it into
//! bearing angles, runs one estimator step and extracts the confidence
//! ellipse of the result.

mod frame;

pub use frame::Frame;

use crate::algorithms::{angles_to_landmarks, confidence_ellipse};
use crate::core::{GeometryError, KinematicState, Vector2};
use crate::estimator::{Estimator, EstimatorError};
use crate::processing::{MeasurementError, MeasurementGenerator, MeasurementScheduler, MotionModel};
use crate::render::Drawable;
use crate::utils::{validate_config, ConfigError, EstimatorTuning, SimulationConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Measurement(#[from] MeasurementError),

    #[error("estimator failed: {0}")]
    Estimator(#[from] EstimatorError),
}

/// Robot, sensor and estimator wired together
pub struct Simulation<E, R = StdRng> {
    config: SimulationConfig,
    motion: MotionModel,
    scheduler: MeasurementScheduler,
    sensor: MeasurementGenerator<R>,
    estimator: E,
    state: KinematicState,
    tick: u64,
    time: f64,
}

impl<E: Estimator> Simulation<E, StdRng> {
    /// Simulation with sensor noise seeded from `config.seed`, or entropy
    pub fn new(config: SimulationConfig, estimator: E) -> Result<Self, SimulationError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, estimator, rng)
    }
}

impl<E: Estimator, R: Rng> Simulation<E, R> {
    pub fn with_rng(
        config: SimulationConfig,
        mut estimator: E,
        rng: R,
    ) -> Result<Self, SimulationError> {
        validate_config(&config).into_result()?;

        let m = &config.measurement;
        let sensor = MeasurementGenerator::with_rng(m.sigma_x, m.sigma_y, rng)?;

        let start = config.initial_position;
        estimator.initialize(start.x, start.y)?;
        estimator.set_measurement_covariance(config.measurement_covariance())?;
        apply_tuning(&mut estimator, &config.estimator)?;

        info!(
            estimator = estimator.name(),
            x = start.x,
            y = start.y,
            frame_rate_hz = config.frame_rate_hz,
            measurement_hz = m.frequency_hz,
            "simulation ready"
        );

        Ok(Self {
            motion: MotionModel::new(config.max_speed, config.arena),
            scheduler: MeasurementScheduler::new(m.frequency_hz),
            sensor,
            estimator,
            state: KinematicState::at_rest(start),
            tick: 0,
            time: 0.0,
            config,
        })
    }

    /// Advance by `dt` seconds while the robot pushes in the direction of `acc`
    pub fn tick(&mut self, acc: Vector2, dt: f64) -> Result<Frame, SimulationError> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid timestep");
            0.0
        };

        // the clock moves with the robot even if the estimate below fails
        self.motion.step(&mut self.state, acc, dt);
        let due = self.scheduler.advance(dt);
        self.tick += 1;
        self.time += dt;

        let truth = self.state.position;
        let observed = self.sensor.observe(truth);
        let angles = match angles_to_landmarks(observed, &self.config.landmarks) {
            Ok(angles) => Some(angles),
            Err(GeometryError::CoincidentWithLandmark { landmark, .. }) => {
                debug!(%landmark, "observation on a landmark, prediction only");
                None
            }
            Err(e) => return Err(e.into()),
        };

        let measured = due && angles.is_some();
        let estimate = self
            .estimator
            .step(&angles.unwrap_or_default(), dt, measured)?;
        let ellipse =
            confidence_ellipse(estimate.position, &estimate.covariance, self.config.confidence)?;

        Ok(Frame {
            tick: self.tick,
            time: self.time,
            truth: Drawable::truth(truth),
            estimate: Drawable::estimate(&estimate),
            estimate_ellipse: ellipse,
            angles,
            measured,
        })
    }

    /// Tick at the configured frame rate
    pub fn tick_frame(&mut self, acc: Vector2) -> Result<Frame, SimulationError> {
        let dt = self.config.frame_dt();
        self.tick(acc, dt)
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Simulated seconds elapsed
    pub fn time(&self) -> f64 {
        self.time
    }
}

/// Forward the configured knobs; estimators without them only log
fn apply_tuning<E: Estimator>(
    estimator: &mut E,
    tuning: &EstimatorTuning,
) -> Result<(), EstimatorError> {
    if let Some(max_acceleration) = tuning.max_acceleration {
        ignore_unsupported(estimator.name(), estimator.set_max_acceleration(max_acceleration))?;
    }
    if let Some(proportion) = tuning.process_noise_proportion {
        ignore_unsupported(estimator.name(), estimator.set_process_noise_proportion(proportion))?;
    }
    Ok(())
}

fn ignore_unsupported(
    name: &str,
    result: Result<(), EstimatorError>,
) -> Result<(), EstimatorError> {
    match result {
        Err(EstimatorError::Unsupported { operation }) => {
            warn!(estimator = name, operation, "estimator ignores tuning");
            Ok(())
        }
        other => other,
    }
}
