//! Simulated position sensor
//!
//! Sensor error is injected on the position before triangulation, so the
//! estimator sees angles that are consistent with some nearby point rather
//! than independently perturbed angles.

use crate::core::{Covariance2x2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasurementError {
    #[error("invalid standard deviation for {axis}: {value}")]
    InvalidDeviation { axis: &'static str, value: f64 },
}

/// Adds independent zero-mean Gaussian noise to each axis of a true position
#[derive(Debug, Clone)]
pub struct MeasurementGenerator<R = StdRng> {
    sigma_x: f64,
    sigma_y: f64,
    noise_x: Normal<f64>,
    noise_y: Normal<f64>,
    rng: R,
}

impl MeasurementGenerator<StdRng> {
    /// Generator seeded from the operating system
    pub fn new(sigma_x: f64, sigma_y: f64) -> Result<Self, MeasurementError> {
        Self::with_rng(sigma_x, sigma_y, StdRng::from_entropy())
    }

    /// Reproducible generator
    pub fn seeded(sigma_x: f64, sigma_y: f64, seed: u64) -> Result<Self, MeasurementError> {
        Self::with_rng(sigma_x, sigma_y, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MeasurementGenerator<R> {
    pub fn with_rng(sigma_x: f64, sigma_y: f64, rng: R) -> Result<Self, MeasurementError> {
        Ok(Self {
            sigma_x,
            sigma_y,
            noise_x: normal("x", sigma_x)?,
            noise_y: normal("y", sigma_y)?,
            rng,
        })
    }

    pub fn sigma_x(&self) -> f64 {
        self.sigma_x
    }

    pub fn sigma_y(&self) -> f64 {
        self.sigma_y
    }

    /// Covariance of the injected noise
    pub fn covariance(&self) -> Covariance2x2 {
        Covariance2x2::from_std_devs(self.sigma_x(), self.sigma_y())
    }

    /// Noisy observation of `truth`
    pub fn observe(&mut self, truth: Vector2) -> Vector2 {
        let error = Vector2::new(
            self.noise_x.sample(&mut self.rng),
            self.noise_y.sample(&mut self.rng),
        );
        truth + error
    }
}

fn normal(axis: &'static str, sigma: f64) -> Result<Normal<f64>, MeasurementError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(MeasurementError::InvalidDeviation { axis, value: sigma });
    }
    Normal::new(0.0, sigma).map_err(|_| MeasurementError::InvalidDeviation { axis, value: sigma })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_noise_is_exact() {
        let mut generator = MeasurementGenerator::seeded(0.0, 0.0, 1).unwrap();
        let truth = Vector2::new(1.25, 0.75);
        for _ in 0..10 {
            let observed = generator.observe(truth);
            assert_eq!(observed.x, truth.x);
            assert_eq!(observed.y, truth.y);
        }
    }

    #[test]
    fn test_noise_statistics() {
        let (sigma_x, sigma_y) = (0.03, 0.1);
        let mut generator = MeasurementGenerator::seeded(sigma_x, sigma_y, 1234).unwrap();
        let truth = Vector2::new(1.0, 1.0);

        let n = 20_000;
        let samples: Vec<Vector2> = (0..n).map(|_| generator.observe(truth) - truth).collect();

        let mean_x = samples.iter().map(|e| e.x).sum::<f64>() / n as f64;
        let mean_y = samples.iter().map(|e| e.y).sum::<f64>() / n as f64;
        let var_x = samples.iter().map(|e| (e.x - mean_x).powi(2)).sum::<f64>() / n as f64;
        let var_y = samples.iter().map(|e| (e.y - mean_y).powi(2)).sum::<f64>() / n as f64;

        assert!(mean_x.abs() < 0.002);
        assert!(mean_y.abs() < 0.005);
        assert!((var_x.sqrt() - sigma_x).abs() < 0.002);
        assert!((var_y.sqrt() - sigma_y).abs() < 0.005);
    }

    #[test]
    fn test_seeded_generators_repeat() {
        let mut a = MeasurementGenerator::seeded(0.05, 0.05, 99).unwrap();
        let mut b = MeasurementGenerator::seeded(0.05, 0.05, 99).unwrap();
        let truth = Vector2::new(2.0, 0.5);
        for _ in 0..20 {
            let (pa, pb) = (a.observe(truth), b.observe(truth));
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.y, pb.y);
        }
    }

    #[test]
    fn test_invalid_deviation() {
        assert_eq!(
            MeasurementGenerator::seeded(-0.1, 0.1, 0).unwrap_err(),
            MeasurementError::InvalidDeviation { axis: "x", value: -0.1 }
        );
        assert!(MeasurementGenerator::seeded(0.1, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_reported_covariance() {
        let generator = MeasurementGenerator::seeded(0.03, 0.04, 0).unwrap();
        let cov = generator.covariance();
        assert!((cov.var_x - 0.0009).abs() < 1e-12);
        assert!((cov.var_y - 0.0016).abs() < 1e-12);
        assert_eq!(cov.cov_xy, 0.0);
    }
}
