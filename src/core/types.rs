//! Core data types for the positioning simulator

use crate::core::constants::{
    ARENA_HEIGHT, ARENA_WIDTH, CHI2_2DOF_90, CHI2_2DOF_95, CHI2_2DOF_99,
};
use crate::core::error::{GeometryError, GeometryResult, LandmarkId};
use crate::core::vector::Vector2;
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// The three fixed beacons used as bearing references.
///
/// Order matters: angles are always measured towards (B,C), (C,A), (A,B).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSet {
    pub a: Vector2,
    pub b: Vector2,
    pub c: Vector2,
}

impl LandmarkSet {
    pub fn new(a: Vector2, b: Vector2, c: Vector2) -> Self {
        Self { a, b, c }
    }

    pub fn get(&self, id: LandmarkId) -> Vector2 {
        match id {
            LandmarkId::A => self.a,
            LandmarkId::B => self.b,
            LandmarkId::C => self.c,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LandmarkId, Vector2)> {
        [
            (LandmarkId::A, self.a),
            (LandmarkId::B, self.b),
            (LandmarkId::C, self.c),
        ]
        .into_iter()
    }

    /// Twice the signed area of triangle ABC (positive when counter-clockwise)
    pub fn signed_area2(&self) -> f64 {
        (self.b - self.a).cross(&(self.c - self.a))
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self {
            a: Vector2::new(3.0, 1.0),
            b: Vector2::new(0.0, 2.0),
            c: Vector2::new(0.0, 0.0),
        }
    }
}

/// Bearing differences observed from one position, radians in `[0, 2π)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BearingAngles {
    /// Angle from the direction of B to the direction of C
    pub alpha: f64,
    /// Angle from the direction of C to the direction of A
    pub beta: f64,
    /// Angle from the direction of A to the direction of B
    pub gamma: f64,
}

impl BearingAngles {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn sum(&self) -> f64 {
        self.alpha + self.beta + self.gamma
    }

    /// Whether the three angles close a full turn within `tolerance`
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        (self.sum() - TAU).abs() < tolerance
    }
}

/// Position and velocity of the simulated robot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vector2,
    pub velocity: Vector2,
}

impl KinematicState {
    pub fn at_rest(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
        }
    }
}

/// Rectangular arena `[0, width] x [0, height]` in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, p: &Vector2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp each axis independently into the arena
    pub fn clamp(&self, p: Vector2) -> Vector2 {
        Vector2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ARENA_WIDTH, ARENA_HEIGHT)
    }
}

/// Symmetric 2x2 position covariance `[[var_x, cov_xy], [cov_xy, var_y]]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Covariance2x2 {
    pub var_x: f64,
    pub var_y: f64,
    pub cov_xy: f64,
}

impl Covariance2x2 {
    pub const ZERO: Covariance2x2 = Covariance2x2 {
        var_x: 0.0,
        var_y: 0.0,
        cov_xy: 0.0,
    };

    pub fn new(var_x: f64, var_y: f64, cov_xy: f64) -> Self {
        Self { var_x, var_y, cov_xy }
    }

    /// Uncorrelated covariance from per-axis standard deviations
    pub fn from_std_devs(sigma_x: f64, sigma_y: f64) -> Self {
        Self::new(sigma_x * sigma_x, sigma_y * sigma_y, 0.0)
    }

    pub fn is_zero(&self) -> bool {
        self.var_x == 0.0 && self.var_y == 0.0 && self.cov_xy == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.var_x.is_finite() && self.var_y.is_finite() && self.cov_xy.is_finite()
    }

    pub fn trace(&self) -> f64 {
        self.var_x + self.var_y
    }

    pub fn determinant(&self) -> f64 {
        self.var_x * self.var_y - self.cov_xy * self.cov_xy
    }

    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.var_x, self.cov_xy, self.cov_xy, self.var_y)
    }

    /// Build from a matrix, averaging the off-diagonal terms
    pub fn from_matrix(m: &Matrix2<f64>) -> Self {
        Self::new(m[(0, 0)], m[(1, 1)], 0.5 * (m[(0, 1)] + m[(1, 0)]))
    }
}

/// Derived confidence ellipse; never mutated, recomputed per covariance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseDescriptor {
    pub center: Vector2,
    pub semi_major: f64,
    pub semi_minor: f64,
    /// Angle of the major axis from the x axis (radians)
    pub rotation: f64,
}

impl EllipseDescriptor {
    /// True when the major axis is no longer than `min_size`
    pub fn is_degenerate(&self, min_size: f64) -> bool {
        self.semi_major <= min_size
    }
}

/// Probability mass enclosed by a confidence ellipse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "level", content = "quantile")]
pub enum ConfidenceLevel {
    P90,
    P95,
    P99,
    /// Explicit chi-square quantile for 2 degrees of freedom
    Custom(f64),
}

impl ConfidenceLevel {
    pub fn chi_square_quantile(&self) -> f64 {
        match self {
            ConfidenceLevel::P90 => CHI2_2DOF_90,
            ConfidenceLevel::P95 => CHI2_2DOF_95,
            ConfidenceLevel::P99 => CHI2_2DOF_99,
            ConfidenceLevel::Custom(q) => *q,
        }
    }

    pub fn validate(&self) -> GeometryResult<f64> {
        let quantile = self.chi_square_quantile();
        if quantile.is_finite() && quantile > 0.0 {
            Ok(quantile)
        } else {
            Err(GeometryError::InvalidQuantile { quantile })
        }
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::P95
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_landmarks_are_counter_clockwise() {
        let landmarks = LandmarkSet::default();
        assert!(landmarks.signed_area2() > 0.0);
        assert_eq!(landmarks.get(LandmarkId::B), Vector2::new(0.0, 2.0));
        assert_eq!(landmarks.iter().count(), 3);
    }

    #[test]
    fn test_arena_clamp() {
        let arena = Arena::default();
        assert_eq!(arena.clamp(Vector2::new(-1.0, 5.0)), Vector2::new(0.0, 2.0));
        assert_eq!(arena.clamp(Vector2::new(1.5, 1.0)), Vector2::new(1.5, 1.0));
        assert!(arena.contains(&Vector2::new(3.0, 0.0)));
        assert!(!arena.contains(&Vector2::new(3.01, 0.0)));
    }

    #[test]
    fn test_covariance_matrix_view() {
        let cov = Covariance2x2::new(2.0, 3.0, 0.5);
        let m = cov.to_matrix();
        assert_eq!(m[(0, 1)], m[(1, 0)]);
        assert_eq!(Covariance2x2::from_matrix(&m), cov);
        assert!((cov.determinant() - 5.75).abs() < 1e-12);
        assert!(Covariance2x2::ZERO.is_zero());
        let from_sigma = Covariance2x2::from_std_devs(0.03, 0.05);
        assert!((from_sigma.var_x - 0.0009).abs() < 1e-15);
        assert!((from_sigma.var_y - 0.0025).abs() < 1e-15);
        assert_eq!(from_sigma.cov_xy, 0.0);
    }

    #[test]
    fn test_confidence_levels() {
        assert_eq!(ConfidenceLevel::default().chi_square_quantile(), 5.991);
        assert!(ConfidenceLevel::Custom(2.0).validate().is_ok());
        assert!(ConfidenceLevel::Custom(-1.0).validate().is_err());
        assert!(ConfidenceLevel::Custom(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_confidence_level_serde() {
        let json = serde_json::to_string(&ConfidenceLevel::Custom(3.0)).unwrap();
        let back: ConfidenceLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ConfidenceLevel::Custom(3.0));

        let json = serde_json::to_string(&ConfidenceLevel::P95).unwrap();
        assert_eq!(json, r#"{"level":"P95"}"#);
    }
}
