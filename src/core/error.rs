//! Geometry error types

use thiserror::Error;

/// Which of the three landmarks an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LandmarkId {
    A,
    B,
    C,
}

impl std::fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LandmarkId::A => "A",
            LandmarkId::B => "B",
            LandmarkId::C => "C",
        };
        f.write_str(name)
    }
}

/// Failures of the geometric primitives
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Observer sits on a landmark, so the bearing to it is undefined
    #[error("observer at ({x:.4}, {y:.4}) coincides with landmark {landmark}")]
    CoincidentWithLandmark { landmark: LandmarkId, x: f64, y: f64 },

    /// Covariance has an eigenvalue below zero (upstream filter divergence)
    #[error("covariance is not positive semidefinite: smallest eigenvalue {min_eigenvalue:e}")]
    NotPositiveSemidefinite { min_eigenvalue: f64 },

    /// Covariance contains NaN or infinite entries
    #[error("covariance contains non-finite values ({var_x}, {var_y}, {cov_xy})")]
    NonFiniteCovariance { var_x: f64, var_y: f64, cov_xy: f64 },

    /// Landmarks are collinear or coincident
    #[error("landmark triangle is degenerate (signed area {signed_area:e})")]
    DegenerateTriangle { signed_area: f64 },

    /// Observer lies on the circle through the three landmarks
    #[error("observer lies on the landmark circumcircle; angles do not determine a position")]
    DangerCircle,

    /// Chi-square quantile must be finite and positive
    #[error("invalid confidence quantile {quantile}")]
    InvalidQuantile { quantile: f64 },
}

/// Result type for geometry operations
pub type GeometryResult<T> = Result<T, GeometryError>;
