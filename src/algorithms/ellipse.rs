//! Confidence ellipse extraction from a 2x2 position covariance
//!
//! The eigendecomposition of a symmetric 2x2 matrix has a closed form, so no
//! iterative solver is involved. Axis lengths follow
//! `2 * sqrt(quantile * λ)` where the quantile is the chi-square value for two
//! degrees of freedom at the requested [`ConfidenceLevel`] (5.991 for 95%).

use crate::core::{
    ConfidenceLevel, Covariance2x2, EllipseDescriptor, GeometryError, GeometryResult, Vector2,
};

/// Eigenvalues this far below zero (relative to the matrix scale) are
/// treated as round-off and clamped to zero
const PSD_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Eigen pair of a symmetric 2x2 matrix, larger eigenvalue first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetricEigen2 {
    pub major_eigenvalue: f64,
    pub minor_eigenvalue: f64,
    /// Unit eigenvector of the major eigenvalue
    pub major_axis: Vector2,
}

impl SymmetricEigen2 {
    /// Closed-form decomposition of `[[var_x, cov_xy], [cov_xy, var_y]]`
    pub fn new(cov: &Covariance2x2) -> GeometryResult<Self> {
        if !cov.is_finite() {
            return Err(GeometryError::NonFiniteCovariance {
                var_x: cov.var_x,
                var_y: cov.var_y,
                cov_xy: cov.cov_xy,
            });
        }

        let mean = 0.5 * (cov.var_x + cov.var_y);
        let half_diff = 0.5 * (cov.var_x - cov.var_y);
        let radius = half_diff.hypot(cov.cov_xy);

        let major = mean + radius;
        let minor = mean - radius;

        // pick the better conditioned of the two equivalent eigenvector forms
        let direction = if half_diff >= 0.0 {
            Vector2::new(half_diff + radius, cov.cov_xy)
        } else {
            Vector2::new(cov.cov_xy, radius - half_diff)
        };
        let major_axis = if direction.length() > 0.0 {
            direction.normalized()
        } else {
            // isotropic: every direction is an eigenvector
            Vector2::new(1.0, 0.0)
        };

        Ok(Self {
            major_eigenvalue: major,
            minor_eigenvalue: minor,
            major_axis,
        })
    }

    /// Rotation of the major axis from the x axis, radians
    pub fn rotation(&self) -> f64 {
        self.major_axis.y.atan2(self.major_axis.x)
    }
}

/// Confidence ellipse for a position estimate
pub fn confidence_ellipse(
    center: Vector2,
    cov: &Covariance2x2,
    level: ConfidenceLevel,
) -> GeometryResult<EllipseDescriptor> {
    let quantile = level.validate()?;
    let eigen = SymmetricEigen2::new(cov)?;

    let scale = cov.var_x.abs().max(cov.var_y.abs()).max(cov.cov_xy.abs());
    let tolerance = PSD_RELATIVE_TOLERANCE * scale;
    if eigen.minor_eigenvalue < -tolerance {
        return Err(GeometryError::NotPositiveSemidefinite {
            min_eigenvalue: eigen.minor_eigenvalue,
        });
    }

    let major = eigen.major_eigenvalue.max(0.0);
    let minor = eigen.minor_eigenvalue.max(0.0);

    Ok(EllipseDescriptor {
        center,
        semi_major: 2.0 * (quantile * major).sqrt(),
        semi_minor: 2.0 * (quantile * minor).sqrt(),
        rotation: eigen.rotation(),
    })
}
