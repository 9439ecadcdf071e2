//! Position from bearing angles (three-point resection)
//!
//! Uses the barycentric cotangent form of Tienstra's method: every landmark gets
//! the weight `1 / (cot(X) - cot(θ_X))`, where `X` is the triangle's interior
//! angle at that landmark and `θ_X` the angle observed opposite it. The position
//! is the normalized weighted sum of the landmarks.
//!
//! The method breaks down on the circle through the three landmarks, where the
//! observed angles no longer pin down a unique point.

use crate::core::{BearingAngles, GeometryError, GeometryResult, LandmarkSet, Vector2};
use nalgebra::Vector3;

/// Weights whose denominator falls below this are treated as infinite
const DANGER_TOLERANCE: f64 = 1e-9;

/// Landmark triangle with precomputed vertex cotangents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTriangle {
    landmarks: LandmarkSet,
    /// Interior-angle cotangents at A, B, C, signed by the triangle orientation
    vertex_cot: Vector3<f64>,
}

impl ReferenceTriangle {
    pub fn new(landmarks: LandmarkSet) -> GeometryResult<Self> {
        let signed_area = landmarks.signed_area2();
        let scale = [
            (landmarks.b - landmarks.a).length(),
            (landmarks.c - landmarks.b).length(),
            (landmarks.a - landmarks.c).length(),
        ]
        .into_iter()
        .fold(0.0_f64, f64::max);

        if !signed_area.is_finite() || signed_area.abs() <= 1e-9 * scale * scale {
            return Err(GeometryError::DegenerateTriangle { signed_area });
        }

        // a clockwise labelling measures every observed angle the long way round
        let sign = signed_area.signum();
        let LandmarkSet { a, b, c } = landmarks;

        Ok(Self {
            landmarks,
            vertex_cot: Vector3::new(
                sign * cot_at_vertex(b, a, c),
                sign * cot_at_vertex(a, b, c),
                sign * cot_at_vertex(a, c, b),
            ),
        })
    }

    pub fn landmarks(&self) -> &LandmarkSet {
        &self.landmarks
    }

    /// Recover the observer position from the three observed angles
    pub fn position_from_angles(&self, angles: &BearingAngles) -> GeometryResult<Vector2> {
        let observed = Vector3::new(angles.alpha, angles.beta, angles.gamma);

        let mut weights = Vector3::<f64>::zeros();
        for i in 0..3 {
            let denominator = self.vertex_cot[i] - cot(observed[i]);
            if denominator.abs() < DANGER_TOLERANCE {
                return Err(GeometryError::DangerCircle);
            }
            weights[i] = 1.0 / denominator;
        }

        let total = weights.sum();
        if !total.is_finite() || total.abs() < DANGER_TOLERANCE {
            return Err(GeometryError::DangerCircle);
        }
        let weights = weights / total;

        let LandmarkSet { a, b, c } = self.landmarks;
        let position = a * weights.x + b * weights.y + c * weights.z;

        if position.x.is_finite() && position.y.is_finite() {
            Ok(position)
        } else {
            Err(GeometryError::DangerCircle)
        }
    }
}

/// Convenience wrapper building the reference triangle on the fly
pub fn position_from_angles(
    angles: &BearingAngles,
    landmarks: &LandmarkSet,
) -> GeometryResult<Vector2> {
    ReferenceTriangle::new(*landmarks)?.position_from_angles(angles)
}

fn cot(angle: f64) -> f64 {
    1.0 / angle.tan()
}

/// Cotangent of the interior angle at `vertex` in triangle (p, vertex, q)
fn cot_at_vertex(p: Vector2, vertex: Vector2, q: Vector2) -> f64 {
    let to_p = p - vertex;
    let to_q = q - vertex;
    to_p.dot(&to_q) / to_p.cross(&to_q).abs()
}
