//! Bearing-angle triangulation
//!
//! Converts an observer position into the three directed angles it would
//! measure between the landmarks. This is the forward model of the sensor;
//! [`crate::algorithms::resection`] inverts it.

use crate::core::{
    BearingAngles, GeometryError, GeometryResult, LandmarkSet, Vector2, EPSILON,
};
use tracing::trace;

/// Directed angles seen from `observer`:
/// alpha = ∠(P→B, P→C), beta = ∠(P→C, P→A), gamma = ∠(P→A, P→B).
///
/// Fails with [`GeometryError::CoincidentWithLandmark`] when the observer is
/// within [`EPSILON`] of a landmark.
pub fn angles_to_landmarks(
    observer: Vector2,
    landmarks: &LandmarkSet,
) -> GeometryResult<BearingAngles> {
    for (id, landmark) in landmarks.iter() {
        if (landmark - observer).length() < EPSILON {
            return Err(GeometryError::CoincidentWithLandmark {
                landmark: id,
                x: observer.x,
                y: observer.y,
            });
        }
    }

    let to_a = landmarks.a - observer;
    let to_b = landmarks.b - observer;
    let to_c = landmarks.c - observer;

    let angles = BearingAngles {
        alpha: to_b.directed_angle(&to_c),
        beta: to_c.directed_angle(&to_a),
        gamma: to_a.directed_angle(&to_b),
    };

    trace!(
        x = observer.x,
        y = observer.y,
        alpha = angles.alpha,
        beta = angles.beta,
        gamma = angles.gamma,
        "triangulated"
    );

    Ok(angles)
}
