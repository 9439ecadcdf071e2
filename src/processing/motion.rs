//! Robot motion model
//!
//! Acceleration input only carries a direction: any non-zero input accelerates
//! the robot at 1 m/s² for the whole timestep. Speed is hard-capped and the
//! position is pinned to the arena walls.
//!
//! Hitting a wall clamps the position but leaves the velocity untouched, so a
//! robot pushed into a wall keeps "pressing" against it and slides along it.

use crate::core::{Arena, KinematicState, Vector2, EPSILON, MAX_SPEED};
use tracing::warn;

/// Speed-limited point-mass motion inside a rectangular arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionModel {
    /// Maximum speed (m/s)
    pub max_speed: f64,
    /// Bounds for the position
    pub arena: Arena,
}

impl Default for MotionModel {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            arena: Arena::default(),
        }
    }
}

impl MotionModel {
    pub fn new(max_speed: f64, arena: Arena) -> Self {
        Self { max_speed, arena }
    }

    /// New velocity after applying `acc` for `dt` seconds
    pub fn update_velocity(&self, velocity: Vector2, acc: Vector2, dt: f64) -> Vector2 {
        let velocity = if acc.length() < EPSILON {
            velocity
        } else {
            velocity + acc.normalized() * dt
        };

        if velocity.length() > self.max_speed {
            velocity.normalized() * self.max_speed
        } else {
            velocity
        }
    }

    /// New position after moving at `velocity` for `dt` seconds, clamped to the arena
    pub fn update_position(&self, position: Vector2, velocity: Vector2, dt: f64) -> Vector2 {
        self.arena.clamp(position + velocity * dt)
    }

    /// Advance `state` by one timestep
    pub fn step(&self, state: &mut KinematicState, acc: Vector2, dt: f64) {
        let dt = sanitize_dt(dt);
        state.velocity = self.update_velocity(state.velocity, acc, dt);
        state.position = self.update_position(state.position, state.velocity, dt);
    }
}

fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        warn!(dt, "ignoring invalid timestep");
        0.0
    }
}
