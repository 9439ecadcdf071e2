use crate::core::{BearingAngles, EllipseDescriptor};
use crate::render::Drawable;
use serde::{Deserialize, Serialize};

/// Everything produced by one simulation tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick counter, starting at 1
    pub tick: u64,
    /// Simulated time since start (seconds)
    pub time: f64,
    /// True robot position
    pub truth: Drawable,
    /// Estimator output
    pub estimate: Drawable,
    /// Confidence ellipse around the estimate
    pub estimate_ellipse: EllipseDescriptor,
    /// Angles derived from the noisy position; absent when it fell on a landmark
    pub angles: Option<BearingAngles>,
    /// Whether the estimator used the angles this tick
    pub measured: bool,
}

impl Frame {
    /// Distance between estimate and truth (meters)
    pub fn position_error(&self) -> f64 {
        self.estimate.position.distance(&self.truth.position)
    }
}
