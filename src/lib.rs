//! Beacon Triangulation Simulator
//!
//! A robot moves in a rectangular arena and measures the angles between three
//! fixed beacons. The crate provides the forward sensor model, three-point
//! resection, confidence ellipses for the estimator's covariance, and a
//! step-driven simulation that ties them to a pluggable state estimator.

pub mod algorithms;
pub mod core;
pub mod estimator;
pub mod processing;
pub mod render;
pub mod simulation;
pub mod utils;

// Re-export commonly used types
pub use algorithms::{
    angles_to_landmarks, confidence_ellipse, position_from_angles, ReferenceTriangle,
};
pub use crate::core::{
    Arena, BearingAngles, ConfidenceLevel, Covariance2x2, EllipseDescriptor, GeometryError,
    GeometryResult, KinematicState, LandmarkId, LandmarkSet, Vector2,
};
pub use estimator::{
    Estimator, EstimatorError, EstimatorResult, EstimatorState, ResectionEstimator, StubEstimator,
};
#[cfg(feature = "native")]
pub use estimator::NativeEstimator;
pub use processing::{BeaconSweepTimer, MeasurementGenerator, MeasurementScheduler, MotionModel};
pub use render::{Color, Drawable, FrameWriter, OutputFormat, PixelProjection, Renderer};
pub use simulation::{Frame, Simulation, SimulationError};
pub use utils::{ConfigurationManager, SimulationConfig};
