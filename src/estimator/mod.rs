//! State estimator boundary
//!
//! The simulator hands bearing angles to an [`Estimator`] and draws whatever
//! position and covariance it returns. Implementations range from a scripted
//! test double to the native Kalman filter library.

pub mod error;
pub mod interface;
pub mod mock;
#[cfg(feature = "native")]
pub mod native;
pub mod resection;

pub use error::{EstimatorError, EstimatorResult};
pub use interface::{Estimator, EstimatorState};
pub use mock::{EstimatorCall, StubEstimator};
#[cfg(feature = "native")]
pub use native::NativeEstimator;
pub use resection::ResectionEstimator;
