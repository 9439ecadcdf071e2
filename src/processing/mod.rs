//! Robot motion, sensor simulation and measurement timing

pub mod measurement;
pub mod motion;
pub mod schedule;
pub mod sweep;

pub use measurement::{MeasurementError, MeasurementGenerator};
pub use motion::MotionModel;
pub use schedule::MeasurementScheduler;
pub use sweep::BeaconSweepTimer;
