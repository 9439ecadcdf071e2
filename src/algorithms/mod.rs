//! Core positioning geometry

pub mod ellipse;
pub mod resection;
pub mod triangulation;

pub use ellipse::{confidence_ellipse, SymmetricEigen2};
pub use resection::{position_from_angles, ReferenceTriangle};
pub use triangulation::angles_to_landmarks;
