//! Core types and constants for the beacon positioning simulator

pub mod constants;
pub mod error;
pub mod types;
pub mod vector;

pub use constants::*;
pub use error::{GeometryError, GeometryResult, LandmarkId};
pub use types::*;
pub use vector::{orientation, Vector2};
