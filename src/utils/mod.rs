//! Configuration loading and validation

pub mod config;

pub use config::{
    validate_config, ConfigError, ConfigurationManager, DisplayConfig, EstimatorTuning,
    MeasurementConfig, SimulationConfig, ValidationResult,
};
