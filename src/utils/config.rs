use crate::algorithms::ReferenceTriangle;
use crate::core::{
    Arena, ConfidenceLevel, Covariance2x2, LandmarkSet, Vector2, EPSILON, MAX_SPEED,
    MIN_ELLIPSE_PX, PX_PER_METER,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Complete simulation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Playing field the robot is confined to (meters)
    pub arena: Arena,
    /// Beacon positions (meters)
    pub landmarks: LandmarkSet,
    /// Robot speed limit (m/s)
    pub max_speed: f64,
    /// Starting point of the robot and of the estimator
    pub initial_position: Vector2,
    /// Simulation ticks per second
    pub frame_rate_hz: f64,
    pub measurement: MeasurementConfig,
    pub estimator: EstimatorTuning,
    pub display: DisplayConfig,
    /// Probability mass enclosed by the drawn confidence ellipse
    pub confidence: ConfidenceLevel,
    /// Seed for the sensor noise; entropy when absent
    pub seed: Option<u64>,
}

/// Sensor noise and rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Position noise standard deviation along x (meters)
    pub sigma_x: f64,
    /// Position noise standard deviation along y (meters)
    pub sigma_y: f64,
    /// Covariance reported to the estimator (m²)
    pub cov_xy: f64,
    /// Fresh angle sets per second
    pub frequency_hz: f64,
}

/// Optional knobs forwarded to estimators that support them; unset values
/// keep the estimator's own defaults (1.0 m/s² and 0.0625 for the native filter)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorTuning {
    /// Acceleration bound of the process model (m/s²)
    pub max_acceleration: Option<f64>,
    pub process_noise_proportion: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub px_per_meter: f64,
    /// Ellipses with a shorter major axis are not drawn (pixels)
    pub min_ellipse_px: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            landmarks: LandmarkSet::default(),
            max_speed: MAX_SPEED,
            initial_position: Vector2::new(1.0, 1.0),
            frame_rate_hz: 50.0,
            measurement: MeasurementConfig::default(),
            estimator: EstimatorTuning::default(),
            display: DisplayConfig::default(),
            confidence: ConfidenceLevel::default(),
            seed: None,
        }
    }
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            sigma_x: 0.03,
            sigma_y: 0.03,
            cov_xy: 0.0,
            frequency_hz: 15.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            px_per_meter: PX_PER_METER,
            min_ellipse_px: MIN_ELLIPSE_PX,
        }
    }
}

impl SimulationConfig {
    /// Seconds per tick
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.frame_rate_hz
    }

    /// Covariance handed to the estimator
    pub fn measurement_covariance(&self) -> Covariance2x2 {
        let m = &self.measurement;
        Covariance2x2::new(m.sigma_x * m.sigma_x, m.sigma_y * m.sigma_y, m.cov_xy)
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("i/o error: {message}")]
    IoError { message: String },

    #[error("serialization error: {message}")]
    SerializationError { message: String },

    #[error("no file path set for saving configuration")]
    NoFilePath,
}

impl ConfigError {
    fn invalid(parameter: &str, value: impl ToString, reason: &str) -> Self {
        ConfigError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// First error, if any
    pub fn into_result(self) -> Result<(), ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Check a configuration without applying it
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    let arena = &config.arena;
    if !(arena.width.is_finite() && arena.width > 0.0) {
        errors.push(ConfigError::invalid("arena.width", arena.width, "must be positive"));
    }
    if !(arena.height.is_finite() && arena.height > 0.0) {
        errors.push(ConfigError::invalid("arena.height", arena.height, "must be positive"));
    }

    if let Err(e) = ReferenceTriangle::new(config.landmarks) {
        errors.push(ConfigError::invalid("landmarks", &e, "landmarks must span a triangle"));
    }
    for (id, landmark) in config.landmarks.iter() {
        if !arena.contains(&landmark) {
            warnings.push(format!("Landmark {} at {} lies outside the arena", id, landmark));
        }
        if (landmark - config.initial_position).length() < EPSILON {
            errors.push(ConfigError::invalid(
                "initial_position",
                config.initial_position,
                "robot cannot start on a landmark",
            ));
        }
    }

    if !(config.max_speed.is_finite() && config.max_speed > 0.0) {
        errors.push(ConfigError::invalid("max_speed", config.max_speed, "must be positive"));
    }

    if !arena.contains(&config.initial_position) {
        errors.push(ConfigError::invalid(
            "initial_position",
            config.initial_position,
            "must lie inside the arena",
        ));
    }

    if !(config.frame_rate_hz.is_finite() && config.frame_rate_hz > 0.0) {
        errors.push(ConfigError::invalid(
            "frame_rate_hz",
            config.frame_rate_hz,
            "must be positive",
        ));
    }

    let m = &config.measurement;
    for (name, sigma) in [("measurement.sigma_x", m.sigma_x), ("measurement.sigma_y", m.sigma_y)] {
        if !(sigma.is_finite() && sigma >= 0.0) {
            errors.push(ConfigError::invalid(
                name,
                sigma,
                "must be a non-negative standard deviation",
            ));
        }
    }
    if m.sigma_x == 0.0 && m.sigma_y == 0.0 {
        warnings.push("Measurements are noise-free".to_string());
    }
    if !m.cov_xy.is_finite() || m.cov_xy.abs() > m.sigma_x * m.sigma_y {
        errors.push(ConfigError::invalid(
            "measurement.cov_xy",
            m.cov_xy,
            "covariance must satisfy |cov_xy| <= sigma_x * sigma_y",
        ));
    } else if m.cov_xy != 0.0 {
        warnings.push(
            "Injected noise is independent per axis; cov_xy only affects the estimator".to_string(),
        );
    }
    if !(m.frequency_hz.is_finite() && m.frequency_hz > 0.0) {
        errors.push(ConfigError::invalid(
            "measurement.frequency_hz",
            m.frequency_hz,
            "must be positive",
        ));
    } else if m.frequency_hz > config.frame_rate_hz {
        warnings.push(
            "Measurement rate exceeds frame rate; every tick carries a measurement".to_string(),
        );
        suggestions.push(format!(
            "Lower measurement.frequency_hz to at most {}",
            config.frame_rate_hz
        ));
    }

    for (name, value) in [
        ("estimator.max_acceleration", config.estimator.max_acceleration),
        ("estimator.process_noise_proportion", config.estimator.process_noise_proportion),
    ] {
        if let Some(v) = value {
            if !(v.is_finite() && v > 0.0) {
                errors.push(ConfigError::invalid(name, v, "must be positive"));
            }
        }
    }
    if let Some(max_acc) = config.estimator.max_acceleration {
        if max_acc < 1.0 {
            suggestions.push(
                "The robot accelerates at 1 m/s²; a smaller bound makes the filter lag".to_string(),
            );
        }
    }

    let d = &config.display;
    if !(d.px_per_meter.is_finite() && d.px_per_meter > 0.0) {
        errors.push(ConfigError::invalid(
            "display.px_per_meter",
            d.px_per_meter,
            "must be positive",
        ));
    }
    if !(d.min_ellipse_px.is_finite() && d.min_ellipse_px >= 0.0) {
        errors.push(ConfigError::invalid(
            "display.min_ellipse_px",
            d.min_ellipse_px,
            "must be non-negative",
        ));
    }

    if let Err(e) = config.confidence.validate() {
        errors.push(ConfigError::invalid("confidence", &e, "invalid confidence level"));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
        suggestions,
    }
}

/// Holds the active configuration and its backing file
#[derive(Debug, Default)]
pub struct ConfigurationManager {
    config: SimulationConfig,
    config_file_path: Option<PathBuf>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Manager with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration after validating it
    pub fn update_config(&mut self, config: SimulationConfig) -> Result<(), ConfigError> {
        validate_config(&config).into_result()?;
        self.config = config;
        self.is_modified = true;
        Ok(())
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        let config: SimulationConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to parse config file '{}': {}", path.display(), e),
            })?;

        let validation = validate_config(&config);
        for warning in &validation.warnings {
            debug!(path = %path.display(), "{}", warning);
        }
        validation.into_result()?;

        info!(path = %path.display(), "loaded configuration");
        self.config = config;
        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::SerializationError {
                message: format!("Failed to serialize config: {}", e),
            })?;

        fs::write(path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path.display(), e),
        })?;

        self.config_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoFilePath),
        }
    }

    /// Check if configuration has been modified since last save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn validate(&self) -> ValidationResult {
        validate_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.arena, Arena::new(3.0, 2.0));
        assert_eq!(config.landmarks.a, Vector2::new(3.0, 1.0));
        assert_eq!(config.max_speed, 1.6);
        assert_eq!(config.measurement.frequency_hz, 15.0);
        assert_eq!(config.display.px_per_meter, 400.0);
        assert!((config.frame_dt() - 0.02).abs() < 1e-15);

        let result = validate_config(&config);
        assert!(result.is_valid, "{:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_measurement_covariance() {
        let mut config = SimulationConfig::default();
        config.measurement.cov_xy = 0.0004;
        let cov = config.measurement_covariance();
        assert!((cov.var_x - 0.0009).abs() < 1e-15);
        assert!((cov.var_y - 0.0009).abs() < 1e-15);
        assert_eq!(cov.cov_xy, 0.0004);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = SimulationConfig::default();
        config.max_speed = 0.0;
        config.measurement.sigma_x = -0.1;
        config.measurement.frequency_hz = f64::NAN;
        config.estimator.max_acceleration = Some(-1.0);
        config.confidence = ConfidenceLevel::Custom(-2.0);

        let result = validate_config(&config);
        assert!(!result.is_valid);

        let parameters: Vec<String> = result
            .errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::InvalidParameter { parameter, .. } => Some(parameter.clone()),
                _ => None,
            })
            .collect();
        for expected in [
            "max_speed",
            "measurement.sigma_x",
            "measurement.frequency_hz",
            "estimator.max_acceleration",
            "confidence",
        ] {
            assert!(parameters.iter().any(|p| p == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_geometry_validation() {
        let mut config = SimulationConfig::default();
        config.landmarks = LandmarkSet::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(2.0, 2.0),
        );
        config.initial_position = Vector2::new(0.0, 0.0);
        let result = validate_config(&config);
        assert!(!result.is_valid);
        assert!(result.errors.len() >= 2);

        let mut config = SimulationConfig::default();
        config.initial_position = Vector2::new(5.0, 1.0);
        assert!(!validate_config(&config).is_valid);
    }

    #[test]
    fn test_covariance_bound() {
        let mut config = SimulationConfig::default();
        config.measurement.cov_xy = 0.001;
        assert!(!validate_config(&config).is_valid);

        config.measurement.cov_xy = 0.0005;
        let result = validate_config(&config);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_fast_measurements_warn() {
        let mut config = SimulationConfig::default();
        config.measurement.frequency_hz = 100.0;
        let result = validate_config(&config);
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
        assert!(!result.suggestions.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("simulation.json");

        let mut config = SimulationConfig::default();
        config.seed = Some(42);
        config.measurement.sigma_y = 0.05;
        config.confidence = ConfidenceLevel::P99;
        config.estimator.process_noise_proportion = Some(0.0625);

        let mut manager = ConfigurationManager::new();
        manager.update_config(config.clone()).unwrap();
        assert!(manager.is_modified());

        manager.save_to_file(&path).unwrap();
        assert!(!manager.is_modified());

        let loaded = ConfigurationManager::from_file(&path).unwrap();
        assert_eq!(loaded.config(), &config);
        assert!(!loaded.is_modified());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "max_speed": 1.0, "measurement": { "frequency_hz": 10.0 } }"#)
            .unwrap();

        let manager = ConfigurationManager::from_file(&path).unwrap();
        let config = manager.config();
        assert_eq!(config.max_speed, 1.0);
        assert_eq!(config.measurement.frequency_hz, 10.0);
        assert_eq!(config.measurement.sigma_x, 0.03);
        assert_eq!(config.frame_rate_hz, 50.0);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&garbage),
            Err(ConfigError::SerializationError { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{ "frame_rate_hz": -5.0 }"#).unwrap();
        assert!(matches!(
            ConfigurationManager::from_file(&invalid),
            Err(ConfigError::InvalidParameter { .. })
        ));

        assert!(matches!(
            ConfigurationManager::from_file(dir.path().join("missing.json")),
            Err(ConfigError::IoError { .. })
        ));
    }

    #[test]
    fn test_save_without_path() {
        let mut manager = ConfigurationManager::new();
        assert_eq!(manager.save(), Err(ConfigError::NoFilePath));

        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        manager.save_to_file(&path).unwrap();
        manager.save().unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_rejected_update_keeps_config() {
        let mut manager = ConfigurationManager::new();
        let mut bad = SimulationConfig::default();
        bad.frame_rate_hz = 0.0;

        assert!(manager.update_config(bad).is_err());
        assert_eq!(manager.config(), &SimulationConfig::default());
        assert!(!manager.is_modified());
    }
}
