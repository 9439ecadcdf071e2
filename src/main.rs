//! Headless beacon triangulation demo
//!
//! Drives the robot through a fixed acceleration pattern at the configured
//! frame rate and writes every frame to stdout. Logs go to stderr.
//!
//! ```text
//! beacon-triangulation [CONFIG.json] [--format text|json|csv] [--ticks N]
//! ```

use beacon_triangulation::estimator::{Estimator, EstimatorError};
use beacon_triangulation::render::RenderError;
use beacon_triangulation::utils::ConfigError;
use beacon_triangulation::{
    ConfigurationManager, FrameWriter, LandmarkSet, OutputFormat, PixelProjection, Renderer,
    Simulation, SimulationConfig, SimulationError, Vector2,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};

/// Ten seconds at the default frame rate
const DEFAULT_TICKS: u64 = 500;

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Estimator(#[from] EstimatorError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

struct Args {
    config: Option<PathBuf>,
    format: OutputFormat,
    ticks: u64,
}

fn parse_args() -> Result<Args, AppError> {
    let mut args = Args {
        config: None,
        format: OutputFormat::Text,
        ticks: DEFAULT_TICKS,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--format" | "-f" => {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::Usage("--format needs a value".to_string()))?;
                args.format = value.parse()?;
            }
            "--ticks" | "-n" => {
                let value = iter
                    .next()
                    .ok_or_else(|| AppError::Usage("--ticks needs a value".to_string()))?;
                args.ticks = value
                    .parse()
                    .map_err(|_| AppError::Usage(format!("invalid tick count '{}'", value)))?;
            }
            flag if flag.starts_with('-') => {
                return Err(AppError::Usage(format!("unknown option '{}'", flag)));
            }
            path => args.config = Some(PathBuf::from(path)),
        }
    }

    Ok(args)
}

#[cfg(feature = "native")]
fn build_estimator(config: &SimulationConfig) -> Result<impl Estimator, EstimatorError> {
    if config.landmarks != LandmarkSet::default() {
        tracing::warn!("the native estimator uses its built-in landmark positions");
    }
    beacon_triangulation::NativeEstimator::acquire()
}

#[cfg(not(feature = "native"))]
fn build_estimator(config: &SimulationConfig) -> Result<impl Estimator, EstimatorError> {
    if config.landmarks != LandmarkSet::default() {
        info!("using custom landmark positions");
    }
    beacon_triangulation::ResectionEstimator::new(config.landmarks)
}

/// Keyboard-like input: a direction held for 1.5 s at a time
fn scripted_acceleration(time: f64) -> Vector2 {
    const PATTERN: [(f64, f64); 8] = [
        (1.0, 0.0),
        (0.0, 1.0),
        (-1.0, 0.0),
        (0.0, 0.0),
        (0.0, -1.0),
        (1.0, 1.0),
        (-1.0, -1.0),
        (0.0, 0.0),
    ];

    let slot = (time / 1.5) as usize % PATTERN.len();
    let (x, y) = PATTERN[slot];
    Vector2::new(x, y)
}

fn run() -> Result<(), AppError> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => ConfigurationManager::from_file(path)?.config().clone(),
        None => SimulationConfig::default(),
    };

    let projection = PixelProjection::new(config.display.px_per_meter, config.arena)
        .with_min_ellipse_px(config.display.min_ellipse_px);
    let estimator = build_estimator(&config)?;
    let mut simulation = Simulation::new(config, estimator)?;
    let mut writer = FrameWriter::new(io::stdout().lock(), args.format, projection);

    let mut worst_error = 0.0_f64;
    for _ in 0..args.ticks {
        let acc = scripted_acceleration(simulation.time());
        let frame = simulation.tick_frame(acc)?;
        worst_error = worst_error.max(frame.position_error());
        writer.render(&frame)?;
    }
    writer.finish()?;

    info!(
        ticks = args.ticks,
        seconds = simulation.time(),
        worst_error_m = worst_error,
        "simulation finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .compact()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}
