//! Frame output in text, JSON and CSV form

use crate::render::PixelProjection;
use crate::simulation::Frame;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize frame: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown output format '{0}' (expected text, json or csv)")]
    UnknownFormat(String),
}

/// Sink for simulation frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError>;

    /// Push buffered output
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One human-readable line per frame
    #[default]
    Text,
    /// Newline-delimited JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" | "ndjson" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Human-readable text formatter
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    pub projection: PixelProjection,
}

impl TextFormatter {
    pub fn new(projection: PixelProjection) -> Self {
        Self { projection }
    }

    pub fn format_text(&self, frame: &Frame) -> String {
        let mut output = format!(
            "#{:<5} t={:>7.3}s truth {} estimate {} err {:.3}m",
            frame.tick,
            frame.time,
            frame.truth.position,
            frame.estimate.position,
            frame.position_error()
        );

        match self.projection.project_ellipse(&frame.estimate_ellipse) {
            Some(ellipse) => output.push_str(&format!(
                " ellipse {}x{}px @{}°",
                ellipse.major_px, ellipse.minor_px, ellipse.rotation_deg
            )),
            None => output.push_str(" ellipse hidden"),
        }

        if frame.measured {
            output.push_str(" [meas]");
        }
        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn format_json(&self, frame: &Frame) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(frame)
        } else {
            serde_json::to_string(frame)
        }
    }
}

/// CSV formatter for data logging
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFormatter;

impl CsvFormatter {
    pub fn header(&self) -> &'static str {
        "tick,time,truth_x,truth_y,estimate_x,estimate_y,var_x,var_y,cov_xy,semi_major,semi_minor,rotation,alpha,beta,gamma,measured"
    }

    pub fn format_csv(&self, frame: &Frame) -> String {
        let cov = &frame.estimate.covariance;
        let ellipse = &frame.estimate_ellipse;
        let angles = match &frame.angles {
            Some(a) => format!("{:.6},{:.6},{:.6}", a.alpha, a.beta, a.gamma),
            None => ",,".to_string(),
        };

        format!(
            "{},{:.4},{:.6},{:.6},{:.6},{:.6},{:e},{:e},{:e},{:.6},{:.6},{:.6},{},{}",
            frame.tick,
            frame.time,
            frame.truth.position.x,
            frame.truth.position.y,
            frame.estimate.position.x,
            frame.estimate.position.y,
            cov.var_x,
            cov.var_y,
            cov.cov_xy,
            ellipse.semi_major,
            ellipse.semi_minor,
            ellipse.rotation,
            angles,
            u8::from(frame.measured)
        )
    }
}

/// Writes every frame to `W` in the chosen format
pub struct FrameWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    text: TextFormatter,
    json: JsonFormatter,
    csv: CsvFormatter,
    header_written: bool,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W, format: OutputFormat, projection: PixelProjection) -> Self {
        Self {
            writer,
            format,
            text: TextFormatter::new(projection),
            json: JsonFormatter::default(),
            csv: CsvFormatter,
            header_written: false,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for FrameWriter<W> {
    fn render(&mut self, frame: &Frame) -> Result<(), RenderError> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", self.text.format_text(frame))?,
            OutputFormat::Json => writeln!(self.writer, "{}", self.json.format_json(frame)?)?,
            OutputFormat::Csv => {
                if !self.header_written {
                    writeln!(self.writer, "{}", self.csv.header())?;
                    self.header_written = true;
                }
                writeln!(self.writer, "{}", self.csv.format_csv(frame))?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.writer.flush()?;
        Ok(())
    }
}
