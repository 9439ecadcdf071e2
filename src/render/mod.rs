//! Presentation of simulation frames
//!
//! All geometry stays in meters up to this point; the pixel projection is the
//! only place screen units appear.

pub mod drawable;
pub mod formatting;

pub use drawable::{Color, Drawable, PixelEllipse, PixelProjection};
pub use formatting::{
    CsvFormatter, FrameWriter, JsonFormatter, OutputFormat, RenderError, Renderer, TextFormatter,
};
