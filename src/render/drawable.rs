//! Things the renderer draws and the meters-to-pixels projection

use crate::core::{Arena, Covariance2x2, EllipseDescriptor, Vector2, MIN_ELLIPSE_PX, PX_PER_METER};
use crate::estimator::EstimatorState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const PURPLE: Color = Color::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A position with its uncertainty, drawn as a dot plus confidence ellipse
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub position: Vector2,
    pub covariance: Covariance2x2,
    pub color: Color,
}

impl Drawable {
    pub fn new(position: Vector2, covariance: Covariance2x2, color: Color) -> Self {
        Self {
            position,
            covariance,
            color,
        }
    }

    /// Ground truth: exact position, drawn in blue
    pub fn truth(position: Vector2) -> Self {
        Self::new(position, Covariance2x2::ZERO, Color::BLUE)
    }

    /// Estimator output, drawn in red
    pub fn estimate(state: &EstimatorState) -> Self {
        Self::new(state.position, state.covariance, Color::RED)
    }
}

/// Ellipse in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelEllipse {
    pub center: (i32, i32),
    pub major_px: i32,
    pub minor_px: i32,
    /// Counter-clockwise rotation of the major axis, whole degrees
    pub rotation_deg: i32,
}

/// Maps arena meters onto a screen with the origin in the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelProjection {
    pub px_per_meter: f64,
    pub arena: Arena,
    pub min_ellipse_px: f64,
}

impl Default for PixelProjection {
    fn default() -> Self {
        Self::new(PX_PER_METER, Arena::default())
    }
}

impl PixelProjection {
    pub fn new(px_per_meter: f64, arena: Arena) -> Self {
        Self {
            px_per_meter,
            arena,
            min_ellipse_px: MIN_ELLIPSE_PX,
        }
    }

    pub fn with_min_ellipse_px(mut self, min_ellipse_px: f64) -> Self {
        self.min_ellipse_px = min_ellipse_px;
        self
    }

    pub fn width_px(&self) -> i32 {
        self.length_to_pixels(self.arena.width)
    }

    pub fn height_px(&self) -> i32 {
        self.length_to_pixels(self.arena.height)
    }

    /// Screen position; y grows downwards on screen
    pub fn to_pixels(&self, p: Vector2) -> (i32, i32) {
        (
            self.length_to_pixels(p.x),
            self.height_px() - self.length_to_pixels(p.y),
        )
    }

    /// Truncating conversion of a length in meters
    pub fn length_to_pixels(&self, meters: f64) -> i32 {
        (meters * self.px_per_meter) as i32
    }

    /// Ellipses whose major axis does not exceed the threshold are skipped
    pub fn ellipse_visible(&self, ellipse: &EllipseDescriptor) -> bool {
        f64::from(self.length_to_pixels(ellipse.semi_major)) > self.min_ellipse_px
    }

    /// Screen-space ellipse, or `None` when too small to draw
    pub fn project_ellipse(&self, ellipse: &EllipseDescriptor) -> Option<PixelEllipse> {
        if !self.ellipse_visible(ellipse) {
            return None;
        }

        Some(PixelEllipse {
            center: self.to_pixels(ellipse.center),
            major_px: self.length_to_pixels(ellipse.semi_major),
            minor_px: self.length_to_pixels(ellipse.semi_minor),
            rotation_deg: ellipse.rotation.to_degrees().round() as i32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipse(semi_major: f64) -> EllipseDescriptor {
        EllipseDescriptor {
            center: Vector2::new(1.0, 1.0),
            semi_major,
            semi_minor: semi_major / 2.0,
            rotation: std::f64::consts::FRAC_PI_4,
        }
    }

    #[test]
    fn test_screen_size() {
        let projection = PixelProjection::default();
        assert_eq!(projection.width_px(), 1200);
        assert_eq!(projection.height_px(), 800);
    }

    #[test]
    fn test_y_axis_is_flipped() {
        let projection = PixelProjection::default();
        assert_eq!(projection.to_pixels(Vector2::new(0.0, 0.0)), (0, 800));
        assert_eq!(projection.to_pixels(Vector2::new(3.0, 2.0)), (1200, 0));
        assert_eq!(projection.to_pixels(Vector2::new(1.0, 1.0)), (400, 400));
        assert_eq!(projection.to_pixels(Vector2::new(0.5, 1.5)), (200, 200));
    }

    #[test]
    fn test_small_ellipses_are_hidden() {
        let projection = PixelProjection::default();
        // 5 px is not enough
        assert!(!projection.ellipse_visible(&ellipse(5.0 / 400.0)));
        assert!(projection.ellipse_visible(&ellipse(6.5 / 400.0)));
        assert!(projection.project_ellipse(&ellipse(0.0)).is_none());
    }

    #[test]
    fn test_project_ellipse() {
        let projection = PixelProjection::default();
        let projected = projection.project_ellipse(&ellipse(0.1)).unwrap();
        assert_eq!(projected.center, (400, 400));
        assert_eq!(projected.major_px, 40);
        assert_eq!(projected.minor_px, 20);
        assert_eq!(projected.rotation_deg, 45);
    }

    #[test]
    fn test_palette() {
        let truth = Drawable::truth(Vector2::new(1.0, 1.0));
        assert!(truth.covariance.is_zero());
        assert_eq!(truth.color, Color::BLUE);
        assert_eq!(Color::RED.to_string(), "#ff0000");

        let state = EstimatorState::from((1.0, 1.0, 0.01, 0.02, 0.0));
        let estimate = Drawable::estimate(&state);
        assert_eq!(estimate.color, Color::RED);
        assert_eq!(estimate.covariance, state.covariance);
    }
}
