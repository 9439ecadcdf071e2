//! Two-dimensional vector algebra
//!
//! All positions are in meters in the arena frame (x to the right, y up).
//! Operations never mutate their operands; each returns a fresh value.

use crate::core::constants::EPSILON;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Point or displacement in the plane
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: &Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product
    pub fn cross(&self, other: &Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(&self, other: &Vector2) -> f64 {
        (*self - *other).length()
    }

    pub fn scale(&self, factor: f64) -> Vector2 {
        Vector2::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction.
    ///
    /// The result is not finite for a zero-length vector; callers check
    /// `length()` against [`EPSILON`] first or use [`Vector2::try_normalized`].
    pub fn normalized(&self) -> Vector2 {
        self.scale(1.0 / self.length())
    }

    /// Unit vector, or `None` when the length is below [`EPSILON`]
    pub fn try_normalized(&self) -> Option<Vector2> {
        let length = self.length();
        if length < EPSILON {
            None
        } else {
            Some(self.scale(1.0 / length))
        }
    }

    /// Rotate counter-clockwise by `angle` radians around `pivot`
    pub fn rotate(&self, angle: f64, pivot: Vector2) -> Vector2 {
        let centered = *self - pivot;
        let (sn, cs) = angle.sin_cos();

        Vector2::new(
            cs * centered.x - sn * centered.y,
            sn * centered.x + cs * centered.y,
        ) + pivot
    }

    /// Counter-clockwise angle swept from `self` to `other`, in `[0, 2π)`.
    ///
    /// Both vectors should be non-zero; the angle of a zero vector is whatever
    /// `atan2(0, 0)` yields.
    pub fn directed_angle(&self, other: &Vector2) -> f64 {
        let angle = (other.y.atan2(other.x) - self.y.atan2(self.x)).rem_euclid(TAU);

        // a tiny negative difference rounds up to exactly 2π, and so does
        // π - (-π) across the signed-zero branch cut
        if angle >= TAU {
            0.0
        } else {
            angle
        }
    }
}

/// Turn direction of the path p1 -> p2 -> p3.
///
/// Positive for a left (counter-clockwise) turn, negative for a right turn,
/// zero when the points are collinear.
pub fn orientation(p1: Vector2, p2: Vector2, p3: Vector2) -> f64 {
    (p2 - p1).cross(&(p3 - p2))
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).length() < EPSILON
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Vector2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, factor: f64) -> Vector2 {
        self.scale(factor)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Vector2::new(v.x, v.y)
    }
}

impl From<Vector2> for nalgebra::Vector2<f64> {
    fn from(v: Vector2) -> Self {
        nalgebra::Vector2::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -1.0);

        assert_eq!(a + b, Vector2::new(4.0, 1.0));
        assert_eq!(a - b, Vector2::new(-2.0, 3.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert!((a.dot(&b) - 1.0).abs() < 1e-12);
        assert!((a.cross(&b) + 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_approximate_equality() {
        let a = Vector2::new(1.0, 1.0);
        assert_eq!(a, Vector2::new(1.0 + 5e-5, 1.0));
        assert_ne!(a, Vector2::new(1.0 + 2e-4, 1.0));
    }

    #[test]
    fn test_length_and_normalization() {
        let v = Vector2::new(3.0, 4.0);
        assert!((v.length() - 5.0).abs() < 1e-12);
        assert!((v.normalized().length() - 1.0).abs() < 1e-12);
        assert_eq!(v.normalized(), Vector2::new(0.6, 0.8));

        assert!(Vector2::ZERO.try_normalized().is_none());
        assert!(Vector2::new(1e-5, 0.0).try_normalized().is_none());
        assert_eq!(v.try_normalized(), Some(Vector2::new(0.6, 0.8)));
    }

    #[test]
    fn test_rotate_quarter_turn_around_pivot() {
        let pivot = Vector2::new(1.0, 1.0);
        let p = Vector2::new(2.0, 1.0);

        assert_eq!(p.rotate(FRAC_PI_2, pivot), Vector2::new(1.0, 2.0));
        assert_eq!(p.rotate(PI, pivot), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_rotate_properties() {
        let pivot = Vector2::new(-0.5, 2.0);
        let points = [
            Vector2::new(0.0, 0.0),
            Vector2::new(3.0, 1.0),
            Vector2::new(-2.0, 5.5),
        ];
        let angles = [0.3, 1.7, -2.4, 5.0];

        for p in points {
            assert_eq!(p.rotate(0.0, pivot), p);

            for &a in &angles {
                let rotated = p.rotate(a, pivot);
                assert!((rotated.distance(&pivot) - p.distance(&pivot)).abs() < 1e-9);

                for &b in &angles {
                    let twice = rotated.rotate(b, pivot);
                    assert_eq!(twice, p.rotate(a + b, pivot));
                }
            }
        }
    }

    #[test]
    fn test_directed_angle_quadrants() {
        let east = Vector2::new(1.0, 0.0);
        let north = Vector2::new(0.0, 1.0);
        let west = Vector2::new(-1.0, 0.0);
        let south = Vector2::new(0.0, -1.0);

        assert!((east.directed_angle(&north) - FRAC_PI_2).abs() < 1e-12);
        assert!((north.directed_angle(&east) - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((east.directed_angle(&west) - PI).abs() < 1e-12);
        assert!((west.directed_angle(&south) - FRAC_PI_2).abs() < 1e-12);
        assert!((south.directed_angle(&east) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_directed_angle_range() {
        let samples: Vec<Vector2> = (0..24)
            .map(|i| {
                let theta = i as f64 * 0.29 - 3.0;
                Vector2::new(theta.cos() * (1.0 + i as f64), theta.sin())
            })
            .collect();

        for a in &samples {
            assert!(a.directed_angle(a).abs() < 1e-12);
            for b in &samples {
                let angle = a.directed_angle(b);
                assert!((0.0..TAU).contains(&angle), "angle {} out of range", angle);
            }
        }
    }

    #[test]
    fn test_directed_angle_never_reaches_full_turn() {
        let a = Vector2::new(1.0, 1e-17);
        let b = Vector2::new(1.0, 0.0);
        let angle = a.directed_angle(&b);
        assert!(angle < TAU);
    }

    #[test]
    fn test_directed_angle_across_signed_zero_cut() {
        let below = Vector2::new(-1.0, -0.0);
        let above = Vector2::new(-1.0, 0.0);
        let angle = below.directed_angle(&above);
        assert!((0.0..TAU).contains(&angle), "angle {angle} out of range");
        assert_eq!(angle, 0.0);
        assert_eq!(above.directed_angle(&below), 0.0);
    }

    #[test]
    fn test_orientation() {
        let p1 = Vector2::new(0.0, 0.0);
        let p2 = Vector2::new(1.0, 0.0);

        assert!(orientation(p1, p2, Vector2::new(2.0, 1.0)) > 0.0);
        assert!(orientation(p1, p2, Vector2::new(2.0, -1.0)) < 0.0);
        assert!(orientation(p1, p2, Vector2::new(2.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_nalgebra_conversion() {
        let v = Vector2::new(1.5, -2.5);
        let n: nalgebra::Vector2<f64> = v.into();
        assert_eq!(n, nalgebra::Vector2::new(1.5, -2.5));
        assert_eq!(Vector2::from(n), v);
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector2::new(1.0, 2.5).to_string(), "(1,2.5)");
    }
}
