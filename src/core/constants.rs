//! Physical constants and system parameters

/// Tolerance for approximate vector equality and "zero length" checks (meters)
pub const EPSILON: f64 = 1e-4;

/// Default top speed of the robot (m/s)
pub const MAX_SPEED: f64 = 1.6;

/// Default arena dimensions (meters)
pub const ARENA_WIDTH: f64 = 3.0;
pub const ARENA_HEIGHT: f64 = 2.0;

/// Chi-square quantiles for 2 degrees of freedom
pub const CHI2_2DOF_90: f64 = 4.605;
pub const CHI2_2DOF_95: f64 = 5.991;
pub const CHI2_2DOF_99: f64 = 9.210;

/// Display scale used by the renderer only
pub const PX_PER_METER: f64 = 400.0;

/// Ellipses whose major axis is at most this many pixels are not drawn
pub const MIN_ELLIPSE_PX: f64 = 5.0;
