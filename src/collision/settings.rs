/*!
Kinematic body settings and tolerances.

These constants centralize the default parameters used by the kinematic body,
the collision casts, and the locomotion driver. Keeping them together makes
tuning easier and helps ensure consistent behavior across callers.

Notes
- Distances are in meters, time in seconds.
- Favor practical world-space tolerances over machine epsilon for robust behavior.
- Per-character customization goes through `config::BodyTuning` /
  `config::ControllerTuning`; these are the defaults those structs start from.
*/

/// Separation from surfaces kept when landing or sliding (meters).
/// Too large creates visible gaps; too small risks jitter on contact.
pub const DEFAULT_SAFE_DISTANCE: f32 = 0.01;

/// Minimum displacement for a tick's motion to be applied (meters).
/// Moves below this are treated as zero to avoid tiny oscillations.
pub const DEFAULT_MIN_MOVE_DISTANCE: f32 = 0.001;

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, equality checks in world space, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Vertical speed (m/s) below which a body counts as vertically at rest and
/// becomes a grounding candidate.
pub const VERTICAL_SPEED_EPS: f32 = 1.0e-3;

/// Steepest surface incline still considered ground (degrees from horizontal).
pub const DEFAULT_MAX_SLOPE_DEG: f32 = 45.0;

/// Capacity of the reusable shape-cast hit buffer.
/// A backend reporting more hits than this is a contract violation.
pub const DEFAULT_CAST_CAPACITY: usize = 16;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Default gravity scale applied on top of the gravity vector.
pub const DEFAULT_GRAVITY_FACTOR: f32 = 1.0;

/// Speed clamp applied to the body's velocity on every write (m/s).
/// Doubles as the terminal fall speed.
pub const DEFAULT_MAX_SPEED: f32 = 25.0;

/// Default walking speed in meters per second for drivers that don't override it.
pub const DEFAULT_MOVE_SPEED: f32 = 5.0;

/// Default apex height of a full jump (meters).
pub const DEFAULT_JUMP_HEIGHT: f32 = 1.2;

/// Divisor applied to upward speed when the jump input is released mid-ascent.
pub const DEFAULT_STOP_JUMP_FACTOR: f32 = 2.0;

/// How long a jump request is remembered before landing (seconds).
pub const DEFAULT_JUMP_BUFFER_TIME: f32 = 0.12;

/// How long after leaving ground a jump is still honored (seconds).
pub const DEFAULT_COYOTE_TIME: f32 = 0.12;
