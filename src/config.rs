/*!
Tuning structs for the kinematic body and the locomotion driver.

Everything here is set once, before the first tick; the body and controller
copy what they need at construction and never re-read a tuning struct mid-tick.
Tunings deserialize from RON so projects can keep character feel in data files.
*/

use serde::Deserialize;

use crate::collision::settings::{
    DEFAULT_CAST_CAPACITY, DEFAULT_COYOTE_TIME, DEFAULT_GRAVITY_FACTOR, DEFAULT_JUMP_BUFFER_TIME,
    DEFAULT_JUMP_HEIGHT, DEFAULT_MAX_SLOPE_DEG, DEFAULT_MAX_SPEED, DEFAULT_MIN_MOVE_DISTANCE,
    DEFAULT_MOVE_SPEED, DEFAULT_SAFE_DISTANCE, DEFAULT_STOP_JUMP_FACTOR, GRAVITY_MPS2,
};
use crate::collision::{CapsuleSpec, Vec2};

/// Tunables for a [`crate::body::KinematicBody`].
///
/// Units are meters/seconds; the slope limit is in degrees and is converted to
/// a cosine threshold once, at body construction.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// World gravity vector (m/s^2). Does not have to point along -Y.
    pub gravity: [f32; 2],
    /// Scale applied on top of `gravity`.
    pub gravity_factor: f32,
    /// Speed clamp applied on every velocity write (m/s).
    pub max_speed: f32,
    /// Displacements shorter than this are skipped entirely (meters).
    pub min_move_distance: f32,
    /// Separation kept from surfaces to avoid interpenetration (meters).
    pub safe_distance: f32,
    /// Steepest incline still considered ground (degrees from horizontal).
    pub max_slope_deg: f32,
    /// Capacity of the reusable shape-cast hit buffer.
    pub cast_capacity: usize,
    /// Radius of the mover capsule (meters).
    pub capsule_radius: f32,
    /// Half-length of the mover capsule's segment (meters).
    pub capsule_half_height: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            gravity: [0.0, -GRAVITY_MPS2],
            gravity_factor: DEFAULT_GRAVITY_FACTOR,
            max_speed: DEFAULT_MAX_SPEED,
            min_move_distance: DEFAULT_MIN_MOVE_DISTANCE,
            safe_distance: DEFAULT_SAFE_DISTANCE,
            max_slope_deg: DEFAULT_MAX_SLOPE_DEG,
            cast_capacity: DEFAULT_CAST_CAPACITY,
            capsule_radius: 0.25,
            capsule_half_height: 0.4,
        }
    }
}

impl BodyTuning {
    /// Validate the tuning before constructing a body.
    pub fn validate(&self) -> Result<(), &'static str> {
        let gravity = self.gravity_vec();
        if !gravity.x.is_finite() || !gravity.y.is_finite() || gravity.norm_squared() == 0.0 {
            return Err("gravity must be a finite, non-zero vector");
        }
        if !(self.gravity_factor.is_finite() && self.gravity_factor > 0.0) {
            return Err("gravity_factor must be positive");
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err("max_speed must be positive");
        }
        if !(self.min_move_distance.is_finite() && self.min_move_distance >= 0.0) {
            return Err("min_move_distance must be non-negative");
        }
        if !(self.safe_distance.is_finite() && self.safe_distance > 0.0) {
            return Err("safe_distance must be positive");
        }
        if !(self.max_slope_deg > 0.0 && self.max_slope_deg <= 90.0) {
            return Err("max_slope_deg must be in (0, 90]");
        }
        if self.cast_capacity == 0 {
            return Err("cast_capacity must be at least 1");
        }
        if !(self.capsule_radius > 0.0 && self.capsule_half_height > 0.0) {
            return Err("capsule dimensions must be positive");
        }
        Ok(())
    }

    #[inline]
    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::new(self.gravity[0], self.gravity[1])
    }

    /// Cosine threshold of the steepest standing slope: a surface counts as
    /// ground when `dot(normal, up) >= min_ground_normal_up()`.
    #[inline]
    pub fn min_ground_normal_up(&self) -> f32 {
        self.max_slope_deg.to_radians().cos()
    }

    #[inline]
    pub fn capsule(&self) -> CapsuleSpec {
        CapsuleSpec {
            radius: self.capsule_radius,
            half_height: self.capsule_half_height,
        }
    }
}

/// Tunables for a [`crate::controller::CharacterController`].
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ControllerTuning {
    /// Horizontal locomotion speed (m/s).
    pub move_speed: f32,
    /// Apex height of a full, uninterrupted jump (meters).
    pub jump_height: f32,
    /// Divisor applied to upward speed when the jump input is released mid-ascent.
    pub stop_jump_factor: f32,
    /// How long a jump request is remembered before landing (seconds).
    pub jump_buffer_time: f32,
    /// How long after leaving ground a jump is still honored (seconds).
    pub coyote_time: f32,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            jump_height: DEFAULT_JUMP_HEIGHT,
            stop_jump_factor: DEFAULT_STOP_JUMP_FACTOR,
            jump_buffer_time: DEFAULT_JUMP_BUFFER_TIME,
            coyote_time: DEFAULT_COYOTE_TIME,
        }
    }
}

impl ControllerTuning {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err("move_speed must be non-negative");
        }
        if !(self.jump_height.is_finite() && self.jump_height > 0.0) {
            return Err("jump_height must be positive");
        }
        if !(self.stop_jump_factor.is_finite() && self.stop_jump_factor >= 1.0) {
            return Err("stop_jump_factor must be >= 1");
        }
        if !(self.jump_buffer_time.is_finite() && self.jump_buffer_time >= 0.0) {
            return Err("jump_buffer_time must be non-negative");
        }
        if !(self.coyote_time.is_finite() && self.coyote_time >= 0.0) {
            return Err("coyote_time must be non-negative");
        }
        Ok(())
    }
}

/// Aggregate tuning for one character, loadable from a RON file.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub body: BodyTuning,
    pub controller: ControllerTuning,
}

impl Tuning {
    /// Parse a tuning from RON text and validate it.
    pub fn from_ron_str(text: &str) -> Result<Self, String> {
        let tuning: Tuning =
            ron::from_str(text).map_err(|e| format!("tuning parse error: {e}"))?;
        tuning.validate().map_err(|e| e.to_string())?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        self.body.validate()?;
        self.controller.validate()
    }
}
