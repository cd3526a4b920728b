/*!
Locomotion driver for a [`KinematicBody`].

The controller owns the input-facing side of movement: a continuous move axis
and discrete jump transitions. Around the body's tick it layers the two
forgiveness mechanics, plus variable jump height:
- jump buffering: a request slightly before landing is remembered and fired
  on the Grounded transition
- coyote time: a request slightly after leaving ground is still honored
- releasing the input mid-ascent divides the upward speed
*/

use crate::body::{Actuator, KinematicBody, StepResult};
use crate::collision::{CollisionQuery, Vec2};
use crate::config::ControllerTuning;

/// Input events consumed by the controller.
///
/// The move axis is continuous in -1..1; jump is a pair of discrete edge
/// transitions, matching a started/canceled button model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Move(f32),
    JumpStarted,
    JumpCanceled,
}

/// Drives horizontal locomotion and jumping on a kinematic body.
pub struct CharacterController {
    tuning: ControllerTuning,
    move_axis: f32,
    jump_held: bool,
    /// Counts down after a jump press; a positive value is a pending request.
    jump_buffer_timer: f32,
    /// Counts up while airborne; reset on ground contact, spent on jump.
    coyote_timer: f32,
    /// Set on release, resolved (at most once) on the next update.
    jump_cut_pending: bool,
}

impl CharacterController {
    pub fn new(tuning: ControllerTuning) -> Result<Self, &'static str> {
        tuning.validate()?;
        Ok(Self {
            tuning,
            move_axis: 0.0,
            jump_held: false,
            jump_buffer_timer: 0.0,
            // Pre-spent: a body that has never had ground support gets no
            // coyote window.
            coyote_timer: tuning.coyote_time,
            jump_cut_pending: false,
        })
    }

    #[inline]
    pub fn tuning(&self) -> &ControllerTuning {
        &self.tuning
    }

    /// Feed one input event. Safe to call any number of times between updates.
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Move(axis) => self.move_axis = axis.clamp(-1.0, 1.0),
            InputEvent::JumpStarted => {
                self.jump_held = true;
                self.jump_buffer_timer = self.tuning.jump_buffer_time;
            }
            InputEvent::JumpCanceled => {
                self.jump_held = false;
                self.jump_cut_pending = true;
            }
        }
    }

    /// Run one fixed tick: drive the body horizontally, advance it, then
    /// resolve jump requests against the post-tick ground state.
    ///
    /// The returned [`StepResult`] is the body's tick result; a jump fired in
    /// the same update takes effect starting with the next tick.
    pub fn update(
        &mut self,
        dt: f32,
        body: &mut KinematicBody,
        world: &impl CollisionQuery,
        actuator: &mut impl Actuator,
    ) -> StepResult {
        // Timers: coyote counts up from the moment ground support is lost,
        // the jump buffer counts down from the press.
        if body.is_grounded() {
            self.coyote_timer = 0.0;
        } else {
            self.coyote_timer += dt;
        }
        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer -= dt;
        }

        // Horizontal drive. The body's clamping law bounds the result.
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(self.move_axis * self.tuning.move_speed, velocity.y));

        let result = body.tick(dt, world, actuator);

        // Jump resolution: a buffered request fires when the body has ground
        // support, real or within the coyote window. Consuming both timers
        // guarantees exactly one impulse per request.
        let wants_jump = self.jump_buffer_timer > 0.0;
        let can_jump = body.is_grounded() || self.coyote_timer < self.tuning.coyote_time;
        if wants_jump && can_jump {
            self.jump(body);
        }

        // Variable jump height: one cut per release, only while ascending.
        if self.jump_cut_pending {
            self.jump_cut_pending = false;
            let up = body.up();
            let ascent = body.velocity().dot(&up);
            if !body.is_grounded() && ascent > 0.0 {
                let velocity = body.velocity();
                body.set_velocity(
                    velocity - up * ascent + up * (ascent / self.tuning.stop_jump_factor),
                );
            }
        }

        result
    }

    fn jump(&mut self, body: &mut KinematicBody) {
        let impulse = (2.0 * body.gravity_accel() * self.tuning.jump_height).sqrt();
        let up = body.up();
        let velocity = body.velocity();
        let lateral = velocity - up * velocity.dot(&up);

        body.set_velocity(lateral + up * impulse);
        body.force_airborne();

        self.jump_buffer_timer = 0.0;
        self.coyote_timer = self.tuning.coyote_time;
        log::debug!("jump: impulse {impulse:.3} m/s");
    }
}
