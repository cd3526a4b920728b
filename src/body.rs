/*!
The kinematic body: a fixed-timestep 2D mover resolved against a
[`CollisionQuery`] capability.

Each tick is one pass of a two-state machine (order matters):
1. Grounding check: a body with near-zero vertical speed probes along
   gravity for standable ground within this tick's gravity pull.
2. Gravity integration: airborne bodies accumulate gravity.
3. Displacement: motion is swept against the collision world, clamped short
   of the nearest surface by the safe distance, and the velocity component
   into the surface is removed so sliding along it is preserved.

The body owns its position and a reusable capacity-bounded hit buffer; the
resolved position is pushed out through an [`Actuator`], which must not do any
collision resolution of its own.
*/

use crate::collision::settings::{DIST_EPS, VERTICAL_SPEED_EPS};
use crate::collision::{CapsuleSpec, CollisionHit, CollisionQuery, Vec2};
use crate::config::BodyTuning;

/// The two locomotion states. Grounded means resting on a sufficiently flat
/// surface; Airborne means free motion under gravity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyState {
    Grounded,
    Airborne,
}

/// Applies a resolved position to the physical object.
///
/// Implementations must not perform collision resolution; the body owns that.
pub trait Actuator {
    fn set_position(&mut self, position: Vec2);
}

/// Output of a single [`KinematicBody::tick`].
#[derive(Clone, Copy, Debug)]
pub struct StepResult {
    /// Body position after the tick (world space).
    pub position: Vec2,
    /// Whether the body ended the tick with ground support.
    pub grounded: bool,
    /// `(previous, new)` state when this tick changed the locomotion state.
    pub transition: Option<(BodyState, BodyState)>,
    /// Whether the actuator was called this tick.
    pub moved: bool,
}

/// A 2D kinematic mover with custom grounding, gravity, and slide resolution.
pub struct KinematicBody {
    position: Vec2,
    velocity: Vec2,
    state: BodyState,
    ground_normal: Vec2,

    capsule: CapsuleSpec,
    gravity: Vec2,
    gravity_factor: f32,
    safe_distance: f32,
    cast_capacity: usize,

    // Derived once from the tuning; invariant: always consistent with it.
    gravity_dir: Vec2,
    gravity_mag: f32,
    up: Vec2,
    min_ground_normal_up: f32,
    sq_max_speed: f32,
    sq_min_move_distance: f32,

    // Reusable cast result buffer; one cast in flight at a time.
    hits: Vec<CollisionHit>,
}

impl KinematicBody {
    /// Construct a body at `spawn` from a validated tuning.
    pub fn new(tuning: BodyTuning, spawn: Vec2) -> Result<Self, &'static str> {
        tuning.validate()?;

        let gravity = tuning.gravity_vec();
        let gravity_mag = gravity.norm();
        let gravity_dir = gravity / gravity_mag;

        Ok(Self {
            position: spawn,
            velocity: Vec2::zeros(),
            state: BodyState::Airborne,
            ground_normal: Vec2::zeros(),
            capsule: tuning.capsule(),
            gravity,
            gravity_factor: tuning.gravity_factor,
            safe_distance: tuning.safe_distance,
            cast_capacity: tuning.cast_capacity,
            gravity_dir,
            gravity_mag,
            up: -gravity_dir,
            min_ground_normal_up: tuning.min_ground_normal_up(),
            sq_max_speed: tuning.max_speed * tuning.max_speed,
            sq_min_move_distance: tuning.min_move_distance * tuning.min_move_distance,
            hits: Vec::with_capacity(tuning.cast_capacity),
        })
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity. While Grounded the x component is the along-surface
    /// speed; while Airborne this is the full 2D velocity.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn state(&self) -> BodyState {
        self.state
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state == BodyState::Grounded
    }

    /// Surface normal of the supporting ground; zero while Airborne.
    #[inline]
    pub fn ground_normal(&self) -> Vec2 {
        self.ground_normal
    }

    /// Unit vector opposing gravity.
    #[inline]
    pub fn up(&self) -> Vec2 {
        self.up
    }

    /// Effective gravitational acceleration magnitude (factor applied).
    #[inline]
    pub fn gravity_accel(&self) -> f32 {
        self.gravity_factor * self.gravity_mag
    }

    #[inline]
    pub fn capsule(&self) -> CapsuleSpec {
        self.capsule
    }

    /// Teleport the body. Does not touch velocity or state; the next tick
    /// re-derives grounding from the new position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Write the velocity, clamped to the configured maximum speed.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.clamp_speed();
    }

    /// Force the body airborne (e.g., a jump impulse). Returns the state
    /// transition when the body was previously grounded.
    pub fn force_airborne(&mut self) -> Option<(BodyState, BodyState)> {
        let previous = self.state;
        self.state = BodyState::Airborne;
        self.ground_normal = Vec2::zeros();
        (previous != self.state).then_some((previous, self.state))
    }

    /// Advance one fixed timestep against `world`, pushing any resolved
    /// motion through `actuator`.
    pub fn tick(
        &mut self,
        dt: f32,
        world: &impl CollisionQuery,
        actuator: &mut impl Actuator,
    ) -> StepResult {
        let previous = self.state;

        // 1) Grounding check. Vertical speed is measured along gravity, not
        // the world Y axis, so tilted gravity still grounds correctly.
        let vertical_speed = self.velocity.dot(&self.gravity_dir);
        if vertical_speed.abs() <= VERTICAL_SPEED_EPS {
            let probe = self.gravity_factor * dt * self.gravity_mag + self.safe_distance;
            match self.nearest_hit(world, self.gravity_dir, probe) {
                Some(hit) if hit.normal.dot(&self.up) >= self.min_ground_normal_up => {
                    self.state = BodyState::Grounded;
                    self.ground_normal = hit.normal;
                }
                _ => {
                    self.state = BodyState::Airborne;
                    self.ground_normal = Vec2::zeros();
                }
            }
        } else {
            self.state = BodyState::Airborne;
            self.ground_normal = Vec2::zeros();
        }

        // 2) Gravity integration. Grounded bodies are supported by the
        // surface and accumulate nothing.
        if self.state == BodyState::Airborne {
            self.velocity += dt * self.gravity_factor * self.gravity;
            self.clamp_speed();
        }

        // 3) Displacement. Grounded motion runs along the surface tangent;
        // airborne motion uses the full velocity.
        let displacement = match self.state {
            BodyState::Grounded => {
                let n = self.ground_normal;
                Vec2::new(n.y, -n.x) * (self.velocity.x * dt)
            }
            BodyState::Airborne => self.velocity * dt,
        };

        let sq_len = displacement.norm_squared();
        let mut moved = false;
        if sq_len >= self.sq_min_move_distance && sq_len > DIST_EPS * DIST_EPS {
            let len = sq_len.sqrt();
            let dir = displacement / len;
            let mut travel = len;

            if let Some(hit) = self.nearest_hit(world, dir, len + self.safe_distance) {
                // Stop short of the surface and cancel the velocity component
                // into it; motion along the surface survives.
                travel = travel.min((hit.distance - self.safe_distance).max(0.0));
                let n = hit.normal;
                self.velocity -= n * self.velocity.dot(&n);
                self.clamp_speed();
            }

            self.position += dir * travel;
            actuator.set_position(self.position);
            moved = true;
        }

        let transition = (previous != self.state).then_some((previous, self.state));
        if let Some((from, to)) = transition {
            log::debug!("body state {from:?} -> {to:?} at {:?}", self.position);
        }

        StepResult {
            position: self.position,
            grounded: self.state == BodyState::Grounded,
            transition,
            moved,
        }
    }

    /// Run one cast through the reusable buffer and select the nearest hit
    /// (minimum distance; ties keep the earlier buffer entry).
    fn nearest_hit(&mut self, world: &impl CollisionQuery, dir: Vec2, max_dist: f32) -> Option<CollisionHit> {
        self.hits.clear();
        let count = world.cast(&self.capsule, self.position, dir, max_dist, &mut self.hits);
        assert!(
            count <= self.cast_capacity,
            "collision backend overflowed the cast buffer: {count} hits for capacity {}",
            self.cast_capacity
        );

        let mut best: Option<CollisionHit> = None;
        for hit in &self.hits {
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(*hit);
            }
        }
        best
    }

    /// Enforce the clamping law: `|velocity| <= max_speed` after every write.
    fn clamp_speed(&mut self) {
        let sq = self.velocity.norm_squared();
        if sq > self.sq_max_speed {
            self.velocity *= (self.sq_max_speed / sq).sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Deterministic scripted backend: each cast pops the next response.
    /// An exhausted script reports no hits.
    struct ScriptedQuery {
        responses: RefCell<VecDeque<Vec<CollisionHit>>>,
    }

    impl ScriptedQuery {
        fn new(responses: Vec<Vec<CollisionHit>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
            }
        }
    }

    impl CollisionQuery for ScriptedQuery {
        fn cast(
            &self,
            _shape: &CapsuleSpec,
            _origin: Vec2,
            _dir: Vec2,
            _max_dist: f32,
            out: &mut Vec<CollisionHit>,
        ) -> usize {
            let hits = self.responses.borrow_mut().pop_front().unwrap_or_default();
            let room = out.capacity() - out.len();
            for hit in hits.into_iter().take(room) {
                out.push(hit);
            }
            out.len()
        }
    }

    /// Backend that violates the buffer contract on purpose.
    struct OverflowingQuery;

    impl CollisionQuery for OverflowingQuery {
        fn cast(
            &self,
            _shape: &CapsuleSpec,
            _origin: Vec2,
            _dir: Vec2,
            _max_dist: f32,
            out: &mut Vec<CollisionHit>,
        ) -> usize {
            for _ in 0..out.capacity() + 3 {
                out.push(hit(1.0, Vec2::new(0.0, 1.0)));
            }
            out.len()
        }
    }

    #[derive(Default)]
    struct RecordingActuator {
        positions: Vec<Vec2>,
    }

    impl Actuator for RecordingActuator {
        fn set_position(&mut self, position: Vec2) {
            self.positions.push(position);
        }
    }

    fn hit(distance: f32, normal: Vec2) -> CollisionHit {
        CollisionHit {
            normal,
            distance,
            fraction: 0.5,
        }
    }

    fn body_at(spawn: Vec2) -> KinematicBody {
        KinematicBody::new(BodyTuning::default(), spawn).expect("default tuning is valid")
    }

    const DT: f32 = 0.02;

    #[test]
    fn velocity_writes_are_clamped_to_max_speed() {
        let mut body = body_at(Vec2::zeros());
        body.set_velocity(Vec2::new(300.0, -400.0));

        let speed = body.velocity().norm();
        assert!((speed - 25.0).abs() < 1.0e-4);
        // Direction is preserved.
        assert!((body.velocity().x / body.velocity().y + 0.75).abs() < 1.0e-4);
    }

    #[test]
    fn nearest_hit_selection_takes_minimum_distance() {
        // Airborne rightward motion; the cast reports three walls in
        // arbitrary order and only the distance-2 hit must matter.
        let mut body = body_at(Vec2::zeros());
        body.set_velocity(Vec2::new(10.0, 0.0));

        let wall = Vec2::new(-1.0, 0.0);
        let world = ScriptedQuery::new(vec![
            // Vertical speed is 0, so the grounding probe casts first: no support.
            Vec::new(),
            vec![hit(5.0, wall), hit(2.0, wall), hit(8.0, wall)],
        ]);
        let mut actuator = RecordingActuator::default();

        let result = body.tick(DT, &world, &mut actuator);

        // The nearest wall sits at 2.0 m, far beyond this tick's 0.2 m of
        // horizontal travel, so the full move happens.
        assert!((result.position.x - 0.2).abs() < 1.0e-5);

        // Velocity into the nearest wall is cancelled.
        assert!(body.velocity().x.abs() < 1.0e-5);
    }

    #[test]
    fn collision_clips_velocity_along_the_hit_normal() {
        let mut body = body_at(Vec2::zeros());
        body.set_velocity(Vec2::new(4.0, -3.0));

        let normal = Vec2::new(-0.6, 0.8);
        let world = ScriptedQuery::new(vec![vec![hit(0.02, normal)]]);
        let mut actuator = RecordingActuator::default();

        body.tick(DT, &world, &mut actuator);

        assert!(body.velocity().dot(&normal).abs() < 1.0e-5);
    }

    #[test]
    fn resting_on_flat_ground_is_idempotent() {
        let mut body = body_at(Vec2::new(0.0, 1.0));
        let up = Vec2::new(0.0, 1.0);

        // Every ground probe reports support just below the body.
        let world = ScriptedQuery::new(vec![
            vec![hit(0.01, up)],
            vec![hit(0.01, up)],
            vec![hit(0.01, up)],
        ]);
        let mut actuator = RecordingActuator::default();

        let first = body.tick(DT, &world, &mut actuator);
        assert_eq!(
            first.transition,
            Some((BodyState::Airborne, BodyState::Grounded))
        );

        for _ in 0..2 {
            let result = body.tick(DT, &world, &mut actuator);
            assert_eq!(body.state(), BodyState::Grounded);
            assert_eq!(result.transition, None);
            assert!(!result.moved);
        }

        // Never any actuator call: displacement stayed at zero throughout.
        assert!(actuator.positions.is_empty());
        assert!((body.position() - Vec2::new(0.0, 1.0)).norm() < 1.0e-6);
    }

    #[test]
    fn ground_normal_is_zero_iff_airborne() {
        let mut body = body_at(Vec2::zeros());
        let world = ScriptedQuery::new(vec![vec![hit(0.01, Vec2::new(0.0, 1.0))]]);
        let mut actuator = RecordingActuator::default();

        body.tick(DT, &world, &mut actuator);
        assert!(body.is_grounded());
        assert!((body.ground_normal() - Vec2::new(0.0, 1.0)).norm() < 1.0e-6);

        body.force_airborne();
        assert!(!body.is_grounded());
        assert_eq!(body.ground_normal(), Vec2::zeros());
    }

    #[test]
    fn steep_surfaces_do_not_count_as_ground() {
        let mut body = body_at(Vec2::zeros());

        // 60 degrees from vertical: dot(normal, up) = 0.5 < cos(45 deg).
        let steep = Vec2::new(0.866_025_4, 0.5);
        let world = ScriptedQuery::new(vec![vec![hit(0.01, steep)]]);
        let mut actuator = RecordingActuator::default();

        body.tick(DT, &world, &mut actuator);
        assert_eq!(body.state(), BodyState::Airborne);
        assert_eq!(body.ground_normal(), Vec2::zeros());
    }

    #[test]
    fn sub_threshold_displacement_skips_motion_entirely() {
        let mut tuning = BodyTuning::default();
        tuning.min_move_distance = 0.01;
        let mut body = KinematicBody::new(tuning, Vec2::zeros()).unwrap();

        // 0.1 m/s for 0.02 s = 0.002 m, below the 0.01 m threshold. The
        // vertical speed is zero so only the ground probe runs.
        body.set_velocity(Vec2::new(0.1, 0.0));
        let world = ScriptedQuery::new(vec![vec![hit(0.005, Vec2::new(0.0, 1.0))]]);
        let mut actuator = RecordingActuator::default();

        let result = body.tick(DT, &world, &mut actuator);

        assert!(!result.moved);
        assert!(actuator.positions.is_empty());
        assert_eq!(body.position(), Vec2::zeros());
    }

    #[test]
    fn falling_body_lands_with_safe_separation_then_grounds() {
        // The end-to-end landing scenario: a falling body meets flat ground
        // at 0.05 m; it must advance 0.04 m (safe distance 0.01 m), zero its
        // vertical speed, and be promoted to Grounded on the following tick.
        let mut body = body_at(Vec2::new(0.0, 1.0));
        body.set_velocity(Vec2::new(0.0, -2.0));

        let up = Vec2::new(0.0, 1.0);
        let world = ScriptedQuery::new(vec![
            // tick 1: falling -> no ground candidacy, one displacement cast.
            vec![hit(0.05, up)],
            // tick 2: vertically at rest -> ground probe finds support.
            vec![hit(0.01, up)],
        ]);
        let mut actuator = RecordingActuator::default();

        let first = body.tick(DT, &world, &mut actuator);
        assert!((first.position.y - 0.96).abs() < 1.0e-5);
        assert!(body.velocity().y.abs() < 1.0e-5);
        assert_eq!(body.state(), BodyState::Airborne);
        assert_eq!(actuator.positions.len(), 1);

        let second = body.tick(DT, &world, &mut actuator);
        assert_eq!(
            second.transition,
            Some((BodyState::Airborne, BodyState::Grounded))
        );
        assert_eq!(body.state(), BodyState::Grounded);
        // Resting: no further actuator call.
        assert_eq!(actuator.positions.len(), 1);
    }

    #[test]
    #[should_panic(expected = "collision backend overflowed the cast buffer")]
    fn overflowing_backend_is_a_contract_violation() {
        let mut body = body_at(Vec2::zeros());
        let mut actuator = RecordingActuator::default();

        body.tick(DT, &OverflowingQuery, &mut actuator);
    }
}
