use nalgebra as na;
use parry2d::shape as pshape;

use super::{
    CollisionQuery, broad,
    broad::WorldAccel,
    narrow_phase,
    settings::DEFAULT_SAFE_DISTANCE,
    types::{CapsuleSpec, CollisionHit, Iso, StaticShape, Vec2},
};

/// Immutable static-geometry backend for [`CollisionQuery`].
///
/// Built once from a list of [`StaticShape`]s; casting sweeps the mover's
/// capsule with parry2d's TOI query against broad-phase candidates. Statics do
/// not move after construction, so the accelerator is never rebuilt.
pub struct StaticWorld {
    statics: Vec<StaticShape>,
    accel: WorldAccel,
}

impl StaticWorld {
    /// Build a query world from a list of static shapes.
    pub fn new(statics: Vec<StaticShape>) -> Self {
        let accel = broad::build_world_accel(&statics);
        Self { statics, accel }
    }

    #[inline]
    pub fn statics(&self) -> &[StaticShape] {
        &self.statics
    }

    #[inline]
    fn push_hit(out: &mut Vec<CollisionHit>, hit: CollisionHit) -> bool {
        // The buffer is capacity-bounded; extra hits beyond it are dropped,
        // never grown into.
        if out.len() < out.capacity() {
            out.push(hit);
        }
        out.len() < out.capacity()
    }
}

impl CollisionQuery for StaticWorld {
    fn cast(
        &self,
        shape: &CapsuleSpec,
        origin: Vec2,
        dir: Vec2,
        max_dist: f32,
        out: &mut Vec<CollisionHit>,
    ) -> usize {
        let written_from = out.len();
        if max_dist <= 0.0 {
            return 0;
        }

        let vel = dir * max_dist;
        let capsule = pshape::Capsule::new_y(shape.half_height, shape.radius);
        let capsule_iso: Iso = Iso::from_parts(
            na::Translation2::new(origin.x, origin.y),
            na::UnitComplex::identity(),
        );

        // Test planes first (infinite; always included, not in the accel).
        for &idx in &self.accel.plane_indices {
            if let Some(hit) = narrow_phase::cast_capsule_against_static(
                capsule_iso,
                &capsule,
                vel,
                1.0,
                &self.statics[idx],
            ) {
                if !Self::push_hit(out, hit) {
                    return out.len() - written_from;
                }
            }
        }

        // Test finite shapes from the broad-phase candidate index list.
        let swept = broad::swept_capsule_aabb(*shape, origin, vel, DEFAULT_SAFE_DISTANCE);
        for idx in broad::query_candidates(&self.accel, &swept) {
            if let Some(hit) = narrow_phase::cast_capsule_against_static(
                capsule_iso,
                &capsule,
                vel,
                1.0,
                &self.statics[idx],
            ) {
                if !Self::push_hit(out, hit) {
                    return out.len() - written_from;
                }
            }
        }

        out.len() - written_from
    }
}
