/*!
Collision root module.

This module holds the shape-cast capability the kinematic body is resolved
against, split for clarity:

- types:        shared data types (Transform, StaticShape, CapsuleSpec, CollisionHit)
- settings:     body and tolerance constants
- broad:        broad-phase helpers (swept AABBs, candidate queries)
- narrow_phase: thin wrappers over parry2d shape casts
- world:        `StaticWorld`, the production `CollisionQuery` backend

The body never talks to parry directly; it sees only [`CollisionQuery`], so
tests can inject deterministic scripted backends instead of a physics engine.
*/

pub mod broad;
pub mod narrow_phase;
pub mod settings;
pub mod types;
pub mod world;

// Re-export commonly used types.
pub use types::{CapsuleSpec, CollisionHit, Rot2, StaticShape, Transform, Vec2};
pub use world::StaticWorld;

/// Shape-cast capability the kinematic body is resolved against.
///
/// Contract
/// - Sweep `shape` from `origin` along the unit direction `dir` for up to
///   `max_dist` meters and append every impact to `out`.
/// - `out` arrives cleared; implementations must never write more than
///   `out.capacity()` hits (extra impacts are dropped, the buffer is never
///   grown). The return value is the number of hits written.
/// - Casting is a pure read of the collision world; selection of the nearest
///   hit is the caller's job.
pub trait CollisionQuery {
    fn cast(
        &self,
        shape: &CapsuleSpec,
        origin: Vec2,
        dir: Vec2,
        max_dist: f32,
        out: &mut Vec<CollisionHit>,
    ) -> usize;
}

/// Convenience: build a `StaticShape::Plane` from a world-space pose:
/// - normal = rotation * +Y
/// - dist = dot(normal, translation) + optional offset
#[inline]
pub fn plane_from_pose(rotation: Rot2, translation: Vec2, offset_along_normal: f32) -> StaticShape {
    let normal = rotation * Vec2::new(0.0, 1.0);
    let dist = normal.dot(&translation) + offset_along_normal;
    StaticShape::Plane { normal, dist }
}

/// Convenience: build a `StaticShape::Cuboid` with given half extents and pose.
#[inline]
pub fn cuboid_from_pose(half_extents: Vec2, translation: Vec2, rotation: Rot2) -> StaticShape {
    StaticShape::Cuboid {
        half_extents,
        transform: Transform {
            translation,
            rotation,
        },
    }
}
