use nalgebra as na;
use parry2d::{
    bounding_volume::Aabb,
    partitioning::{Bvh, BvhBuildStrategy},
    shape as pshape,
};

use super::types::{CapsuleSpec, StaticShape, Vec2};

/// Acceleration structure for broad-phase queries over immutable world statics.
///
/// Notes:
/// - Finite shapes (Cuboid, Circle, Capsule) are stored as world-space AABBs in
///   a BVH used to generate candidates. Planes are handled separately because
///   they are infinite.
/// - `finite_indices` maps each stored AABB back to its index in the original
///   `statics` slice.
/// - `plane_indices` stores indices of planes in the original `statics` slice.
pub struct WorldAccel {
    /// BVH over finite static shapes (AABBs).
    pub bvh: Bvh,
    /// Indices into the original `statics` slice for the AABBs above.
    pub finite_indices: Vec<usize>,
    /// Indices into the original `statics` slice for planes.
    pub plane_indices: Vec<usize>,
}

impl WorldAccel {
    /// Return true if this accelerator has no finite entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.finite_indices.is_empty()
    }

    /// Number of finite entries (AABBs) in this accelerator.
    #[inline]
    pub fn len(&self) -> usize {
        self.finite_indices.len()
    }
}

/// Build a broad-phase accelerator over immutable world statics.
///
/// - Finite shapes get a world-space AABB and are indexed in the BVH.
/// - Infinite shapes (Plane) are kept in `plane_indices` and must be tested
///   separately during queries.
pub fn build_world_accel(statics: &[StaticShape]) -> WorldAccel {
    let mut aabbs: Vec<Aabb> = Vec::new();
    let mut finite_indices: Vec<usize> = Vec::new();
    let mut plane_indices: Vec<usize> = Vec::new();

    for (i, s) in statics.iter().enumerate() {
        match *s {
            StaticShape::Plane { .. } => {
                plane_indices.push(i);
            }
            StaticShape::Cuboid {
                half_extents,
                transform,
            } => {
                aabbs.push(pshape::Cuboid::new(half_extents).aabb(&transform.iso()));
                finite_indices.push(i);
            }
            StaticShape::Circle { radius, transform } => {
                aabbs.push(pshape::Ball::new(radius).aabb(&transform.iso()));
                finite_indices.push(i);
            }
            StaticShape::Capsule {
                radius,
                half_height,
                transform,
            } => {
                aabbs.push(pshape::Capsule::new_y(half_height, radius).aabb(&transform.iso()));
                finite_indices.push(i);
            }
        }
    }

    WorldAccel {
        bvh: Bvh::from_leaves(BvhBuildStrategy::Binned, &aabbs),
        finite_indices,
        plane_indices,
    }
}

/// Compute a swept AABB for a Y-aligned capsule moving from `start_pos` to
/// `start_pos + desired`.
///
/// The resulting AABB is inflated by `margin` to conservatively include near misses.
pub fn swept_capsule_aabb(capsule: CapsuleSpec, start_pos: Vec2, desired: Vec2, margin: f32) -> Aabb {
    let shape = pshape::Capsule::new_y(capsule.half_height, capsule.radius);

    let iso_start = na::Isometry2::from_parts(
        na::Translation2::new(start_pos.x, start_pos.y),
        na::UnitComplex::identity(),
    );
    let end_pos = start_pos + desired;
    let iso_end = na::Isometry2::from_parts(
        na::Translation2::new(end_pos.x, end_pos.y),
        na::UnitComplex::identity(),
    );

    let mut swept = aabb_union(&shape.aabb(&iso_start), &shape.aabb(&iso_end));
    if margin > 0.0 {
        swept = aabb_inflate(&swept, margin);
    }
    swept
}

/// Query candidate static indices whose AABB intersects `swept`.
///
/// Returns indices referencing the original `statics` slice (not the local AABB array).
pub fn query_candidates(accel: &WorldAccel, swept: &Aabb) -> Vec<usize> {
    accel
        .bvh
        .intersect_aabb(swept)
        .map(|leaf_idx| accel.finite_indices[leaf_idx as usize])
        .collect()
}

/// Compute the union of two AABBs.
fn aabb_union(a: &Aabb, b: &Aabb) -> Aabb {
    Aabb {
        mins: na::Point2::new(a.mins.x.min(b.mins.x), a.mins.y.min(b.mins.y)),
        maxs: na::Point2::new(a.maxs.x.max(b.maxs.x), a.maxs.y.max(b.maxs.y)),
    }
}

/// Inflate an AABB by `margin` on all sides.
fn aabb_inflate(a: &Aabb, margin: f32) -> Aabb {
    let delta = na::Vector2::new(margin, margin);
    Aabb {
        mins: a.mins - delta,
        maxs: a.maxs + delta,
    }
}
