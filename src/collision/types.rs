/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- broad (static world acceleration structure and candidate queries)
- narrow_phase (parry2d shape-cast queries)
- world (the production `CollisionQuery` backend)
- the kinematic body and ground probing built on top
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Rot2 = na::UnitComplex<f32>;
pub type Iso = na::Isometry2<f32>;

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec2,
    pub rotation: Rot2,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec2, rotation: Rot2) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Axis-aligned placement at `translation`.
    #[inline]
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            rotation: Rot2::identity(),
        }
    }

    /// Convert to nalgebra `Isometry2` for use with parry2d narrow-phase queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(
            na::Translation2::new(self.translation.x, self.translation.y),
            self.rotation,
        )
    }
}

/// Static collision shapes supported by the world.
///
/// - Plane: infinite line in world space represented by its normal and offset
///          (dist) satisfying: normal ⋅ x = dist.
/// - Cuboid: oriented box with half-extents in local space, placed by `transform`.
/// - Circle: disc; rotation is ignored.
/// - Capsule: Y-aligned capsule placed by `transform`.
#[derive(Clone, Copy, Debug)]
pub enum StaticShape {
    Plane {
        /// World-space unit normal of the plane.
        normal: Vec2,
        /// Plane offset along the normal, i.e., normal ⋅ x = dist.
        dist: f32,
    },
    Cuboid {
        /// Local-space half-extents (hx, hy).
        half_extents: Vec2,
        /// World-space pose of the cuboid.
        transform: Transform,
    },
    Circle {
        /// Radius in meters.
        radius: f32,
        /// World-space pose (translation used; rotation ignored).
        transform: Transform,
    },
    Capsule {
        /// Radius of the end caps and the segment.
        radius: f32,
        /// Half of the segment length along the local +Y axis.
        half_height: f32,
        /// World-space pose of the capsule.
        transform: Transform,
    },
}

/// Capsule specification for kinematic movers.
///
/// half_height is the half-length of the segment section (aligned with +Y),
/// so the total capsule height is 2*half_height + 2*radius.
#[derive(Clone, Copy, Debug)]
pub struct CapsuleSpec {
    pub radius: f32,
    pub half_height: f32,
}

/// A single contact produced by a shape-cast query.
///
/// `distance` and `fraction` describe the same impact; `distance` is kept
/// explicit because nearest-hit selection and the safe-distance clamp are
/// expressed in meters along the cast.
#[derive(Clone, Copy, Debug)]
pub struct CollisionHit {
    /// World-space contact normal on the moving shape, opposing the cast direction.
    pub normal: Vec2,
    /// Distance (meters) along the cast where the hit occurred.
    pub distance: f32,
    /// Fraction (0..1) of the tested translation where the hit occurred.
    pub fraction: f32,
}
