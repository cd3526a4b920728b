use nalgebra as na;
use parry2d::{
    query::{self, ShapeCastOptions},
    shape as pshape,
};

use super::types::{CollisionHit, Iso, StaticShape, Vec2};

/// Cast a moving Y-aligned capsule against a single static shape and return the earliest hit (if any).
///
/// - `capsule_iso`: the capsule's starting isometry in world space.
/// - `capsule`: the capsule shape (Y-aligned) being swept.
/// - `vel`: the world-space translation vector for this cast (units: meters).
/// - `max_toi`: the maximum fraction of `vel` to consider (typically 1.0).
/// - `shape`: the static shape to test against.
///
/// Returns the impact normal (on the moving capsule, opposing the motion), the
/// impact distance in meters along `vel`, and the fraction where the hit occurs.
pub fn cast_capsule_against_static(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    vel: Vec2,
    max_toi: f32,
    shape: &StaticShape,
) -> Option<CollisionHit> {
    let (static_shape, static_iso): (Box<dyn pshape::Shape>, Iso) = match *shape {
        StaticShape::Plane { normal, dist } => {
            // Plane: represent as a parry HalfSpace with world normal, positioned at normal * dist.
            // Plane equation in world space: normal ⋅ x = dist
            let unit_n = na::Unit::new_normalize(normal);
            let plane = pshape::HalfSpace { normal: unit_n };
            let plane_iso = Iso::from_parts(
                na::Translation2::new((normal * dist).x, (normal * dist).y),
                na::UnitComplex::identity(),
            );
            (Box::new(plane), plane_iso)
        }
        StaticShape::Cuboid {
            half_extents,
            transform,
        } => (Box::new(pshape::Cuboid::new(half_extents)), transform.iso()),
        StaticShape::Circle { radius, transform } => {
            // Treat as a Ball; rotation is irrelevant.
            (Box::new(pshape::Ball::new(radius)), transform.iso())
        }
        StaticShape::Capsule {
            radius,
            half_height,
            transform,
        } => (
            Box::new(pshape::Capsule::new_y(half_height, radius)),
            transform.iso(),
        ),
    };

    // parry2d 0.25: use the builder to set maximum time of impact and pass options by value.
    let mut opts = ShapeCastOptions::with_max_time_of_impact(max_toi);
    opts.stop_at_penetration = true;

    if let Ok(Some(hit)) = query::cast_shapes(
        &capsule_iso,
        &vel,
        capsule as &dyn pshape::Shape,
        &static_iso,
        &na::Vector2::zeros(),
        &*static_shape,
        opts,
    ) {
        // Use the normal on the moving shape; ensure it opposes the motion.
        let mut n = Vec2::new(hit.normal1.into_inner().x, hit.normal1.into_inner().y);
        if n.dot(&vel) > 0.0 {
            n = -n;
        }
        return Some(CollisionHit {
            normal: n,
            distance: hit.time_of_impact * vel.norm(),
            fraction: hit.time_of_impact,
        });
    }
    None
}

/// Iterate over a list of static shapes and return the earliest capsule hit (if any).
///
/// Convenience wrapper that repeatedly calls [`cast_capsule_against_static`] and
/// selects the minimum impact distance across all shapes.
pub fn earliest_hit_capsule_vs_statics(
    capsule_iso: Iso,
    capsule: &pshape::Capsule,
    vel: Vec2,
    max_toi: f32,
    statics: &[StaticShape],
) -> Option<CollisionHit> {
    let mut best: Option<CollisionHit> = None;
    for s in statics {
        if let Some(hit) = cast_capsule_against_static(capsule_iso, capsule, vel, max_toi, s) {
            if best.as_ref().map_or(true, |b| hit.distance < b.distance) {
                best = Some(hit);
            }
        }
    }
    best
}
