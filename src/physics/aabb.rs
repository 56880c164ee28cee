//! Data-Oriented Axis-Aligned Bounding Box
//!
//! Pure functions over plain AABB data. The XZ helpers treat the box as a
//! footprint on the floor plane, which is how the dungeon collides entities.

use glam::{Vec2, Vec3};

use crate::constants::physics::RAY_PARALLEL_EPSILON;

/// Axis-Aligned Bounding Box - pure data structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

/// Create new AABB from min/max points
pub fn create_aabb(min: Vec3, max: Vec3) -> AABB {
    AABB { min, max }
}

/// Create AABB from center point and half extents
pub fn aabb_from_center_half_extents(center: Vec3, half_extents: Vec3) -> AABB {
    AABB {
        min: center - half_extents,
        max: center + half_extents,
    }
}

/// Get center point of AABB
pub fn aabb_center(aabb: &AABB) -> Vec3 {
    (aabb.min + aabb.max) * 0.5
}

/// Whether the XZ footprint contains `point` (Y ignored)
pub fn aabb_footprint_contains(aabb: &AABB, point: Vec3) -> bool {
    point.x >= aabb.min.x && point.x <= aabb.max.x &&
    point.z >= aabb.min.z && point.z <= aabb.max.z
}

/// Closest point of the XZ footprint to `point`, as `(x, z)`
pub fn aabb_closest_point_xz(aabb: &AABB, point: Vec3) -> Vec2 {
    Vec2::new(
        point.x.clamp(aabb.min.x, aabb.max.x),
        point.z.clamp(aabb.min.z, aabb.max.z),
    )
}

/// XZ distance from `point` to the box footprint; zero inside
pub fn aabb_distance_xz(aabb: &AABB, point: Vec3) -> f32 {
    let closest = aabb_closest_point_xz(aabb, point);
    Vec2::new(point.x - closest.x, point.z - closest.y).length()
}

/// Overlap of a `radius` square centred at `point` with the footprint, per axis.
///
/// Returns `(x_overlap, z_overlap)`; either is `<= 0` when they are separated
/// on that axis.
pub fn aabb_overlap_xz(aabb: &AABB, point: Vec3, radius: f32) -> (f32, f32) {
    let x = (point.x + radius).min(aabb.max.x) - (point.x - radius).max(aabb.min.x);
    let z = (point.z + radius).min(aabb.max.z) - (point.z - radius).max(aabb.min.z);
    (x, z)
}

/// Ray/box slab test
///
/// Returns `(t, normal)` of the entry point along a ray with non-zero
/// `direction`, limited to `0..=max_t`. A ray starting inside the box hits
/// at `t = 0` with the normal opposing the direction.
pub fn aabb_ray_intersection(aabb: &AABB, origin: Vec3, direction: Vec3, max_t: f32) -> Option<(f32, Vec3)> {
    let mut t_min: f32 = 0.0;
    let mut t_max: f32 = max_t;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let lo = aabb.min[axis];
        let hi = aabb.max[axis];

        if d.abs() < RAY_PARALLEL_EPSILON {
            // Ray is parallel to this slab
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (t_near, t_far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

        if t_near > t_min {
            t_min = t_near;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_max = t_max.min(t_far);

        if t_min > t_max {
            return None;
        }
    }

    if normal == Vec3::ZERO {
        // Started inside
        normal = -direction.normalize_or_zero();
    }

    Some((t_min, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABB {
        create_aabb(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_distance_xz_ignores_height() {
        let aabb = unit_box();
        assert_eq!(aabb_distance_xz(&aabb, Vec3::new(0.5, 50.0, 0.5)), 0.0);
        assert!((aabb_distance_xz(&aabb, Vec3::new(3.0, 0.0, 0.5)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_overlap_xz() {
        let wall = create_aabb(Vec3::new(-0.25, 0.0, -5.0), Vec3::new(0.25, 4.0, 5.0));
        let (x, z) = aabb_overlap_xz(&wall, Vec3::new(0.5, 1.0, 0.0), 0.4);
        assert!((x - 0.15).abs() < 1e-6);
        assert!((z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_ray_hits_top_face() {
        let aabb = create_aabb(Vec3::new(-1.0, -0.5, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let (t, normal) = aabb_ray_intersection(&aabb, Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y, 10.0).unwrap();
        assert!((t - 3.0).abs() < 1e-6);
        assert_eq!(normal, Vec3::Y);
    }

    #[test]
    fn test_ray_out_of_range_misses() {
        let aabb = unit_box();
        assert!(aabb_ray_intersection(&aabb, Vec3::new(0.5, 0.5, -5.0), Vec3::Z, 4.0).is_none());
        assert!(aabb_ray_intersection(&aabb, Vec3::new(0.5, 0.5, -5.0), Vec3::Z, 6.0).is_some());
    }
}
