//! Axis-separated movement resolution
//!
//! An entity proposes where it wants to be; the resolver checks that spot
//! and, on overlap, pushes the entity out along the axis of least overlap.
//! Sliding along walls falls out of this: only the blocked axis is undone.

use glam::Vec3;

use super::aabb;
use super::query::{QueryFilter, SpatialQuery};
use super::registry::ColliderId;
use crate::config::LevelConfig;
use crate::constants::physics::{MAX_RESOLVER_ITERATIONS, RESOLVER_ITERATIONS};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    /// Committed position from the previous frame
    pub current: Vec3,
    pub proposed: Vec3,
    pub radius: f32,
    pub velocity: Vec3,
    /// The mover's own collider, if it has one
    pub ignore: Option<ColliderId>,
}

impl MoveRequest {
    pub fn new(current: Vec3, proposed: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            current,
            proposed,
            radius,
            velocity,
            ignore: None,
        }
    }

    pub fn ignoring(mut self, id: ColliderId) -> Self {
        self.ignore = Some(id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    pub position: Vec3,
    pub velocity: Vec3,
    pub collided: bool,
    /// Last collider pushed against
    pub collider: Option<ColliderId>,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Z,
}

/// Pushes movers out of solid colliders
#[derive(Debug, Clone, Copy)]
pub struct MovementResolver {
    iterations: u32,
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self::new(RESOLVER_ITERATIONS)
    }
}

impl MovementResolver {
    /// Passes are clamped to `1..=MAX_RESOLVER_ITERATIONS`
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations: iterations.clamp(1, MAX_RESOLVER_ITERATIONS),
        }
    }

    /// Resolver using the configured pass count
    pub fn from_config(config: &LevelConfig) -> Self {
        Self::new(config.resolver_iterations)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn resolve(&self, query: &SpatialQuery<'_>, request: MoveRequest) -> MoveResolution {
        let mut filter = QueryFilter::solid();
        filter.ignore = request.ignore;

        let mut resolution = MoveResolution {
            position: request.proposed,
            velocity: request.velocity,
            collided: false,
            collider: None,
        };

        for _ in 0..self.iterations {
            let hit = query.check_collision_filtered(resolution.position, request.radius, &filter);
            let Some(id) = hit.collider else {
                return resolution;
            };
            let Some(primitive) = query.registry().get(id) else {
                return resolution;
            };

            resolution.collided = true;
            resolution.collider = Some(id);
            push_out(&mut resolution, &primitive.bounds(), request.current, request.radius);
        }

        if query
            .check_collision_filtered(resolution.position, request.radius, &filter)
            .collides
        {
            log::trace!(
                "[MovementResolver] Still penetrating at ({:.2}, {:.2}, {:.2}) after {} passes",
                resolution.position.x,
                resolution.position.y,
                resolution.position.z,
                self.iterations
            );
        }

        resolution
    }
}

/// Move `resolution` to the nearest face of `bounds` on the axis of least
/// overlap, exactly `radius` away, and kill velocity on that axis
fn push_out(resolution: &mut MoveResolution, bounds: &aabb::AABB, current: Vec3, radius: f32) {
    let position = resolution.position;
    let (x_overlap, z_overlap) = aabb::aabb_overlap_xz(bounds, position, radius);
    let axis = if x_overlap <= z_overlap { Axis::X } else { Axis::Z };

    let center = aabb::aabb_center(bounds);
    let (p, c, prev, lo, hi) = match axis {
        Axis::X => (position.x, center.x, current.x, bounds.min.x, bounds.max.x),
        Axis::Z => (position.z, center.z, current.z, bounds.min.z, bounds.max.z),
    };

    let to_low = (p - lo).abs();
    let to_high = (hi - p).abs();
    let go_low = if p != c {
        to_low < to_high || (to_low == to_high && p < c)
    } else {
        // Dead centre; fall back to where the mover came from
        prev <= c
    };
    let target = if go_low { lo - radius } else { hi + radius };

    match axis {
        Axis::X => {
            resolution.position.x = target;
            resolution.velocity.x = 0.0;
        }
        Axis::Z => {
            resolution.position.z = target;
            resolution.velocity.z = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::aabb::create_aabb;
    use crate::physics::collider::{CollisionPrimitive, SurfaceKind, Tag, TagSet};
    use crate::physics::registry::ColliderRegistry;

    fn wall_x(x: f32) -> CollisionPrimitive {
        CollisionPrimitive::static_surface(
            create_aabb(Vec3::new(x - 0.25, 0.0, -10.0), Vec3::new(x + 0.25, 4.0, 10.0)),
            SurfaceKind::Wall,
        )
    }

    #[test]
    fn test_free_move_is_untouched() {
        let mut registry = ColliderRegistry::new();
        registry.add(wall_x(5.0));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0), 0.4, Vec3::X);
        let result = MovementResolver::default().resolve(&query, request);
        assert!(!result.collided);
        assert_eq!(result.position, request.proposed);
        assert_eq!(result.velocity, Vec3::X);
    }

    #[test]
    fn test_wall_pushes_back_to_radius() {
        let mut registry = ColliderRegistry::new();
        let wall = registry.add(wall_x(5.0));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(
            Vec3::new(4.0, 1.0, 0.0),
            Vec3::new(4.6, 1.0, 0.3),
            0.4,
            Vec3::new(3.0, 0.0, 1.0),
        );
        let result = MovementResolver::default().resolve(&query, request);

        assert!(result.collided);
        assert_eq!(result.collider, Some(wall));
        assert!((result.position.x - 4.35).abs() < 1e-5);
        assert_eq!(result.position.z, 0.3);
        assert_eq!(result.velocity, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_dead_centre_uses_previous_side() {
        let mut registry = ColliderRegistry::new();
        registry.add(wall_x(5.0));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(Vec3::new(6.0, 1.0, 0.0), Vec3::new(5.0, 1.0, 0.0), 0.4, Vec3::NEG_X);
        let result = MovementResolver::default().resolve(&query, request);
        assert!((result.position.x - 5.65).abs() < 1e-5);
    }

    #[test]
    fn test_triggers_do_not_block() {
        let mut registry = ColliderRegistry::new();
        registry.add(CollisionPrimitive::cylinder(
            Vec3::new(1.0, 1.0, 0.0),
            0.5,
            2.0,
            TagSet::new().with(Tag::Key),
        ));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.9, 1.0, 0.0), 0.4, Vec3::X);
        assert!(!MovementResolver::default().resolve(&query, request).collided);
    }

    #[test]
    fn test_own_collider_is_ignored() {
        let mut registry = ColliderRegistry::new();
        let me = registry.add(CollisionPrimitive::cylinder(
            Vec3::new(0.0, 1.0, 0.0),
            0.4,
            2.0,
            TagSet::new().with(Tag::Enemy),
        ));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.1, 1.0, 0.0), 0.4, Vec3::X).ignoring(me);
        assert!(!MovementResolver::default().resolve(&query, request).collided);
    }

    #[test]
    fn test_extra_passes_resolve_a_corner() {
        let mut registry = ColliderRegistry::new();
        registry.add(wall_x(5.0));
        registry.add(CollisionPrimitive::static_surface(
            create_aabb(Vec3::new(-10.0, 0.0, 2.75), Vec3::new(10.0, 4.0, 3.25)),
            SurfaceKind::Wall,
        ));
        let query = SpatialQuery::new(&registry);

        let request = MoveRequest::new(
            Vec3::new(4.0, 1.0, 2.0),
            Vec3::new(4.5, 1.0, 2.5),
            0.4,
            Vec3::new(1.0, 0.0, 1.0),
        );

        let single = MovementResolver::new(1).resolve(&query, request);
        assert!(query.check_collision_filtered(single.position, 0.4, &QueryFilter::solid()).collides);

        let multi = MovementResolver::new(4).resolve(&query, request);
        assert!(!query.check_collision_filtered(multi.position, 0.4, &QueryFilter::solid()).collides);
        assert_eq!(multi.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_iterations_clamped() {
        let config = LevelConfig {
            resolver_iterations: 3,
            ..Default::default()
        };
        assert_eq!(MovementResolver::from_config(&config).iterations(), 3);
        assert_eq!(MovementResolver::new(0).iterations(), 1);
        assert_eq!(MovementResolver::new(99).iterations(), MAX_RESOLVER_ITERATIONS);
    }
}
