//! Spatial queries over a collider registry
//!
//! Entities are vertical cylinders. Every query is a linear scan of the
//! registry; a dungeon level holds a few hundred colliders at most.

use glam::{Vec2, Vec3};

use super::aabb::{self, AABB};
use super::collider::{ColliderShape, CollisionPrimitive};
use super::registry::{ColliderId, ColliderRegistry};
use crate::constants::physics::RAY_PARALLEL_EPSILON;

/// Which colliders a query skips
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub exclude_enemies: bool,
    pub exclude_triggers: bool,
    pub exclude_floors: bool,
    /// Usually the querying entity's own collider
    pub ignore: Option<ColliderId>,
}

impl QueryFilter {
    /// Colliders that block horizontal movement: no triggers, no floor slabs
    pub fn solid() -> Self {
        Self {
            exclude_triggers: true,
            exclude_floors: true,
            ..Default::default()
        }
    }

    pub fn excluding_enemies(mut self) -> Self {
        self.exclude_enemies = true;
        self
    }

    pub fn ignoring(mut self, id: ColliderId) -> Self {
        self.ignore = Some(id);
        self
    }

    pub fn accepts(&self, id: ColliderId, primitive: &CollisionPrimitive) -> bool {
        if self.ignore == Some(id) {
            return false;
        }
        if self.exclude_enemies && primitive.tags.has_enemy() {
            return false;
        }
        if self.exclude_triggers && primitive.is_trigger() {
            return false;
        }
        if self.exclude_floors && primitive.is_floor() {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub collides: bool,
    pub collider: Option<ColliderId>,
}

impl CollisionResult {
    pub const NONE: CollisionResult = CollisionResult {
        collides: false,
        collider: None,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorHit {
    pub point: Vec3,
    pub collider: ColliderId,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
    pub collider: ColliderId,
}

/// `(distance, extra)`: XZ distance from `point` to the shape's core (box
/// footprint or cylinder axis) and the shape's own radius on top of it
fn xz_gap(shape: &ColliderShape, point: Vec3) -> (f32, f32) {
    match shape {
        ColliderShape::Aabb(b) => (aabb::aabb_distance_xz(b, point), 0.0),
        ColliderShape::Cylinder { center, radius, .. } => {
            let d = Vec2::new(point.x - center.x, point.z - center.z).length();
            (d, *radius)
        }
    }
}

/// Read-only view of a registry
#[derive(Clone, Copy)]
pub struct SpatialQuery<'a> {
    registry: &'a ColliderRegistry,
}

impl<'a> SpatialQuery<'a> {
    pub fn new(registry: &'a ColliderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ColliderRegistry {
        self.registry
    }

    /// Does an entity of `radius` at `point` overlap anything?
    pub fn check_collision(&self, point: Vec3, radius: f32, exclude_enemies: bool) -> CollisionResult {
        let filter = QueryFilter {
            exclude_enemies,
            ..Default::default()
        };
        self.check_collision_filtered(point, radius, &filter)
    }

    /// Overlap test honouring `filter`. The hit with the smallest penetration
    /// gap wins; ties keep the earlier collider in registry order.
    pub fn check_collision_filtered(&self, point: Vec3, radius: f32, filter: &QueryFilter) -> CollisionResult {
        let mut best: Option<(f32, ColliderId)> = None;

        for (id, primitive) in self.registry.iter() {
            if !filter.accepts(id, primitive) || !primitive.shape.spans_height(point.y) {
                continue;
            }

            let (distance, extra) = xz_gap(&primitive.shape, point);
            let reach = radius + extra;
            if distance >= reach {
                continue;
            }

            let gap = distance - extra;
            if best.map_or(true, |(g, _)| gap < g) {
                best = Some((gap, id));
            }
        }

        match best {
            Some((_, id)) => CollisionResult {
                collides: true,
                collider: Some(id),
            },
            None => CollisionResult::NONE,
        }
    }

    /// Every collider overlapping the entity, in registry order
    pub fn overlapping(&self, point: Vec3, radius: f32, filter: &QueryFilter) -> Vec<ColliderId> {
        self.registry
            .iter()
            .filter(|(id, p)| filter.accepts(*id, p) && p.shape.spans_height(point.y))
            .filter(|(_, p)| {
                let (distance, extra) = xz_gap(&p.shape, point);
                distance < radius + extra
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Highest floor top at or below `origin`, within `max_distance`
    pub fn find_floor_below(&self, origin: Vec3, max_distance: f32) -> Option<FloorHit> {
        if max_distance.is_nan() || max_distance < 0.0 {
            return None;
        }

        let mut best: Option<FloorHit> = None;
        for (id, primitive) in self.registry.iter() {
            if !primitive.is_floor() {
                continue;
            }
            let ColliderShape::Aabb(bounds) = primitive.shape else {
                continue;
            };
            if !aabb::aabb_footprint_contains(&bounds, origin) {
                continue;
            }

            let top = bounds.max.y;
            if top > origin.y || origin.y - top > max_distance {
                continue;
            }
            if best.map_or(true, |hit| top > hit.point.y) {
                best = Some(FloorHit {
                    point: Vec3::new(origin.x, top, origin.z),
                    collider: id,
                });
            }
        }
        best
    }

    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.raycast_filtered(origin, direction, max_distance, &QueryFilter::default())
    }

    /// Nearest hit along a ray; `direction` need not be normalized
    pub fn raycast_filtered(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: &QueryFilter,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance.is_nan() || max_distance <= 0.0 {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for (id, primitive) in self.registry.iter() {
            if !filter.accepts(id, primitive) {
                continue;
            }

            let hit = match primitive.shape {
                ColliderShape::Aabb(ref bounds) => ray_aabb(bounds, origin, dir, max_distance),
                ColliderShape::Cylinder { center, radius, height } => {
                    ray_cylinder(center, radius, height, origin, dir, max_distance)
                }
            };

            if let Some((distance, normal)) = hit {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(RayHit {
                        point: origin + dir * distance,
                        normal,
                        distance,
                        collider: id,
                    });
                }
            }
        }
        best
    }
}

fn ray_aabb(bounds: &AABB, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
    aabb::aabb_ray_intersection(bounds, origin, dir, max_distance)
}

/// Ray against a vertical cylinder: curved side plus both caps
fn ray_cylinder(center: Vec3, radius: f32, height: f32, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<(f32, Vec3)> {
    let bottom = center.y - height * 0.5;
    let top = center.y + height * 0.5;
    let ox = origin.x - center.x;
    let oz = origin.z - center.z;

    // Origin inside: hit at t = 0, like the box slab
    if ox * ox + oz * oz <= radius * radius && origin.y >= bottom && origin.y <= top {
        return Some((0.0, -dir));
    }

    let mut best: Option<(f32, Vec3)> = None;
    let mut consider = |t: f32, normal: Vec3| {
        if t >= 0.0 && t <= max_distance && best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, normal));
        }
    };

    // Side
    let a = dir.x * dir.x + dir.z * dir.z;
    if a > RAY_PARALLEL_EPSILON {
        let b = 2.0 * (ox * dir.x + oz * dir.z);
        let c = ox * ox + oz * oz - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sqrt_disc = disc.sqrt();
            for t in [(-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)] {
                let y = origin.y + dir.y * t;
                if t >= 0.0 && y >= bottom && y <= top {
                    let p = origin + dir * t;
                    let normal = Vec3::new(p.x - center.x, 0.0, p.z - center.z).normalize_or_zero();
                    consider(t, normal);
                    break;
                }
            }
        }
    }

    // Caps
    if dir.y.abs() > RAY_PARALLEL_EPSILON {
        for (cap_y, normal) in [(top, Vec3::Y), (bottom, Vec3::NEG_Y)] {
            let t = (cap_y - origin.y) / dir.y;
            let p = origin + dir * t;
            let dx = p.x - center.x;
            let dz = p.z - center.z;
            if dx * dx + dz * dz <= radius * radius {
                consider(t, normal);
            }
        }
    }

    best
}
