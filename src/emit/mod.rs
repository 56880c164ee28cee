//! Geometry emission
//!
//! Turns rooms and corridor legs into render surface descriptors for the
//! presentation layer and static collision primitives for the registry.

pub mod walls;

pub use walls::{segment_wall, wall_key, WallDedup, WallSegment};

use glam::Vec3;

use crate::config::LevelConfig;
use crate::constants::geometry::FLOOR_LEVEL;
use crate::geometry::{Corridor, Rect, Room};
use crate::physics::aabb::{create_aabb, AABB};
use crate::physics::{CollisionPrimitive, SurfaceKind};

/// What the renderer needs to build one quad or box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSurface {
    pub kind: SurfaceKind,
    pub bounds: AABB,
    pub normal: Vec3,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderGeometry {
    pub floors: Vec<RenderSurface>,
    pub walls: Vec<RenderSurface>,
    pub ceilings: Vec<RenderSurface>,
}

impl RenderGeometry {
    pub fn surface_count(&self) -> usize {
        self.floors.len() + self.walls.len() + self.ceilings.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmittedGeometry {
    pub render: RenderGeometry,
    /// Floors and walls; ceilings are render-only
    pub colliders: Vec<CollisionPrimitive>,
}

impl EmittedGeometry {
    pub fn colliders_of(&self, kind: SurfaceKind) -> impl Iterator<Item = &CollisionPrimitive> {
        self.colliders.iter().filter(move |c| c.surface == Some(kind))
    }
}

struct Emitter<'a> {
    config: &'a LevelConfig,
    out: EmittedGeometry,
    dedup: WallDedup,
}

impl<'a> Emitter<'a> {
    fn new(config: &'a LevelConfig) -> Self {
        Self {
            config,
            out: EmittedGeometry::default(),
            dedup: WallDedup::new(),
        }
    }

    /// Floor slab with its top at floor level, plus the matching ceiling
    fn floor_and_ceiling(&mut self, rect: &Rect) {
        let min = rect.min();
        let max = rect.max();
        let top = FLOOR_LEVEL;

        let slab = create_aabb(
            Vec3::new(min.x, top - self.config.floor_thickness, min.y),
            Vec3::new(max.x, top, max.y),
        );
        self.out
            .colliders
            .push(CollisionPrimitive::static_surface(slab, SurfaceKind::Floor));
        self.out.render.floors.push(RenderSurface {
            kind: SurfaceKind::Floor,
            bounds: create_aabb(Vec3::new(min.x, top, min.y), Vec3::new(max.x, top, max.y)),
            normal: Vec3::Y,
        });

        let ceiling = top + self.config.wall_height;
        self.out.render.ceilings.push(RenderSurface {
            kind: SurfaceKind::Ceiling,
            bounds: create_aabb(Vec3::new(min.x, ceiling, min.y), Vec3::new(max.x, ceiling, max.y)),
            normal: Vec3::NEG_Y,
        });
    }

    fn wall(&mut self, segment: &WallSegment) {
        let bounds = segment.bounds(self.config.wall_thickness, self.config.wall_height);
        if !self.dedup.insert(&bounds) {
            return;
        }
        self.out
            .colliders
            .push(CollisionPrimitive::static_surface(bounds, SurfaceKind::Wall));
        self.out.render.walls.push(RenderSurface {
            kind: SurfaceKind::Wall,
            bounds,
            normal: segment.normal(),
        });
    }
}

/// Emit render surfaces and static colliders for a carved layout
pub fn emit(rooms: &[Room], corridors: &[Corridor], config: &LevelConfig) -> EmittedGeometry {
    let mut emitter = Emitter::new(config);

    for room in rooms {
        emitter.floor_and_ceiling(&room.rect);
        for segment in walls::room_walls(room, corridors) {
            emitter.wall(&segment);
        }
    }

    for (index, leg) in corridors.iter().enumerate() {
        emitter.floor_and_ceiling(&leg.footprint());
        for segment in walls::corridor_walls(index, corridors, rooms) {
            emitter.wall(&segment);
        }
    }

    log::debug!(
        "[GeometryEmitter] {} colliders, {} walls ({} duplicates skipped), {} floors",
        emitter.out.colliders.len(),
        emitter.out.render.walls.len(),
        emitter.dedup.skipped(),
        emitter.out.render.floors.len()
    );

    emitter.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Doorway, WallSide};
    use glam::Vec2;

    #[test]
    fn test_single_room_is_closed_box() {
        let config = LevelConfig::default();
        let rooms = vec![Room::new(Rect::new(0.0, 0.0, 9.0, 7.0))];
        let geometry = emit(&rooms, &[], &config);

        assert_eq!(geometry.render.floors.len(), 1);
        assert_eq!(geometry.render.ceilings.len(), 1);
        assert_eq!(geometry.render.walls.len(), 4);
        assert_eq!(geometry.colliders.len(), 5);

        let floor = geometry.colliders_of(SurfaceKind::Floor).next().unwrap();
        assert_eq!(floor.bounds().max.y, 0.0);
        assert_eq!(floor.bounds().min.y, -config.floor_thickness);
        assert_eq!(geometry.render.ceilings[0].bounds.min.y, config.wall_height);
    }

    #[test]
    fn test_wall_collider_dimensions() {
        let config = LevelConfig::default();
        let rooms = vec![Room::new(Rect::new(0.0, 0.0, 9.0, 7.0))];
        let geometry = emit(&rooms, &[], &config);

        let north = geometry
            .render
            .walls
            .iter()
            .find(|w| w.normal == Vec3::Z)
            .unwrap();
        assert_eq!(north.bounds.min, Vec3::new(0.0, 0.0, -config.wall_thickness * 0.5));
        assert_eq!(north.bounds.max, Vec3::new(9.0, config.wall_height, config.wall_thickness * 0.5));
    }

    #[test]
    fn test_identical_legs_emit_walls_once() {
        let config = LevelConfig::default();
        let leg = Corridor::horizontal(Vec2::new(0.5, 0.5), 10.5, 3.0);
        let geometry = emit(&[], &[leg, leg], &config);

        assert_eq!(geometry.render.walls.len(), 2);
        assert_eq!(geometry.render.floors.len(), 2);
    }

    #[test]
    fn test_doorway_gap_matches_corridor() {
        let config = LevelConfig::default();
        let mut room = Room::new(Rect::new(0.0, 0.0, 9.0, 7.0));
        room.doorways
            .push(Doorway::on_wall(&room.rect, WallSide::East, 2.0, 3.0));
        let leg = Corridor::horizontal(room.center(), 20.0, 3.0);

        let geometry = emit(&[room], &[leg], &config);
        let east: Vec<_> = geometry
            .render
            .walls
            .iter()
            .filter(|w| w.normal == Vec3::NEG_X)
            .collect();
        assert_eq!(east.len(), 2);
        assert_eq!(east[0].bounds.max.z, 2.0);
        assert_eq!(east[1].bounds.min.z, 5.0);
    }
}
