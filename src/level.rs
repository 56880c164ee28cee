//! Level generation pipeline and the runtime level session
//!
//! `LevelGenerator` runs planner, router, carver and emitter in one
//! synchronous call. `Level` takes the result and owns the collider registry
//! that gameplay code queries and mutates for the rest of the floor.

use std::collections::VecDeque;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{ConfigError, LevelConfig};
use crate::emit::{self, RenderGeometry};
use crate::generation::{self, target_room_count};
use crate::geometry::{Corridor, Room, RoomId};
use crate::physics::{
    ColliderId, ColliderRegistry, CollisionPrimitive, MovementResolver, SpatialQuery,
};

/// Everything produced for one dungeon floor
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedLayout {
    /// Seed that reproduces this layout with the same config
    pub seed: u64,
    pub level: u32,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub connections: Vec<(RoomId, RoomId)>,
    pub render: RenderGeometry,
    pub colliders: Vec<CollisionPrimitive>,
}

impl GeneratedLayout {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Every room reachable from room 0 through the connection graph
    pub fn is_connected(&self) -> bool {
        let n = self.rooms.len();
        if n <= 1 {
            return true;
        }

        let mut visited = vec![false; n];
        let mut queue = VecDeque::new();
        visited[0] = true;
        queue.push_back(0usize);

        while let Some(current) = queue.pop_front() {
            for next in &self.rooms[current].connections {
                let i = next.index();
                if i < n && !visited[i] {
                    visited[i] = true;
                    queue.push_back(i);
                }
            }
        }

        visited.iter().all(|&v| v)
    }

    /// Room whose footprint contains the plane point
    pub fn room_at(&self, point: Vec2) -> Option<RoomId> {
        self.rooms
            .iter()
            .position(|room| room.rect.contains(point))
            .map(RoomId)
    }

    /// Room centres in room order
    pub fn spawn_candidates(&self) -> Vec<Vec2> {
        self.rooms.iter().map(Room::center).collect()
    }
}

/// Validated generator front end
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    config: LevelConfig,
}

impl LevelGenerator {
    pub fn new(config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// Seed from the config, or a fresh one
    fn next_seed(&self) -> u64 {
        match self.config.seed {
            Some(seed) => seed,
            None => {
                let seed = rand::random::<u64>();
                log::info!("[LevelGenerator] No seed configured, using {}", seed);
                seed
            }
        }
    }

    /// Generate the layout for a dungeon level
    pub fn generate_layout(&self, level: u32) -> GeneratedLayout {
        let count = target_room_count(level, &self.config);
        let mut layout = self.generate_with_room_count(count, self.next_seed());
        layout.level = level;
        layout
    }

    /// Generate a dungeon level and load it with the configured resolver
    pub fn load_level(&self, level: u32) -> Level {
        Level::from_layout(self.generate_layout(level)).with_resolver(MovementResolver::from_config(&self.config))
    }

    /// Generate exactly `count` rooms from `seed`
    pub fn generate_with_room_count(&self, count: usize, seed: u64) -> GeneratedLayout {
        let mut rng = StdRng::seed_from_u64(seed);

        let (rooms, routing) = generation::build_rooms(count, &self.config, &mut rng);
        let geometry = emit::emit(&rooms, &routing.corridors, &self.config);

        log::info!(
            "[LevelGenerator] Seed {}: {} rooms, {} connections, {} colliders, {} render surfaces",
            seed,
            rooms.len(),
            routing.connections.len(),
            geometry.colliders.len(),
            geometry.render.surface_count()
        );

        GeneratedLayout {
            seed,
            level: 0,
            rooms,
            corridors: routing.corridors,
            connections: routing.connections,
            render: geometry.render,
            colliders: geometry.colliders,
        }
    }
}

/// One-shot generation with a config that has not been validated yet
pub fn generate_layout(level: u32, config: &LevelConfig) -> Result<GeneratedLayout, ConfigError> {
    Ok(LevelGenerator::new(config.clone())?.generate_layout(level))
}

/// A loaded dungeon floor: the layout plus its live collider registry
#[derive(Debug, Clone)]
pub struct Level {
    layout: GeneratedLayout,
    registry: ColliderRegistry,
    static_colliders: Vec<ColliderId>,
    resolver: MovementResolver,
}

impl Level {
    /// Register every static collider of `layout`
    pub fn from_layout(layout: GeneratedLayout) -> Self {
        let mut registry = ColliderRegistry::with_capacity(layout.colliders.len());
        let static_colliders = registry.extend_static(layout.colliders.iter().cloned());

        log::debug!(
            "[Level] Registered {} static colliders for level {}",
            static_colliders.len(),
            layout.level
        );

        Self {
            layout,
            registry,
            static_colliders,
            resolver: MovementResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: MovementResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Resolver for every mover on this floor
    pub fn resolver(&self) -> MovementResolver {
        self.resolver
    }

    pub fn layout(&self) -> &GeneratedLayout {
        &self.layout
    }

    pub fn registry(&self) -> &ColliderRegistry {
        &self.registry
    }

    /// For dynamic colliders: enemies, pickups, doors
    pub fn registry_mut(&mut self) -> &mut ColliderRegistry {
        &mut self.registry
    }

    pub fn query(&self) -> SpatialQuery<'_> {
        SpatialQuery::new(&self.registry)
    }

    pub fn static_collider_count(&self) -> usize {
        self.static_colliders.len()
    }

    pub fn static_colliders(&self) -> &[ColliderId] {
        &self.static_colliders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Tag, TagSet};
    use glam::Vec3;

    fn generator() -> LevelGenerator {
        LevelGenerator::new(LevelConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn test_room_count_follows_level() {
        let layout = generator().generate_layout(3);
        assert_eq!(layout.level, 3);
        assert_eq!(layout.seed, 42);
        assert_eq!(layout.room_count(), 6);
        assert!(layout.is_connected());
    }

    #[test]
    fn test_zero_rooms_is_empty_but_valid() {
        let layout = generator().generate_with_room_count(0, 9);
        assert!(layout.rooms.is_empty());
        assert!(layout.corridors.is_empty());
        assert!(layout.colliders.is_empty());
        assert!(layout.is_connected());
    }

    #[test]
    fn test_single_room_layout() {
        let layout = generator().generate_with_room_count(1, 9);
        assert_eq!(layout.room_count(), 1);
        assert_eq!(layout.connection_count(), 0);
        assert!(layout.is_connected());
        // One floor and four walls
        assert_eq!(layout.colliders.len(), 5);
    }

    #[test]
    fn test_room_at_centres() {
        let layout = generator().generate_with_room_count(6, 1);
        for (i, centre) in layout.spawn_candidates().into_iter().enumerate() {
            assert_eq!(layout.room_at(centre), Some(RoomId(i)));
        }
        assert_eq!(layout.room_at(Vec2::new(-50.0, -50.0)), None);
    }

    #[test]
    fn test_loaded_level_uses_configured_resolver() {
        let config = LevelConfig {
            resolver_iterations: 3,
            ..LevelConfig::default().with_seed(8)
        };
        let level = LevelGenerator::new(config).unwrap().load_level(2);
        assert_eq!(level.resolver().iterations(), 3);
        assert_eq!(level.static_collider_count(), level.layout().colliders.len());

        let plain = Level::from_layout(generator().generate_layout(2));
        assert_eq!(plain.resolver().iterations(), MovementResolver::default().iterations());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LevelConfig {
            resolver_iterations: 0,
            ..Default::default()
        };
        assert!(LevelGenerator::new(config.clone()).is_err());
        assert!(generate_layout(1, &config).is_err());
    }

    #[test]
    fn test_level_registers_static_colliders() {
        let layout = generator().generate_layout(1);
        let expected = layout.colliders.len();
        let mut level = Level::from_layout(layout);

        assert_eq!(level.static_collider_count(), expected);
        assert_eq!(level.registry().len(), expected);

        let orb = level.registry_mut().add(CollisionPrimitive::cylinder(
            Vec3::new(0.0, 0.5, 0.0),
            0.3,
            1.0,
            TagSet::new().with(Tag::Pickup(5)),
        ));
        assert_eq!(level.registry().len(), expected + 1);
        assert!(level.registry_mut().remove(orb).is_some());
        assert!(level.registry().get(level.static_colliders()[0]).is_some());
    }
}
