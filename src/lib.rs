//! Hearth Dungeon
//!
//! Level geometry and collision for a first-person dungeon crawler:
//! procedural room/corridor generation, static collider emission, spatial
//! queries and per-frame movement resolution.

pub mod config;
pub mod constants;
pub mod emit;
pub mod generation;
pub mod geometry;
pub mod level;
pub mod physics;
pub mod spawn;

pub use config::{ConfigError, LevelConfig};
pub use emit::{EmittedGeometry, RenderGeometry, RenderSurface};
pub use generation::Routing;
pub use geometry::{Corridor, Doorway, Rect, Room, RoomId, WallSide};
pub use level::{generate_layout, GeneratedLayout, Level, LevelGenerator};
pub use physics::{
    ColliderId, ColliderRegistry, ColliderShape, CollisionPrimitive, CollisionResult, FloorHit,
    MoveRequest, MoveResolution, MovementResolver, QueryFilter, RayHit, RegistryError,
    SpatialQuery, SurfaceKind, Tag, TagSet, AABB,
};
pub use spawn::{SpawnFinder, SpawnPoint, SpawnSettings};
