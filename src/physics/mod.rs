//! Collision storage, queries and movement resolution
//!
//! `ColliderRegistry` owns the primitives, `SpatialQuery` reads them, and
//! `MovementResolver` turns a proposed move into a legal one.

pub mod aabb;
pub mod collider;
pub mod query;
pub mod registry;
pub mod resolver;

pub use aabb::AABB;
pub use collider::{ColliderShape, CollisionPrimitive, SurfaceKind, Tag, TagSet};
pub use query::{CollisionResult, FloorHit, QueryFilter, RayHit, SpatialQuery};
pub use registry::{ColliderId, ColliderRegistry, RegistryError};
pub use resolver::{MoveRequest, MoveResolution, MovementResolver};
