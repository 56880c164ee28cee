// Hearth Dungeon Constants - SINGLE SOURCE OF TRUTH
//
// Default tunables for generation, emitted geometry, queries and spawning.
// `LevelConfig::default()` reads every value from here.

/// Room count and placement
pub mod generation {
    /// Rooms on level 0 before the per-level increase
    pub const BASE_ROOMS: u32 = 3;
    pub const ROOMS_PER_LEVEL: u32 = 1;

    /// Clamp range for the derived room count
    pub const MIN_ROOMS: u32 = 4;
    pub const MAX_ROOMS: u32 = 16;

    /// Room extents in world units (snapped to odd whole units by the planner)
    pub const ROOM_SIZE_MIN: f32 = 7.0;
    pub const ROOM_SIZE_MAX: f32 = 13.0;

    /// Placement grid
    pub const CELL_SIZE: f32 = 24.0;
    pub const CELL_MARGIN: f32 = 3.0;

    /// One extra loop connection per this many rooms, once there are more than
    /// `EXTRA_CONNECTION_MIN_ROOMS - 1` rooms
    pub const EXTRA_CONNECTION_DIVISOR: usize = 3;
    pub const EXTRA_CONNECTION_MIN_ROOMS: usize = 4;
    pub const EXTRA_CONNECTION_ATTEMPTS: u32 = 32;
}

/// Emitted level geometry
pub mod geometry {
    pub const CORRIDOR_WIDTH: f32 = 3.0;
    pub const DOORWAY_WIDTH: f32 = 3.0;

    pub const WALL_HEIGHT: f32 = 4.0;
    pub const WALL_THICKNESS: f32 = 0.5;
    pub const FLOOR_THICKNESS: f32 = 0.5;

    /// Floor top surface height
    pub const FLOOR_LEVEL: f32 = 0.0;

    /// Wall dedup keys keep two decimal places
    pub const WALL_KEY_SCALE: f32 = 100.0;

    /// Wall pieces shorter than this are dropped
    pub const MIN_SEGMENT_LENGTH: f32 = 0.01;
}

/// Spatial queries and movement resolution
pub mod physics {
    pub const RESOLVER_ITERATIONS: u32 = 1;
    pub const MAX_RESOLVER_ITERATIONS: u32 = 4;

    /// Below this a ray direction component counts as parallel
    pub const RAY_PARALLEL_EPSILON: f32 = 1e-6;

    /// Default entity radius used by the inspector and spawn checks
    pub const DEFAULT_ENTITY_RADIUS: f32 = 0.4;
}

/// Spawn placement and fall safety
pub mod spawn {
    pub const PROBE_HEIGHT: f32 = 10.0;
    pub const MAX_DROP: f32 = 20.0;
    pub const EYE_HEIGHT: f32 = 1.6;
    pub const FALLBACK_HEIGHT: f32 = 5.0;
    pub const KILL_HEIGHT: f32 = -10.0;
    pub const GROUND_TOLERANCE: f32 = 0.1;
}
