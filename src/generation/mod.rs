//! Procedural dungeon generation
//!
//! Three passes over plain data, all driven by one seeded RNG:
//! layout planning, corridor routing, doorway carving.

pub mod corridors;
pub mod doorways;
pub mod layout;


pub use corridors::{connect_rooms, route, Routing};
pub use doorways::carve;
pub use layout::{plan_rooms, target_room_count};

use rand::Rng;

use crate::config::LevelConfig;
use crate::geometry::Room;

/// Plan, route and carve `count` rooms
pub fn build_rooms(count: usize, config: &LevelConfig, rng: &mut impl Rng) -> (Vec<Room>, Routing) {
    let mut rooms = plan_rooms(count, config, rng);
    let routing = route(&mut rooms, config, rng);
    carve(&mut rooms, &routing.corridors, config);
    (rooms, routing)
}
