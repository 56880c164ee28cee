//! Corridor routing between planned rooms.
//!
//! Rooms are chained in index order so the graph is connected, then a few
//! random extra links add loops for larger layouts. Each link is an L: a
//! horizontal leg from the start room's centre to the bend, then a vertical
//! leg from the bend to the end room's centre.

use glam::Vec2;
use rand::Rng;

use crate::config::LevelConfig;
use crate::constants::generation::{EXTRA_CONNECTION_DIVISOR, EXTRA_CONNECTION_MIN_ROOMS};
use crate::geometry::{Corridor, Room, RoomId};

/// Output of the router
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Routing {
    /// Two legs per connection, horizontal first
    pub corridors: Vec<Corridor>,
    /// Logical links in the order they were made
    pub connections: Vec<(RoomId, RoomId)>,
}

impl Routing {
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

/// Index of the first room whose footprint contains `point`
fn room_containing(rooms: &[Room], point: Vec2) -> Option<RoomId> {
    rooms
        .iter()
        .position(|room| room.rect.contains(point))
        .map(RoomId)
}

/// Build the two legs linking `from` to `to`
pub fn connect_rooms(rooms: &[Room], from: RoomId, to: RoomId, width: f32) -> [Corridor; 2] {
    let start = rooms[from.index()].center();
    let end = rooms[to.index()].center();
    let bend = Vec2::new(end.x, start.y);
    let bend_room = room_containing(rooms, bend);

    let mut horizontal = Corridor::horizontal(start, end.x, width);
    horizontal.start_room = Some(from);
    horizontal.end_room = bend_room;

    let mut vertical = Corridor::vertical(bend, end.y, width);
    vertical.start_room = bend_room;
    vertical.end_room = Some(to);

    [horizontal, vertical]
}

fn link(rooms: &mut [Room], routing: &mut Routing, a: RoomId, b: RoomId, width: f32) {
    let legs = connect_rooms(rooms, a, b, width);
    routing.corridors.extend_from_slice(&legs);
    routing.connections.push((a, b));
    rooms[a.index()].connections.push(b);
    rooms[b.index()].connections.push(a);
}

/// Connect every room, mutating each room's adjacency list
pub fn route(rooms: &mut [Room], config: &LevelConfig, rng: &mut impl Rng) -> Routing {
    let mut routing = Routing::default();
    let n = rooms.len();
    if n < 2 {
        return routing;
    }

    for i in 0..n - 1 {
        link(rooms, &mut routing, RoomId(i), RoomId(i + 1), config.corridor_width);
    }

    if n >= EXTRA_CONNECTION_MIN_ROOMS {
        let extra = n / EXTRA_CONNECTION_DIVISOR;
        for k in 0..extra {
            let mut found = None;
            for _ in 0..config.extra_connection_attempts {
                let a = rng.gen_range(0..n);
                let b = rng.gen_range(0..n);
                if a != b && !rooms[a].is_connected_to(RoomId(b)) {
                    found = Some((RoomId(a), RoomId(b)));
                    break;
                }
            }

            match found {
                Some((a, b)) => {
                    log::debug!("[CorridorRouter] Extra connection {} -> {}", a, b);
                    link(rooms, &mut routing, a, b, config.corridor_width);
                }
                None => log::debug!(
                    "[CorridorRouter] Extra connection {} skipped after {} attempts",
                    k,
                    config.extra_connection_attempts
                ),
            }
        }
    }

    log::debug!(
        "[CorridorRouter] {} connections, {} legs for {} rooms",
        routing.connections.len(),
        routing.corridors.len(),
        n
    );

    routing
}
