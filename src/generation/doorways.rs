//! Doorway carving where corridor legs cross room walls.

use crate::config::LevelConfig;
use crate::geometry::{Corridor, Doorway, Room, RoomId, WallSide};

const SPAN_EPSILON: f32 = 1e-4;

/// Walls a leg can cross: perpendicular to its direction
fn crossable_sides(leg: &Corridor) -> [WallSide; 2] {
    if leg.is_horizontal {
        [WallSide::West, WallSide::East]
    } else {
        [WallSide::North, WallSide::South]
    }
}

/// Doorway on `side` of `room` if the leg's centre line crosses that wall
/// strictly inside its span.
///
/// The gap is centred on the crossing coordinate and truncated at the wall
/// ends, so it never leaves the corridor's own footprint.
pub fn crossing_doorway(room: &Room, side: WallSide, leg: &Corridor, doorway_width: f32) -> Option<Doorway> {
    let (span_start, span_end, wall_line) = room.wall_span(side);
    let (lo, hi) = leg.axis_range();
    let cross = leg.cross_coord();

    if wall_line < lo || wall_line > hi {
        return None;
    }
    if cross <= span_start || cross >= span_end {
        return None;
    }

    let start = (cross - doorway_width * 0.5).max(span_start);
    let end = (cross + doorway_width * 0.5).min(span_end);
    Some(Doorway::on_wall(&room.rect, side, start, end - start))
}

fn push_unique(room: &mut Room, doorway: Doorway) -> bool {
    let (start, end) = doorway.span();
    let duplicate = room.doorways_on(doorway.wall_side).any(|d| {
        let (s, e) = d.span();
        (s - start).abs() < SPAN_EPSILON && (e - end).abs() < SPAN_EPSILON
    });
    if !duplicate {
        room.doorways.push(doorway);
    }
    !duplicate
}

/// Rooms a leg is checked against: its own endpoint rooms first, then the rest
fn rooms_for_leg(leg: &Corridor, room_count: usize) -> Vec<RoomId> {
    let mut order = Vec::with_capacity(room_count);
    for id in [leg.start_room, leg.end_room].into_iter().flatten() {
        if id.index() < room_count && !order.contains(&id) {
            order.push(id);
        }
    }
    for i in 0..room_count {
        let id = RoomId(i);
        if !order.contains(&id) {
            order.push(id);
        }
    }
    order
}

/// Carve doorways into `rooms` for every leg. Returns the number added.
pub fn carve(rooms: &mut [Room], corridors: &[Corridor], config: &LevelConfig) -> usize {
    let mut added = 0;

    for leg in corridors {
        for id in rooms_for_leg(leg, rooms.len()) {
            let room = &mut rooms[id.index()];
            for side in crossable_sides(leg) {
                if let Some(doorway) = crossing_doorway(room, side, leg, config.doorway_width) {
                    if push_unique(room, doorway) {
                        added += 1;
                    }
                }
            }
        }
    }

    log::debug!("[DoorwayCarver] Carved {} doorways for {} legs", added, corridors.len());
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use glam::Vec2;

    fn room() -> Room {
        Room::new(Rect::new(10.0, 10.0, 9.0, 7.0))
    }

    #[test]
    fn test_horizontal_leg_leaving_east_wall() {
        let mut rooms = vec![room()];
        let mut leg = Corridor::horizontal(rooms[0].center(), 40.0, 3.0);
        leg.start_room = Some(RoomId(0));

        assert_eq!(carve(&mut rooms, &[leg], &LevelConfig::default()), 1);
        let door = rooms[0].doorways[0];
        assert_eq!(door.wall_side, WallSide::East);
        assert_eq!((door.x, door.width), (19.0, 0.0));
        assert_eq!(door.span(), (12.0, 15.0));
    }

    #[test]
    fn test_pass_through_room_gets_both_walls() {
        let mut rooms = vec![room()];
        let leg = Corridor::horizontal(Vec2::new(0.0, 13.5), 30.0, 3.0);
        carve(&mut rooms, &[leg], &LevelConfig::default());

        let sides: Vec<WallSide> = rooms[0].doorways.iter().map(|d| d.wall_side).collect();
        assert_eq!(sides, vec![WallSide::West, WallSide::East]);
    }

    #[test]
    fn test_doorway_truncated_near_corner() {
        let mut rooms = vec![room()];
        let leg = Corridor::vertical(Vec2::new(10.5, 0.0), 13.5, 3.0);
        carve(&mut rooms, &[leg], &LevelConfig::default());

        let door = rooms[0].doorways[0];
        assert_eq!(door.wall_side, WallSide::North);
        assert_eq!(door.span(), (10.0, 12.0));
    }

    #[test]
    fn test_duplicate_legs_do_not_duplicate_doorways() {
        let mut rooms = vec![room()];
        let leg = Corridor::horizontal(Vec2::new(14.5, 13.5), 40.0, 3.0);
        carve(&mut rooms, &[leg, leg], &LevelConfig::default());
        assert_eq!(rooms[0].doorways.len(), 1);
    }

    #[test]
    fn test_leg_ending_inside_room_does_not_cross_far_wall() {
        let mut rooms = vec![room()];
        let leg = Corridor::horizontal(Vec2::new(0.0, 13.5), 14.5, 3.0);
        carve(&mut rooms, &[leg], &LevelConfig::default());
        assert_eq!(rooms[0].doorways.len(), 1);
        assert_eq!(rooms[0].doorways[0].wall_side, WallSide::West);
    }
}
