//! Room layout planning: how many rooms, how big, and where.
//!
//! Rooms are dropped into a coarse grid in row-major order. Each room gets a
//! random size and a random offset inside its cell, so layouts look irregular
//! while cell spacing guarantees that no two rooms overlap.

use rand::Rng;

use crate::config::LevelConfig;
use crate::geometry::{Rect, Room};

/// Room count for a dungeon level, clamped to the configured range
pub fn target_room_count(level: u32, config: &LevelConfig) -> usize {
    let raw = config
        .base_rooms
        .saturating_add(level.saturating_mul(config.rooms_per_level));
    raw.clamp(config.min_rooms, config.max_rooms) as usize
}

/// Grid columns used for `count` rooms
pub fn grid_columns(count: usize) -> usize {
    ((count as f64).sqrt().ceil() as usize).max(1)
}

/// Smallest and largest odd whole extents inside `min..=max`.
///
/// Odd extents on whole-unit origins put room centres on half units, so a
/// corridor centre line never runs exactly along a room wall. `None` when the
/// range holds no odd whole number.
pub fn odd_size_range(min: f32, max: f32) -> Option<(u32, u32)> {
    if !min.is_finite() || !max.is_finite() || max < 1.0 {
        return None;
    }

    let mut lo = min.max(1.0).ceil() as u32;
    if lo % 2 == 0 {
        lo += 1;
    }
    let mut hi = max.floor() as u32;
    if hi % 2 == 0 {
        hi -= 1;
    }

    (lo <= hi).then_some((lo, hi))
}

fn odd_extent(lo: u32, hi: u32, rng: &mut impl Rng) -> f32 {
    (lo + 2 * rng.gen_range(0..=(hi - lo) / 2)) as f32
}

/// Place `count` rooms. Returns an empty layout for `count == 0`.
pub fn plan_rooms(count: usize, config: &LevelConfig, rng: &mut impl Rng) -> Vec<Room> {
    if count == 0 {
        log::warn!("[RoomLayoutPlanner] Zero rooms requested, producing an empty layout");
        return Vec::new();
    }

    let Some((size_lo, size_hi)) = odd_size_range(config.room_size_min, config.room_size_max) else {
        log::warn!(
            "[RoomLayoutPlanner] No odd room size in {}..={}, producing an empty layout",
            config.room_size_min,
            config.room_size_max
        );
        return Vec::new();
    };

    let cols = grid_columns(count);
    let inner = config.cell_size - config.cell_margin * 2.0;
    let mut rooms = Vec::with_capacity(count);

    for i in 0..count {
        let col = (i % cols) as f32;
        let row = (i / cols) as f32;

        let width = odd_extent(size_lo, size_hi, rng);
        let height = odd_extent(size_lo, size_hi, rng);

        let slack_x = (inner - width).max(0.0).floor() as u32;
        let slack_y = (inner - height).max(0.0).floor() as u32;
        let jitter_x = rng.gen_range(0..=slack_x) as f32;
        let jitter_y = rng.gen_range(0..=slack_y) as f32;

        let x = (col * config.cell_size + config.cell_margin).floor() + jitter_x;
        let y = (row * config.cell_size + config.cell_margin).floor() + jitter_y;

        log::debug!(
            "[RoomLayoutPlanner] Room {} in cell ({}, {}) at ({}, {}) size {}x{}",
            i, col, row, x, y, width, height
        );

        rooms.push(Room::new(Rect::new(x, y, width, height)));
    }

    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_target_room_count_clamps() {
        let config = LevelConfig::default();
        assert_eq!(target_room_count(0, &config), config.min_rooms as usize);
        assert_eq!(target_room_count(2, &config), 5);
        assert_eq!(target_room_count(500, &config), config.max_rooms as usize);
    }

    #[test]
    fn test_odd_size_range() {
        assert_eq!(odd_size_range(7.0, 13.0), Some((7, 13)));
        assert_eq!(odd_size_range(6.2, 12.0), Some((7, 11)));
        assert_eq!(odd_size_range(8.0, 8.9), None);
        assert_eq!(odd_size_range(5.0, f32::NAN), None);
    }

    #[test]
    fn test_room_extents_respect_configured_range() {
        let config = LevelConfig {
            room_size_min: 6.5,
            room_size_max: 12.0,
            ..Default::default()
        };
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            for room in plan_rooms(9, &config, &mut rng) {
                for extent in [room.rect.width, room.rect.height] {
                    assert!(extent >= config.room_size_min && extent <= config.room_size_max, "seed {}: {}", seed, extent);
                    assert_eq!(extent as u32 % 2, 1);
                }
            }
        }
    }

    #[test]
    fn test_no_odd_size_is_empty() {
        let config = LevelConfig {
            room_size_min: 8.0,
            room_size_max: 8.5,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(plan_rooms(4, &config, &mut rng).is_empty());
    }

    #[test]
    fn test_zero_rooms_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(plan_rooms(0, &LevelConfig::default(), &mut rng).is_empty());
    }

    #[test]
    fn test_rooms_stay_inside_their_cells() {
        let config = LevelConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let rooms = plan_rooms(9, &config, &mut rng);
        assert_eq!(rooms.len(), 9);

        for (i, room) in rooms.iter().enumerate() {
            let col = (i % 3) as f32;
            let row = (i / 3) as f32;
            let r = room.rect;
            assert!(r.x >= col * config.cell_size + config.cell_margin);
            assert!(r.y >= row * config.cell_size + config.cell_margin);
            assert!(r.x + r.width <= (col + 1.0) * config.cell_size - config.cell_margin);
            assert!(r.y + r.height <= (row + 1.0) * config.cell_size - config.cell_margin);
            assert!(r.width >= config.room_size_min && r.height >= config.room_size_min);
            assert!(r.width <= config.room_size_max && r.height <= config.room_size_max);
        }

        for a in 0..rooms.len() {
            for b in (a + 1)..rooms.len() {
                assert!(!rooms[a].rect.overlaps(&rooms[b].rect), "rooms {} and {} overlap", a, b);
            }
        }
    }
}
