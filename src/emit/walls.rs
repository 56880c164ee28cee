//! Wall segmentation and junction de-duplication

use glam::{Vec2, Vec3};
use rustc_hash::FxHashSet;

use crate::constants::geometry::{MIN_SEGMENT_LENGTH, WALL_KEY_SCALE};
use crate::geometry::{Corridor, Rect, Room, WallSide};
use crate::physics::aabb::{create_aabb, AABB};

/// Straight wall piece on the world plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSegment {
    /// Runs along plane X (fixed plane Y), otherwise along plane Y
    pub along_x: bool,
    /// Coordinate of the wall line on the other axis
    pub fixed: f32,
    pub start: f32,
    pub end: f32,
    /// Plane normal facing the walkable side
    pub facing: Vec2,
}

impl WallSegment {
    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Collider box `thickness` wide centred on the wall line
    pub fn bounds(&self, thickness: f32, height: f32) -> AABB {
        let half = thickness * 0.5;
        if self.along_x {
            create_aabb(
                Vec3::new(self.start, 0.0, self.fixed - half),
                Vec3::new(self.end, height, self.fixed + half),
            )
        } else {
            create_aabb(
                Vec3::new(self.fixed - half, 0.0, self.start),
                Vec3::new(self.fixed + half, height, self.end),
            )
        }
    }

    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.facing.x, 0.0, self.facing.y)
    }
}

/// Split `start..end` around `gaps`.
///
/// Gaps may arrive unsorted, overlap each other or hang past the wall ends.
/// Pieces shorter than `MIN_SEGMENT_LENGTH` are dropped.
pub fn segment_wall(start: f32, end: f32, gaps: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut gaps: Vec<(f32, f32)> = gaps
        .iter()
        .map(|&(s, e)| (s.max(start), e.min(end)))
        .filter(|(s, e)| e > s)
        .collect();
    gaps.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut pieces = Vec::with_capacity(gaps.len() + 1);
    let mut cursor = start;
    for (gap_start, gap_end) in gaps {
        if gap_start - cursor > MIN_SEGMENT_LENGTH {
            pieces.push((cursor, gap_start));
        }
        cursor = cursor.max(gap_end);
    }
    if end - cursor > MIN_SEGMENT_LENGTH {
        pieces.push((cursor, end));
    }
    pieces
}

/// Interval a rectangle covers on a wall line, if the line passes through it.
///
/// `inclusive` also accepts lines on the rectangle's boundary.
fn cut_by(rect: &Rect, along_x: bool, fixed: f32, inclusive: bool) -> Option<(f32, f32)> {
    let (lo, hi) = if along_x {
        (rect.y, rect.y + rect.height)
    } else {
        (rect.x, rect.x + rect.width)
    };
    let crosses = if inclusive {
        fixed >= lo && fixed <= hi
    } else {
        fixed > lo && fixed < hi
    };
    if !crosses {
        return None;
    }
    Some(if along_x {
        (rect.x, rect.x + rect.width)
    } else {
        (rect.y, rect.y + rect.height)
    })
}

fn room_wall_facing(side: WallSide) -> Vec2 {
    match side {
        WallSide::North => Vec2::Y,
        WallSide::South => Vec2::NEG_Y,
        WallSide::West => Vec2::X,
        WallSide::East => Vec2::NEG_X,
    }
}

/// Room walls with gaps at doorways and wherever a corridor footprint
/// swallows the wall line
pub fn room_walls(room: &Room, corridors: &[Corridor]) -> Vec<WallSegment> {
    let mut segments = Vec::new();

    for side in WallSide::ALL {
        let (start, end, fixed) = room.wall_span(side);
        let along_x = side.runs_along_x();

        let mut gaps: Vec<(f32, f32)> = room.doorways_on(side).map(|d| d.span()).collect();
        gaps.extend(
            corridors
                .iter()
                .filter_map(|leg| cut_by(&leg.footprint(), along_x, fixed, false)),
        );

        for (s, e) in segment_wall(start, end, &gaps) {
            segments.push(WallSegment {
                along_x,
                fixed,
                start: s,
                end: e,
                facing: room_wall_facing(side),
            });
        }
    }

    segments
}

/// Side walls of one corridor leg, cut inside rooms and where they pass
/// through any other leg
pub fn corridor_walls(index: usize, corridors: &[Corridor], rooms: &[Room]) -> Vec<WallSegment> {
    let leg = &corridors[index];
    let fp = leg.footprint();
    let along_x = leg.is_horizontal;

    let (start, end, sides) = if along_x {
        (fp.x, fp.x + fp.width, [(fp.y, Vec2::Y), (fp.y + fp.height, Vec2::NEG_Y)])
    } else {
        (fp.y, fp.y + fp.height, [(fp.x, Vec2::X), (fp.x + fp.width, Vec2::NEG_X)])
    };

    let mut segments = Vec::new();
    for (fixed, facing) in sides {
        let mut gaps: Vec<(f32, f32)> = rooms
            .iter()
            .filter_map(|room| cut_by(&room.rect, along_x, fixed, true))
            .collect();
        gaps.extend(
            corridors
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .filter_map(|(_, other)| cut_by(&other.footprint(), along_x, fixed, false)),
        );

        for (s, e) in segment_wall(start, end, &gaps) {
            segments.push(WallSegment {
                along_x,
                fixed,
                start: s,
                end: e,
                facing,
            });
        }
    }

    segments
}

/// Bounds quantized to hundredths
pub type WallKey = [i32; 6];

pub fn wall_key(bounds: &AABB) -> WallKey {
    let q = |v: f32| (v * WALL_KEY_SCALE).round() as i32;
    [
        q(bounds.min.x),
        q(bounds.min.y),
        q(bounds.min.z),
        q(bounds.max.x),
        q(bounds.max.y),
        q(bounds.max.z),
    ]
}

/// Remembers which wall boxes were already emitted
#[derive(Debug, Default)]
pub struct WallDedup {
    seen: FxHashSet<WallKey>,
    skipped: usize,
}

impl WallDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` the first time these bounds are offered
    pub fn insert(&mut self, bounds: &AABB) -> bool {
        let fresh = self.seen.insert(wall_key(bounds));
        if !fresh {
            self.skipped += 1;
        }
        fresh
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
