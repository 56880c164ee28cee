use glam::Vec2;

use super::Rect;

/// Index of a room inside its layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub usize);

impl RoomId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// Which wall of a room a doorway interrupts.
///
/// North is the wall at the room's minimum plane `y`, South at its maximum,
/// West at minimum `x`, East at maximum `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    North,
    South,
    East,
    West,
}

impl WallSide {
    pub const ALL: [WallSide; 4] = [WallSide::North, WallSide::South, WallSide::East, WallSide::West];

    /// North and South walls run along plane X
    pub fn runs_along_x(self) -> bool {
        matches!(self, WallSide::North | WallSide::South)
    }
}

/// Gap in a room wall, zero thickness on the wall line.
///
/// North/South doorways span `width` along X with `height == 0`;
/// East/West doorways span `height` along Y with `width == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Doorway {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub wall_side: WallSide,
}

impl Doorway {
    /// Doorway of `length` starting at `start` along the given wall of `rect`
    pub fn on_wall(rect: &Rect, wall_side: WallSide, start: f32, length: f32) -> Self {
        match wall_side {
            WallSide::North => Self { x: start, y: rect.y, width: length, height: 0.0, wall_side },
            WallSide::South => Self {
                x: start,
                y: rect.y + rect.height,
                width: length,
                height: 0.0,
                wall_side,
            },
            WallSide::West => Self { x: rect.x, y: start, width: 0.0, height: length, wall_side },
            WallSide::East => Self {
                x: rect.x + rect.width,
                y: start,
                width: 0.0,
                height: length,
                wall_side,
            },
        }
    }

    /// `(start, end)` along the wall's running axis
    pub fn span(&self) -> (f32, f32) {
        if self.wall_side.runs_along_x() {
            (self.x, self.x + self.width)
        } else {
            (self.y, self.y + self.height)
        }
    }
}

/// A generated room
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub rect: Rect,
    /// Undirected adjacency; duplicates allowed
    pub connections: Vec<RoomId>,
    pub doorways: Vec<Doorway>,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            connections: Vec::new(),
            doorways: Vec::new(),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn is_connected_to(&self, other: RoomId) -> bool {
        self.connections.contains(&other)
    }

    /// `(start, end, fixed)` of a wall: its span along the running axis and
    /// the coordinate of the wall line on the other axis
    pub fn wall_span(&self, side: WallSide) -> (f32, f32, f32) {
        let r = &self.rect;
        match side {
            WallSide::North => (r.x, r.x + r.width, r.y),
            WallSide::South => (r.x, r.x + r.width, r.y + r.height),
            WallSide::West => (r.y, r.y + r.height, r.x),
            WallSide::East => (r.y, r.y + r.height, r.x + r.width),
        }
    }

    pub fn doorways_on(&self, side: WallSide) -> impl Iterator<Item = &Doorway> {
        self.doorways.iter().filter(move |d| d.wall_side == side)
    }
}
