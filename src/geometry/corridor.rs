use glam::Vec2;

use super::{Rect, RoomId};

/// One leg of an L-shaped connector between two rooms.
///
/// `(x1, y1) -> (x2, y2)` is the centre line. Horizontal legs keep `y1 == y2`,
/// vertical legs keep `x1 == x2`; either may have zero length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corridor {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub is_horizontal: bool,
    pub start_room: Option<RoomId>,
    pub end_room: Option<RoomId>,
}

impl Corridor {
    pub fn horizontal(start: Vec2, end_x: f32, width: f32) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end_x,
            y2: start.y,
            width,
            is_horizontal: true,
            start_room: None,
            end_room: None,
        }
    }

    pub fn vertical(start: Vec2, end_y: f32, width: f32) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: start.x,
            y2: end_y,
            width,
            is_horizontal: false,
            start_room: None,
            end_room: None,
        }
    }

    pub fn start(&self) -> Vec2 {
        Vec2::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Vec2 {
        Vec2::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f32 {
        (self.end() - self.start()).length()
    }

    /// Centre-line extent along the leg's axis, ordered
    pub fn axis_range(&self) -> (f32, f32) {
        if self.is_horizontal {
            (self.x1.min(self.x2), self.x1.max(self.x2))
        } else {
            (self.y1.min(self.y2), self.y1.max(self.y2))
        }
    }

    /// Fixed coordinate of the centre line on the other axis
    pub fn cross_coord(&self) -> f32 {
        if self.is_horizontal {
            self.y1
        } else {
            self.x1
        }
    }

    /// Walkable area, extended half a width past both centre-line ends so
    /// bends form square corners
    pub fn footprint(&self) -> Rect {
        let half = self.width * 0.5;
        let (lo, hi) = self.axis_range();
        let c = self.cross_coord();
        if self.is_horizontal {
            Rect::new(lo - half, c - half, hi - lo + self.width, self.width)
        } else {
            Rect::new(c - half, lo - half, self.width, hi - lo + self.width)
        }
    }
}
