//! Geometry primitives shared by generation and emission.
//!
//! Plain value types: rooms, corridor legs, doorways and plane rectangles.

pub mod corridor;
pub mod rect;
pub mod room;

pub use corridor::Corridor;
pub use rect::Rect;
pub use room::{Doorway, Room, RoomId, WallSide};
