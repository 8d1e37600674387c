//! Dungeon geometry
//!
//! Contains tile coordinates, directions, rooms and the generated layout.

mod direction;
mod layout;
mod room;

pub use direction::{Direction, Pos};
pub use layout::{LevelLayout, TileKind};
pub use room::{Bounds, Room, RoomArchetype};
