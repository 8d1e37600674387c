//! Room rectangles and overlap testing

use serde::{Deserialize, Serialize};
use strum::Display;

use super::direction::{Direction, Pos};

/// Room archetypes of a grid path layout
///
/// Tells the renderer which prefab to stamp into the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum RoomArchetype {
    /// Path enters from above and continues sideways
    Bottom,
    /// Path arrives sideways and drops down
    Top,
    /// Path passes straight through horizontally
    Corridor,
    /// Any other trajectory
    Uniform,
}

impl RoomArchetype {
    /// Single-character tag used by text renderers
    pub fn symbol(self) -> char {
        match self {
            RoomArchetype::Bottom => 'B',
            RoomArchetype::Top => 'T',
            RoomArchetype::Corridor => 'C',
            RoomArchetype::Uniform => 'U',
        }
    }
}

/// Axis-aligned bounding box centered on a room's integer center
///
/// Kept in doubled coordinates so odd extents stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Center
    pub center: Pos,
    /// Full extents (width, height)
    pub size: (i32, i32),
}

impl Bounds {
    /// Inclusive intersection test; touching edges count as intersecting
    pub fn intersects(&self, other: &Bounds) -> bool {
        let dx = (2 * (self.center.x - other.center.x)).abs();
        let dy = (2 * (self.center.y - other.center.y)).abs();
        dx <= self.size.0 + other.size.0 && dy <= self.size.1 + other.size.1
    }
}

/// Rectangle representing a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// X coordinate of room interior (left edge)
    pub x: i32,
    /// Y coordinate of room interior (bottom edge)
    pub y: i32,
    /// Width of room interior
    pub width: i32,
    /// Height of room interior
    pub height: i32,
    /// Branches off the main path instead of continuing it
    pub side_room: bool,
    /// Grid path archetype, if the room came from a grid path
    pub archetype: Option<RoomArchetype>,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            side_room: false,
            archetype: None,
        }
    }

    /// Center using integer division
    pub fn center(&self) -> Pos {
        Pos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            center: self.center(),
            size: (self.width, self.height),
        }
    }

    /// Check if this room's bounds intersect another room's
    pub fn overlaps(&self, other: &Room) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Check against every room in a set
    pub fn overlaps_any(&self, rooms: &[Room]) -> bool {
        rooms.iter().any(|r| self.overlaps(r))
    }

    /// Interiors overlap or touch, corner to corner included
    ///
    /// Exact per tile, unlike [`Room::overlaps`] whose centers round down.
    /// Rooms with a free tile between them never crowd each other.
    pub fn crowds(&self, other: &Room) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }

    pub fn crowds_any(&self, rooms: &[Room]) -> bool {
        rooms.iter().any(|r| self.crowds(r))
    }

    /// Check if a position is inside the room interior
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Interior tiles, row by row
    pub fn interior(&self) -> impl Iterator<Item = Pos> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Pos::new(x, y)))
    }

    /// The one-tile ring surrounding the interior
    pub fn wall_ring(&self) -> impl Iterator<Item = Pos> + '_ {
        let (left, right) = (self.x - 1, self.x + self.width);
        let (bottom, top) = (self.y - 1, self.y + self.height);
        (bottom..=top).flat_map(move |y| {
            (left..=right)
                .filter(move |&x| x == left || x == right || y == bottom || y == top)
                .map(move |x| Pos::new(x, y))
        })
    }

    /// Tile just outside the middle of one side
    pub fn side_door(&self, side: Direction) -> Pos {
        let center = self.center();
        match side {
            Direction::Left => Pos::new(self.x - 1, center.y),
            Direction::Right => Pos::new(self.x + self.width, center.y),
            Direction::Down => Pos::new(center.x, self.y - 1),
            Direction::Up => Pos::new(center.x, self.y + self.height),
        }
    }
}
