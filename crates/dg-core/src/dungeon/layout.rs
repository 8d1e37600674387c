//! Generation output
//!
//! A [`LevelLayout`] is built by exactly one generator run and handed out
//! read-only once the run returns. Renderers, player placement and debug
//! views consume it; none of them is consulted during generation.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::direction::Pos;
use super::room::Room;

/// What occupies a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum TileKind {
    Floor,
    Wall,
    Door,
}

impl TileKind {
    pub fn symbol(self) -> char {
        match self {
            TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Door => '+',
        }
    }
}

/// Rooms plus floor/wall/door tile sets
///
/// A coordinate is in at most one of the three tile sets. Doors win over
/// floor, floor wins over wall.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    rooms: Vec<Room>,
    floor: BTreeSet<Pos>,
    walls: BTreeSet<Pos>,
    doors: BTreeSet<Pos>,
    entrance: Option<usize>,
    exit: Option<usize>,
    reserved_floor: BTreeSet<Pos>,
    unclaimed: BTreeSet<Pos>,
}

impl LevelLayout {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // ---- building (generator side) ----

    /// Append a room, returning its index
    pub(crate) fn push_room(&mut self, room: Room) -> usize {
        self.rooms.push(room);
        self.rooms.len() - 1
    }

    /// Mark a tile as floor unless it is already a door
    pub(crate) fn carve_floor(&mut self, pos: Pos) {
        if self.doors.contains(&pos) {
            return;
        }
        self.walls.remove(&pos);
        self.floor.insert(pos);
    }

    /// Mark a tile as wall unless it is already floor or door
    pub(crate) fn place_wall(&mut self, pos: Pos) {
        if self.floor.contains(&pos) || self.doors.contains(&pos) {
            return;
        }
        self.walls.insert(pos);
    }

    /// Mark a tile as door, replacing whatever was there
    pub(crate) fn place_door(&mut self, pos: Pos) {
        self.floor.remove(&pos);
        self.walls.remove(&pos);
        self.doors.insert(pos);
    }

    /// Carve a room's interior as floor
    pub(crate) fn carve_room(&mut self, room: &Room) {
        for pos in room.interior() {
            self.carve_floor(pos);
        }
    }

    pub(crate) fn set_anchors(&mut self, entrance: Option<usize>, exit: Option<usize>) {
        self.entrance = entrance;
        self.exit = exit;
    }

    pub(crate) fn set_reserved_floor(&mut self, reserved: BTreeSet<Pos>) {
        self.reserved_floor = reserved;
    }

    pub(crate) fn set_unclaimed(&mut self, unclaimed: BTreeSet<Pos>) {
        self.unclaimed = unclaimed;
    }

    // ---- reading (consumer side) ----

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn floor_tiles(&self) -> &BTreeSet<Pos> {
        &self.floor
    }

    pub fn wall_tiles(&self) -> &BTreeSet<Pos> {
        &self.walls
    }

    pub fn door_tiles(&self) -> &BTreeSet<Pos> {
        &self.doors
    }

    /// Room the player starts in
    pub fn entrance(&self) -> Option<&Room> {
        self.entrance.and_then(|i| self.rooms.get(i))
    }

    /// Room holding the level exit
    pub fn exit(&self) -> Option<&Room> {
        self.exit.and_then(|i| self.rooms.get(i))
    }

    pub fn entrance_index(&self) -> Option<usize> {
        self.entrance
    }

    pub fn exit_index(&self) -> Option<usize> {
        self.exit
    }

    /// Reservation taken before any carving, for debug overlays
    pub fn reserved_floor(&self) -> &BTreeSet<Pos> {
        &self.reserved_floor
    }

    /// Part of the reservation nothing claimed
    pub fn unclaimed(&self) -> &BTreeSet<Pos> {
        &self.unclaimed
    }

    pub fn tile_at(&self, pos: Pos) -> Option<TileKind> {
        if self.doors.contains(&pos) {
            Some(TileKind::Door)
        } else if self.floor.contains(&pos) {
            Some(TileKind::Floor)
        } else if self.walls.contains(&pos) {
            Some(TileKind::Wall)
        } else {
            None
        }
    }

    /// Inclusive bounding box `(min, max)` of every tile and room
    ///
    /// Returns None for an empty layout.
    pub fn extent(&self) -> Option<(Pos, Pos)> {
        let tiles = self
            .floor
            .iter()
            .chain(&self.walls)
            .chain(&self.doors)
            .copied();
        let corners = self.rooms.iter().flat_map(|r| {
            [
                Pos::new(r.x, r.y),
                Pos::new(r.x + r.width - 1, r.y + r.height - 1),
            ]
        });

        tiles.chain(corners).fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((
                Pos::new(lo.x.min(p.x), lo.y.min(p.y)),
                Pos::new(hi.x.max(p.x), hi.y.max(p.y)),
            )),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_priority() {
        let mut layout = LevelLayout::new();
        let p = Pos::new(1, 1);

        layout.place_wall(p);
        assert_eq!(layout.tile_at(p), Some(TileKind::Wall));

        layout.carve_floor(p);
        assert_eq!(layout.tile_at(p), Some(TileKind::Floor));
        assert!(layout.wall_tiles().is_empty());

        layout.place_wall(p);
        assert_eq!(layout.tile_at(p), Some(TileKind::Floor));

        layout.place_door(p);
        assert_eq!(layout.tile_at(p), Some(TileKind::Door));
        assert!(layout.floor_tiles().is_empty());

        layout.carve_floor(p);
        layout.place_wall(p);
        assert_eq!(layout.tile_at(p), Some(TileKind::Door));
        assert_eq!(layout.door_tiles().len(), 1);
    }

    #[test]
    fn test_carve_is_deduplicated() {
        let mut layout = LevelLayout::new();
        let room = Room::new(0, 0, 3, 3);
        layout.carve_room(&room);
        layout.carve_room(&room);
        assert_eq!(layout.floor_tiles().len(), 9);
    }

    #[test]
    fn test_anchors() {
        let mut layout = LevelLayout::new();
        assert!(layout.entrance().is_none());
        let a = layout.push_room(Room::new(0, 0, 3, 3));
        let b = layout.push_room(Room::new(5, 0, 3, 3));
        layout.set_anchors(Some(a), Some(b));
        assert_eq!(layout.entrance().map(|r| r.x), Some(0));
        assert_eq!(layout.exit().map(|r| r.x), Some(5));
    }

    #[test]
    fn test_extent() {
        let mut layout = LevelLayout::new();
        assert_eq!(layout.extent(), None);
        layout.carve_floor(Pos::new(-2, 3));
        layout.place_wall(Pos::new(4, -1));
        layout.push_room(Room::new(0, 0, 8, 2));
        assert_eq!(layout.extent(), Some((Pos::new(-2, -1), Pos::new(7, 3))));
    }
}
