//! Grid path generation
//!
//! The board is split into `rows x columns` cells of one room each. A path
//! starts in a random column of the highest row, runs sideways and drops a
//! row at a time until it falls out below row 0. Each visited cell gets one
//! room whose archetype follows from how the path enters and leaves it.
//! Cells off the path stay empty.
//!
//! Based on <https://tinysubversions.com/spelunkyGen/>.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::config::GridPathConfig;
use crate::dungeon::{Direction, LevelLayout, Pos, Room, RoomArchetype};
use crate::error::{ConfigError, GenerationError};
use crate::rng::RandomSource;

use super::LevelGenerator;

/// A cell on the path, addressed by column (`x`) and row (`y`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitedCell {
    pub cell: Pos,
    pub archetype: RoomArchetype,
}

/// Archetype of `current` given the cells before and after it
pub fn classify(last: Pos, current: Pos, next: Pos) -> RoomArchetype {
    if next.y == current.y {
        if last.y > current.y {
            return RoomArchetype::Bottom;
        }
        return RoomArchetype::Corridor;
    }

    if next.y < current.y {
        if current.y == last.y {
            return RoomArchetype::Top;
        }
        if next.x < current.x {
            return RoomArchetype::Corridor;
        }
    }

    RoomArchetype::Uniform
}

#[derive(Debug, Clone)]
pub struct GridPathGenerator {
    config: GridPathConfig,
}

impl GridPathGenerator {
    pub fn new(config: GridPathConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn last_column(&self) -> i32 {
        self.config.columns - 1
    }

    /// Turn a horizontal direction around if it points off the board
    fn corrected(&self, dir: Direction, column: i32) -> Direction {
        match dir {
            Direction::Left if column == 0 => Direction::Right,
            Direction::Right if column == self.last_column() => Direction::Left,
            _ => dir,
        }
    }

    /// Cell reached by moving `dir`; moves off the side drop a row instead
    fn next_cell(&self, dir: Direction, current: Pos) -> Pos {
        let down = Pos::new(current.x, current.y - 1);
        match dir {
            Direction::Left if current.x > 0 => Pos::new(current.x - 1, current.y),
            Direction::Right if current.x < self.last_column() => Pos::new(current.x + 1, current.y),
            _ => down,
        }
    }

    /// Trace the path without building rooms
    pub fn walk<R: RandomSource>(&self, rng: &mut R) -> Vec<VisitedCell> {
        let start = Pos::new(rng.range(0, self.config.columns), self.config.rows - 1);
        let mut dir = self.corrected(Direction::Left, start.x);
        let mut current = start;
        let mut last: Option<Pos> = None;
        let mut visited = Vec::new();

        while current.y >= 0 {
            // Sideways draws keep the current heading; only Down changes it
            if last.is_some() && Direction::weighted_descending(rng) == Direction::Down {
                dir = Direction::Down;
            }

            let next = self.next_cell(dir, current);
            if next.y < current.y {
                dir = self.corrected(Direction::weighted_descending(rng), current.x);
            }

            let archetype = match last {
                None => RoomArchetype::Bottom,
                Some(last) => classify(last, current, next),
            };
            trace!("cell ({}, {}) is {archetype}", current.x, current.y);
            visited.push(VisitedCell {
                cell: current,
                archetype,
            });

            last = Some(current);
            current = next;
        }

        visited
    }

    fn room_for(&self, visited: &VisitedCell) -> Room {
        let (w, h) = (self.config.room_width, self.config.room_height);
        let mut room = Room::new(visited.cell.x * w, visited.cell.y * h, w, h);
        room.archetype = Some(visited.archetype);
        room
    }
}

impl LevelGenerator for GridPathGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<LevelLayout, GenerationError> {
        let c = &self.config;
        let mut layout = LevelLayout::new();

        let reserved: BTreeSet<Pos> = (0..c.rows)
            .flat_map(|row| (0..c.columns).map(move |col| Pos::new(col * c.room_width, row * c.room_height)))
            .collect();
        let mut unclaimed = reserved.clone();
        layout.set_reserved_floor(reserved);

        let path = self.walk(rng);
        for visited in &path {
            let room = self.room_for(visited);
            unclaimed.remove(&Pos::new(room.x, room.y));
            layout.push_room(room);
        }

        debug!(
            "grid path: {} of {} cells visited",
            path.len(),
            c.rows * c.columns
        );
        layout.set_unclaimed(unclaimed);
        layout.set_anchors(Some(0), path.len().checked_sub(1));
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn generator(rows: i32, columns: i32) -> GridPathGenerator {
        GridPathGenerator::new(GridPathConfig {
            rows,
            columns,
            room_width: 8,
            room_height: 6,
        })
        .unwrap()
    }

    #[test]
    fn test_classify() {
        let p = Pos::new;
        // Dropped in from above, leaving sideways
        assert_eq!(classify(p(1, 2), p(1, 1), p(2, 1)), RoomArchetype::Bottom);
        // Straight through
        assert_eq!(classify(p(0, 1), p(1, 1), p(2, 1)), RoomArchetype::Corridor);
        // Arrived sideways, dropping down
        assert_eq!(classify(p(0, 1), p(1, 1), p(1, 0)), RoomArchetype::Top);
        // Vertical shaft
        assert_eq!(classify(p(1, 2), p(1, 1), p(1, 0)), RoomArchetype::Uniform);
    }

    #[test]
    fn test_start_edges() {
        let generator = generator(3, 3);
        assert_eq!(generator.corrected(Direction::Left, 0), Direction::Right);
        assert_eq!(generator.corrected(Direction::Right, 2), Direction::Left);
        assert_eq!(generator.corrected(Direction::Left, 1), Direction::Left);
        assert_eq!(generator.next_cell(Direction::Left, Pos::new(0, 2)), Pos::new(0, 1));
        assert_eq!(generator.next_cell(Direction::Right, Pos::new(2, 2)), Pos::new(2, 1));
        assert_eq!(generator.next_cell(Direction::Right, Pos::new(1, 2)), Pos::new(2, 2));
    }

    #[test]
    fn test_path_shape() {
        for seed in 0..50 {
            let path = generator(3, 3).walk(&mut GameRng::new(seed));
            assert_eq!(path[0].cell.y, 2, "seed {seed}");
            assert_eq!(path[0].archetype, RoomArchetype::Bottom);
            assert_eq!(path.last().unwrap().cell.y, 0, "seed {seed}");

            let mut seen = BTreeSet::new();
            for pair in path.windows(2) {
                assert!(pair[1].cell.y <= pair[0].cell.y, "seed {seed}: row went up");
            }
            for v in &path {
                assert!((0..3).contains(&v.cell.x), "seed {seed}: column {}", v.cell.x);
                assert!(seen.insert(v.cell), "seed {seed}: {:?} visited twice", v.cell);
            }
        }
    }

    #[test]
    fn test_single_column() {
        let path = generator(4, 1).walk(&mut GameRng::new(9));
        let cells: Vec<_> = path.iter().map(|v| v.cell).collect();
        assert_eq!(
            cells,
            vec![Pos::new(0, 3), Pos::new(0, 2), Pos::new(0, 1), Pos::new(0, 0)]
        );
    }

    #[test]
    fn test_rooms_match_cells() {
        let generator = generator(3, 3);
        let layout = generator.generate(&mut GameRng::new(17)).unwrap();
        let path = generator.walk(&mut GameRng::new(17));

        assert_eq!(layout.room_count(), path.len());
        assert_eq!(layout.reserved_floor().len(), 9);
        assert_eq!(layout.unclaimed().len(), 9 - path.len());
        for (room, visited) in layout.rooms().iter().zip(&path) {
            assert_eq!((room.x, room.y), (visited.cell.x * 8, visited.cell.y * 6));
            assert_eq!(room.archetype, Some(visited.archetype));
            assert!(room.x + room.width <= 24 && room.y + room.height <= 18);
        }
        assert!(layout.floor_tiles().is_empty());
        assert_eq!(layout.exit(), layout.rooms().last());
    }
}
