//! Tile coordinates and cardinal directions
//!
//! `y` grows upward, so `Down` decreases `y`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::rng::RandomSource;

/// A tile coordinate on the level grid
///
/// Ordered row-major (by `y`, then `x`) so tile sets iterate and serialize
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move `distance` tiles in `dir`
    pub fn step(self, dir: Direction, distance: i32) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Cardinal direction
///
/// Each generator only draws from its own legal subset, see
/// [`Direction::CARDINAL`] and [`Direction::DESCENDING`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All four directions (random walk steps, floor edges)
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Directions a descending path may take
    pub const DESCENDING: [Direction; 3] = [Direction::Left, Direction::Right, Direction::Down];

    /// Unit offset of one step
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Draw from [`Direction::DESCENDING`] with weights Left 2/5, Right 2/5, Down 1/5
    pub fn weighted_descending(rng: &mut impl RandomSource) -> Direction {
        match rng.range(1, 6) {
            1 | 2 => Direction::Left,
            3 | 4 => Direction::Right,
            _ => Direction::Down,
        }
    }

    /// Random horizontal direction
    pub fn random_horizontal(rng: &mut impl RandomSource) -> Direction {
        if rng.coin_flip() {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opposites_cancel() {
        for dir in Direction::iter() {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_pos_order_is_row_major() {
        let mut tiles = vec![Pos::new(3, 1), Pos::new(0, 2), Pos::new(1, 1)];
        tiles.sort();
        assert_eq!(tiles, vec![Pos::new(1, 1), Pos::new(3, 1), Pos::new(0, 2)]);
    }

    #[test]
    fn test_step() {
        assert_eq!(Pos::new(2, 2).step(Direction::Down, 3), Pos::new(2, -1));
        assert_eq!(Pos::new(2, 2).step(Direction::Left, 1), Pos::new(1, 2));
    }

    #[test]
    fn test_weighted_descending_favors_horizontal() {
        let mut rng = GameRng::new(11);
        let mut counts = [0usize; 3];
        for _ in 0..5000 {
            match Direction::weighted_descending(&mut rng) {
                Direction::Left => counts[0] += 1,
                Direction::Right => counts[1] += 1,
                Direction::Down => counts[2] += 1,
                Direction::Up => panic!("descending draw returned Up"),
            }
        }
        // Expected roughly 2000 / 2000 / 1000
        assert!(counts[0] > 1700 && counts[0] < 2300);
        assert!(counts[1] > 1700 && counts[1] < 2300);
        assert!(counts[2] > 800 && counts[2] < 1200);
    }
}
