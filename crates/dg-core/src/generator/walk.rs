//! Random walk ("drunkard's walk") generation
//!
//! Several walks start from the same origin. Each step moves the cursor by
//! one room-sized block in a uniformly drawn cardinal direction and marks
//! the block as floor. Walks may wander apart; nothing bounds them and no
//! walls are placed.

use log::{debug, trace};

use crate::config::RandomWalkConfig;
use crate::dungeon::{Direction, LevelLayout, Pos};
use crate::error::{ConfigError, GenerationError};
use crate::rng::RandomSource;

use super::LevelGenerator;

/// Cursor positions visited by every walk, start position first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkTrace {
    pub start: Pos,
    /// One entry per walk, one cursor per step
    pub walks: Vec<Vec<Pos>>,
}

impl WalkTrace {
    /// Every cursor whose block was marked, start included
    pub fn cursors(&self) -> impl Iterator<Item = Pos> + '_ {
        core::iter::once(self.start).chain(self.walks.iter().flatten().copied())
    }
}

#[derive(Debug, Clone)]
pub struct RandomWalkGenerator {
    config: RandomWalkConfig,
}

impl RandomWalkGenerator {
    pub fn new(config: RandomWalkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the walks without carving anything
    pub fn trace<R: RandomSource>(&self, rng: &mut R) -> WalkTrace {
        let c = &self.config;
        let start = Pos::new(c.start_x, c.start_y);
        let mut walks = Vec::with_capacity(c.num_walks as usize);

        for _ in 0..c.num_walks {
            let mut cursor = start;
            let mut steps = Vec::with_capacity(c.walk_length as usize);

            for _ in 0..c.walk_length {
                let dir = Direction::CARDINAL[rng.range(0, 4) as usize];
                let distance = if dir.is_horizontal() {
                    c.room_width
                } else {
                    c.room_height
                };
                cursor = cursor.step(dir, distance);
                trace!("walk step {dir} -> ({}, {})", cursor.x, cursor.y);
                steps.push(cursor);
            }

            walks.push(steps);
        }

        WalkTrace { start, walks }
    }

    /// Mark the `room_width x room_height` block at `origin`
    fn mark_block(&self, layout: &mut LevelLayout, origin: Pos) {
        for dy in 0..self.config.room_height {
            for dx in 0..self.config.room_width {
                layout.carve_floor(Pos::new(origin.x + dx, origin.y + dy));
            }
        }
    }
}

impl LevelGenerator for RandomWalkGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<LevelLayout, GenerationError> {
        let walk = self.trace(rng);
        let mut layout = LevelLayout::new();

        for cursor in walk.cursors() {
            self.mark_block(&mut layout, cursor);
        }

        debug!(
            "random walk: {} walks marked {} floor tiles",
            walk.walks.len(),
            layout.floor_tiles().len()
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn generator(num_walks: i32, walk_length: i32) -> RandomWalkGenerator {
        RandomWalkGenerator::new(RandomWalkConfig {
            num_walks,
            walk_length,
            room_width: 3,
            room_height: 2,
            start_x: 0,
            start_y: 0,
        })
        .unwrap()
    }

    #[test]
    fn test_no_walks_marks_start_block() {
        let layout = generator(0, 10).generate(&mut GameRng::new(1)).unwrap();
        assert_eq!(layout.floor_tiles().len(), 6);
        assert!(layout.wall_tiles().is_empty());
        assert!(layout.rooms().is_empty());
        assert!(layout.entrance().is_none());
    }

    #[test]
    fn test_steps_move_one_block() {
        let walk = generator(3, 20).trace(&mut GameRng::new(5));
        assert_eq!(walk.walks.len(), 3);
        for steps in &walk.walks {
            assert_eq!(steps.len(), 20);
            let mut prev = walk.start;
            for &cursor in steps {
                let (dx, dy) = ((cursor.x - prev.x).abs(), (cursor.y - prev.y).abs());
                assert!((dx, dy) == (3, 0) || (dx, dy) == (0, 2), "jump {prev:?} -> {cursor:?}");
                prev = cursor;
            }
        }
    }

    #[test]
    fn test_every_block_present() {
        let generator = generator(4, 15);
        let walk = generator.trace(&mut GameRng::new(77));
        let layout = generator.generate(&mut GameRng::new(77)).unwrap();

        for cursor in walk.cursors() {
            for dy in 0..2 {
                for dx in 0..3 {
                    let p = Pos::new(cursor.x + dx, cursor.y + dy);
                    assert!(layout.floor_tiles().contains(&p), "missing {p:?}");
                }
            }
        }
    }

    #[test]
    fn test_start_offset() {
        let generator = RandomWalkGenerator::new(RandomWalkConfig {
            num_walks: 0,
            start_x: 10,
            start_y: -4,
            ..Default::default()
        })
        .unwrap();
        let layout = generator.generate(&mut GameRng::new(1)).unwrap();
        assert!(layout.floor_tiles().contains(&Pos::new(10, -4)));
        assert!(!layout.floor_tiles().contains(&Pos::new(0, 0)));
    }
}
