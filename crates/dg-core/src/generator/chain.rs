//! Chain rooms generation
//!
//! A single path of equally sized rooms grows from a start room, drifting
//! sideways and stepping down. Each accepted room is joined to its
//! predecessor by a door on the one-tile gap between them, and may sprout a
//! side room that does not continue the path.

use log::{debug, trace};

use crate::config::ChainRoomsConfig;
use crate::dungeon::{Direction, LevelLayout, Pos, Room};
use crate::error::{ConfigError, GenerationError};
use crate::rng::RandomSource;

use super::LevelGenerator;

/// Most consecutive moves allowed in one direction
pub const MAX_STREAK: u32 = 2;

/// Per-run state
#[derive(Debug)]
struct ChainState {
    rooms: Vec<Room>,
    doors: Vec<Pos>,
    /// Index of the room the path continues from
    head: usize,
    previous: Option<Direction>,
    streak: u32,
}

impl ChainState {
    fn new(start: Room) -> Self {
        Self {
            rooms: vec![start],
            doors: Vec::new(),
            head: 0,
            previous: None,
            streak: 0,
        }
    }

    fn head(&self) -> &Room {
        &self.rooms[self.head]
    }

    /// Apply the anti-repetition rules to a drawn direction
    ///
    /// A third move in the same direction, or a horizontal move straight
    /// back the way the path came, is redirected.
    fn resolve<R: RandomSource>(&self, pick: Direction, rng: &mut R) -> Direction {
        let repeated = self.previous == Some(pick) && self.streak >= MAX_STREAK;
        match pick {
            Direction::Down if repeated => Direction::random_horizontal(rng),
            Direction::Left | Direction::Right
                if repeated || self.previous == Some(pick.opposite()) =>
            {
                Direction::Down
            }
            _ => pick,
        }
    }

    fn commit(&mut self, dir: Direction) {
        if self.previous == Some(dir) {
            self.streak += 1;
        } else {
            self.previous = Some(dir);
            self.streak = 1;
        }
    }
}

/// Room next to `from`, one tile of gap away in `dir`
fn neighbour(from: &Room, dir: Direction) -> Room {
    let distance = if dir.is_horizontal() {
        from.width + 1
    } else {
        from.height + 1
    };
    let origin = Pos::new(from.x, from.y).step(dir, distance);
    Room::new(origin.x, origin.y, from.width, from.height)
}

#[derive(Debug, Clone)]
pub struct ChainRoomGenerator {
    config: ChainRoomsConfig,
}

impl ChainRoomGenerator {
    pub fn new(config: ChainRoomsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Extend the path by one room
    ///
    /// Overlapping candidates are discarded and redrawn, up to
    /// `max_attempts` times.
    fn extend<R: RandomSource>(&self, state: &mut ChainState, rng: &mut R) -> Result<Direction, GenerationError> {
        for attempt in 1..=self.config.max_attempts {
            let pick = Direction::weighted_descending(rng);
            let dir = state.resolve(pick, rng);
            let candidate = neighbour(state.head(), dir);

            if candidate.overlaps_any(&state.rooms) {
                debug!(
                    "attempt {attempt}: {dir} room at ({}, {}) overlaps, retrying",
                    candidate.x, candidate.y
                );
                continue;
            }

            state.doors.push(state.head().side_door(dir));
            state.rooms.push(candidate);
            state.head = state.rooms.len() - 1;
            state.commit(dir);
            trace!("path {dir} -> room {}", state.head);
            return Ok(dir);
        }

        Err(GenerationError::AttemptsExhausted {
            placed: state.rooms.len(),
            target: self.config.room_count,
            attempts: self.config.max_attempts,
        })
    }

    /// Try one side room off the head room; overlaps are dropped silently
    fn branch<R: RandomSource>(&self, state: &mut ChainState, main: Direction, rng: &mut R) {
        let side = if main.is_horizontal() {
            Direction::Up
        } else {
            Direction::random_horizontal(rng)
        };

        let mut room = neighbour(state.head(), side);
        if room.overlaps_any(&state.rooms) {
            trace!("side room {side} of room {} dropped", state.head);
            return;
        }

        room.side_room = true;
        state.doors.push(state.head().side_door(side));
        state.rooms.push(room);
    }

    fn build_layout(&self, state: ChainState) -> LevelLayout {
        let mut layout = LevelLayout::new();

        for room in &state.rooms {
            layout.carve_room(room);
        }
        if self.config.walls {
            for room in &state.rooms {
                for pos in room.wall_ring() {
                    layout.place_wall(pos);
                }
            }
        }
        for &door in &state.doors {
            layout.place_door(door);
        }

        let last = state.rooms.len() - 1;
        let exit = if state.rooms[last].side_room {
            last - 1
        } else {
            last
        };
        for room in state.rooms {
            layout.push_room(room);
        }
        layout.set_anchors(Some(0), Some(exit));
        layout
    }
}

impl LevelGenerator for ChainRoomGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<LevelLayout, GenerationError> {
        let c = &self.config;
        let mut state = ChainState::new(Room::new(0, 0, c.room_width, c.room_height));

        while state.rooms.len() < c.room_count {
            let dir = self.extend(&mut state, rng)?;
            if state.rooms.len() < c.room_count && rng.one_in(c.side_room_chance) {
                self.branch(&mut state, dir, rng);
            }
        }

        debug!(
            "chain rooms: {} rooms, {} side rooms",
            state.rooms.len(),
            state.rooms.iter().filter(|r| r.side_room).count()
        );
        Ok(self.build_layout(state))
    }
}
