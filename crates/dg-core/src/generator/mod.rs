//! Level generation strategies
//!
//! Each strategy turns a validated parameter set and a random source into a
//! [`LevelLayout`]. Runs are deterministic for a given seed.

mod chain;
mod corner;
mod grid_path;
mod walk;

pub use chain::{ChainRoomGenerator, MAX_STREAK};
pub use corner::{Borders, CornerRoomsGenerator, GAP_THRESHOLD};
pub use grid_path::{GridPathGenerator, VisitedCell, classify};
pub use walk::{RandomWalkGenerator, WalkTrace};

use log::info;

use crate::config::GenerationConfig;
use crate::dungeon::LevelLayout;
use crate::error::GenerationError;
use crate::rng::{GameRng, RandomSource};

/// A strategy that produces one level layout per call
pub trait LevelGenerator {
    fn generate<R: RandomSource>(&self, rng: &mut R) -> Result<LevelLayout, GenerationError>;
}

/// Generate a layout from a seed
pub fn generate(config: &GenerationConfig, seed: u64) -> Result<LevelLayout, GenerationError> {
    let mut rng = GameRng::new(seed);
    let layout = generate_with(config, &mut rng)?;
    info!(
        "{} layout for seed {seed}: {} rooms, {} floor tiles",
        config.strategy(),
        layout.room_count(),
        layout.floor_tiles().len()
    );
    Ok(layout)
}

/// Generate a layout from any random source
pub fn generate_with<R: RandomSource>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<LevelLayout, GenerationError> {
    match config {
        GenerationConfig::RandomWalk(c) => RandomWalkGenerator::new(c.clone())?.generate(rng),
        GenerationConfig::CornerRooms(c) => CornerRoomsGenerator::new(c.clone())?.generate(rng),
        GenerationConfig::ChainRooms(c) => ChainRoomGenerator::new(c.clone())?.generate(rng),
        GenerationConfig::GridPath(c) => GridPathGenerator::new(c.clone())?.generate(rng),
    }
}
