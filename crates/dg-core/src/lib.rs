//! dg-core: Procedural level layout generation
//!
//! This crate turns a parameter set and a seed into a 2D layout of rooms,
//! walls, doors and corridors. It does no rendering and no I/O beyond
//! loading JSON configs.
//!
//! Four strategies are available: random walk, corner rooms, chain rooms and
//! grid path. All of them are deterministic for a given seed.

pub mod config;
pub mod dungeon;
pub mod error;
pub mod generator;

mod rng;
mod setup;

pub use config::{GenerationConfig, SizeRange, Strategy};
pub use dungeon::{Direction, LevelLayout, Pos, Room, RoomArchetype, TileKind};
pub use error::{ConfigError, GenerationError};
pub use generator::{LevelGenerator, generate, generate_with};
pub use rng::{GameRng, RandomSource};
pub use setup::LevelSetup;
