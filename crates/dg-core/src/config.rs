//! Generation parameters
//!
//! Every strategy has its own parameter struct. [`GenerationConfig`] wraps
//! them in an internally tagged enum so a JSON file can name the strategy:
//!
//! ```json
//! { "strategy": "chain_rooms", "room_count": 8, "room_width": 5, "room_height": 5 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::ConfigError;
use crate::rng::RandomSource;

/// A min-inclusive, max-exclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
}

impl SizeRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Draw a value; returns `min` when `min == max`
    pub fn sample(&self, rng: &mut impl RandomSource) -> i32 {
        rng.range(self.min, self.max)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        positive(field, self.min)?;
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn nonzero(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositive { field, value: 0 });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value < 0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

fn room_count(value: usize) -> Result<(), ConfigError> {
    if value < 1 {
        return Err(ConfigError::ZeroRoomCount);
    }
    Ok(())
}

/// Random walk ("drunkard's walk") parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomWalkConfig {
    /// Number of independent walks from the start
    pub num_walks: i32,
    /// Steps per walk
    pub walk_length: i32,
    pub room_width: i32,
    pub room_height: i32,
    pub start_x: i32,
    pub start_y: i32,
}

impl Default for RandomWalkConfig {
    fn default() -> Self {
        Self {
            num_walks: 5,
            walk_length: 12,
            room_width: 4,
            room_height: 4,
            start_x: 0,
            start_y: 0,
        }
    }
}

impl RandomWalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("num_walks", self.num_walks)?;
        non_negative("walk_length", self.walk_length)?;
        positive("room_width", self.room_width)?;
        positive("room_height", self.room_height)
    }
}

/// Corner rooms parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornerRoomsConfig {
    pub floor_width: i32,
    pub floor_height: i32,
    /// Total rooms wanted, the four corner rooms included
    pub room_count: usize,
    pub room_width: SizeRange,
    pub room_height: SizeRange,
    /// Surround every room with a wall ring inside the floor
    pub interior_walls: bool,
}

impl Default for CornerRoomsConfig {
    fn default() -> Self {
        Self {
            floor_width: 20,
            floor_height: 20,
            room_count: 8,
            room_width: SizeRange::new(4, 6),
            room_height: SizeRange::new(4, 6),
            interior_walls: false,
        }
    }
}

impl CornerRoomsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("floor_width", self.floor_width)?;
        positive("floor_height", self.floor_height)?;
        room_count(self.room_count)?;
        self.room_width.validate("room_width")?;
        self.room_height.validate("room_height")
    }
}

/// Chain rooms parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainRoomsConfig {
    /// Total rooms wanted, side rooms included
    pub room_count: usize,
    pub room_width: i32,
    pub room_height: i32,
    /// A side room is attempted one time in `side_room_chance`
    pub side_room_chance: u32,
    /// Placement attempts allowed per step before giving up
    pub max_attempts: u32,
    /// Surround rooms with walls
    pub walls: bool,
}

impl Default for ChainRoomsConfig {
    fn default() -> Self {
        Self {
            room_count: 10,
            room_width: 5,
            room_height: 5,
            side_room_chance: 2,
            max_attempts: 64,
            walls: true,
        }
    }
}

impl ChainRoomsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        room_count(self.room_count)?;
        positive("room_width", self.room_width)?;
        positive("room_height", self.room_height)?;
        nonzero("side_room_chance", self.side_room_chance)?;
        nonzero("max_attempts", self.max_attempts)
    }
}

/// Grid path parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPathConfig {
    pub rows: i32,
    pub columns: i32,
    pub room_width: i32,
    pub room_height: i32,
}

impl Default for GridPathConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            room_width: 8,
            room_height: 6,
        }
    }
}

impl GridPathConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("rows", self.rows)?;
        positive("columns", self.columns)?;
        positive("room_width", self.room_width)?;
        positive("room_height", self.room_height)
    }
}

/// Strategy names
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Strategy {
    RandomWalk,
    CornerRooms,
    ChainRooms,
    GridPath,
}

/// Validated parameter set driving one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum GenerationConfig {
    RandomWalk(RandomWalkConfig),
    CornerRooms(CornerRoomsConfig),
    ChainRooms(ChainRoomsConfig),
    GridPath(GridPathConfig),
}

impl GenerationConfig {
    /// Default parameters for a strategy
    pub fn default_for(strategy: Strategy) -> Self {
        match strategy {
            Strategy::RandomWalk => Self::RandomWalk(RandomWalkConfig::default()),
            Strategy::CornerRooms => Self::CornerRooms(CornerRoomsConfig::default()),
            Strategy::ChainRooms => Self::ChainRooms(ChainRoomsConfig::default()),
            Strategy::GridPath => Self::GridPath(GridPathConfig::default()),
        }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::RandomWalk(_) => Strategy::RandomWalk,
            Self::CornerRooms(_) => Strategy::CornerRooms,
            Self::ChainRooms(_) => Strategy::ChainRooms,
            Self::GridPath(_) => Strategy::GridPath,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::RandomWalk(c) => c.validate(),
            Self::CornerRooms(c) => c.validate(),
            Self::ChainRooms(c) => c.validate(),
            Self::GridPath(c) => c.validate(),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
