//! Error types for configuration and generation

use thiserror::Error;

/// Problems found while loading or validating a [`GenerationConfig`](crate::GenerationConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i32 },

    #[error("{field} range is inverted: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: i32,
        max: i32,
    },

    #[error("room count must be at least 1")]
    ZeroRoomCount,

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure outcomes of a generation run.
///
/// Overlap rejections during placement are ordinary control flow and never
/// surface here.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{what} ({width}x{height}) does not fit a {floor_width}x{floor_height} floor")]
    RoomDoesNotFit {
        what: &'static str,
        width: i32,
        height: i32,
        floor_width: i32,
        floor_height: i32,
    },

    #[error("{what} collapsed to {width}x{height} while reconciling gaps")]
    RoomCollapsed {
        what: &'static str,
        width: i32,
        height: i32,
    },

    #[error("placement gave up after {attempts} attempts with {placed} of {target} rooms")]
    AttemptsExhausted {
        placed: usize,
        target: usize,
        attempts: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ConfigError::InvertedRange {
            field: "room_width",
            min: 6,
            max: 4,
        };
        assert_eq!(err.to_string(), "room_width range is inverted: min 6 > max 4");

        let err: GenerationError = ConfigError::ZeroRoomCount.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: room count must be at least 1"
        );
    }
}
