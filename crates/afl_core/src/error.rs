use thiserror::Error;

use crate::models::TeamSide;

/// Errors surfaced to callers of the match core.
///
/// Everything except `Serialization`/`ConfigParse`/`Io` is a configuration
/// error raised before the first tick; a match never starts half-built.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid roster size for {side:?} team: expected {expected} on field, found {found}")]
    InvalidRosterSize { side: TeamSide, expected: usize, found: usize },

    #[error("Bench too large for {side:?} team: at most {max}, found {found}")]
    BenchTooLarge { side: TeamSide, max: usize, found: usize },

    #[error("Player {player_id} ({side:?}) has no attribute record")]
    MissingAttributes { side: TeamSide, player_id: u32 },

    #[error("Player id {player_id} appears more than once in the {side:?} squad")]
    DuplicatePlayer { side: TeamSide, player_id: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u8),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MatchError {
    /// True for errors detected while validating setup or config.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MatchError::InvalidRosterSize { .. }
                | MatchError::BenchTooLarge { .. }
                | MatchError::MissingAttributes { .. }
                | MatchError::DuplicatePlayer { .. }
                | MatchError::InvalidConfig(_)
        )
    }
}

/// Failure reported by an event sink. Never propagated into the tick loop.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("sink receiver disconnected")]
    Disconnected,

    #[error("sink buffer full, event dropped")]
    Full,

    #[error("sink rejected event: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
