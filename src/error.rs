use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected or unreadable game configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },

    #[error("grid height {height} is too short for the starting snake of length {snake_len}")]
    TooShort { height: u16, snake_len: usize },

    #[error("grid of {cells} cells cannot hold a snake of {snake_len} and {food} food items")]
    OverCapacity {
        cells: usize,
        snake_len: usize,
        food: usize,
    },

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures surfaced by the simulation itself.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid game configuration")]
    Config(#[from] ConfigError),

    /// Food placement found no free cell on the grid.
    #[error("no free cell left on the {width}x{height} grid")]
    GridExhausted { width: u16, height: u16 },
}

impl From<GameError> for io::Error {
    fn from(error: GameError) -> Self {
        io::Error::other(error)
    }
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        io::Error::other(error)
    }
}
