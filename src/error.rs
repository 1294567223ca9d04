use std::io;

use crate::engine::Tile;

/// Errors raised by [`GameEngine`](crate::GameEngine) constructors and the debug setters.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board size must be at least 2, got {0}")]
    InvalidSize(usize),
    #[error("expected a {expected}x{expected} grid, got {rows} rows (first bad row: {bad_row:?})")]
    InvalidDimension {
        expected: usize,
        rows: usize,
        bad_row: Option<usize>,
    },
    #[error("cell ({row}, {col}) holds {value}, which is neither empty nor a power of two")]
    InvalidTile { row: usize, col: usize, value: Tile },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
