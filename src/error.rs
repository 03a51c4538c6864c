use std::io;

use thiserror::Error;

use crate::settings::SettingsError;
use crate::snake::Position;

/// Grid axis named in configuration errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

/// Invalid session configuration, detected before any tick runs.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid unit must be positive, got {0}")]
    NonPositiveGridUnit(i32),
    #[error("board extent on the {axis} axis must not be negative, got {value}")]
    NegativeExtent { axis: Axis, value: i32 },
    #[error("board has no whole grid cell on the {axis} axis")]
    NoCellsOnAxis { axis: Axis },
    #[error("initial snake length {actual} is below the minimum of {minimum}")]
    InitialLengthTooShort { actual: usize, minimum: usize },
    #[error("a snake of length {length} does not fit on a board {columns} cells wide")]
    SnakeDoesNotFit { length: usize, columns: i64 },
    #[error("food margin must not be negative, got {0}")]
    NegativeFoodMargin(i32),
    #[error("food margin {margin} leaves no cell for food")]
    EmptyFoodArea { margin: i32 },
    #[error("segment at ({}, {}) lies outside the board", .0.x, .0.y)]
    SegmentOutOfBounds(Position),
    #[error("food at ({}, {}) lies outside the board", .0.x, .0.y)]
    FoodOutOfBounds(Position),
    #[error("tick interval must be positive")]
    ZeroTickInterval,
}

/// Fatal simulation failures.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("board too full to place food")]
    BoardFull,
}

/// Top-level failures of the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::Game(GameError::Config(error))
    }
}
