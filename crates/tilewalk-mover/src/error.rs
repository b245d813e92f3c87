//! Error types for controller setup and stepping.

use std::fmt;

use tilewalk_core::{Point, TileId};
use tilewalk_paths::PathError;

/// A rejected [`MoverConfig`](crate::MoverConfig) or cost table.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `speed` must be finite and strictly positive.
    InvalidSpeed(f32),
    /// `max_expansions` must be at least 1.
    ZeroExpansions,
    /// A traversable tile has no entry in the cost table.
    MissingCost(TileId),
    /// A cost must be finite and strictly positive.
    InvalidCost { tile: TileId, cost: f32 },
    /// A step interval (`1 / speed` when `tile` is `None`, otherwise
    /// `cost / speed`) is too long to represent as a [`Duration`].
    ///
    /// [`Duration`]: std::time::Duration
    IntervalOutOfRange { tile: Option<TileId>, speed: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed(speed) => write!(f, "speed must be > 0, got {speed}"),
            Self::ZeroExpansions => f.write_str("max_expansions must be at least 1"),
            Self::MissingCost(tile) => write!(f, "traversable {tile} has no movement cost"),
            Self::InvalidCost { tile, cost } => {
                write!(f, "movement cost of {tile} must be > 0, got {cost}")
            }
            Self::IntervalOutOfRange {
                tile: Some(tile),
                speed,
            } => write!(f, "step interval of {tile} at speed {speed} is out of range"),
            Self::IntervalOutOfRange { tile: None, speed } => {
                write!(f, "base step interval at speed {speed} is out of range")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A non-fatal problem met during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepError {
    /// Planning failed; the agent stays put and retries next tick.
    Path(PathError),
    /// The cell being entered no longer holds a costed traversable tile, so
    /// the step interval was left unchanged.
    InvalidTile { cell: Point, tile: Option<TileId> },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(err) => write!(f, "planning failed: {err}"),
            Self::InvalidTile { cell, tile: Some(tile) } => {
                write!(f, "{tile} at {cell} is not a costed traversable tile")
            }
            Self::InvalidTile { cell, tile: None } => write!(f, "no tile at {cell}"),
        }
    }
}

impl std::error::Error for StepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Path(err) => Some(err),
            Self::InvalidTile { .. } => None,
        }
    }
}

impl From<PathError> for StepError {
    fn from(err: PathError) -> Self {
        Self::Path(err)
    }
}
