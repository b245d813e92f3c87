//! Timer-driven movement of a single agent across a tile grid.
//!
//! A [`MoveController`] owns the agent's position and target. On every timer
//! firing it re-plans a breadth-first path from the agent's cell to the
//! target cell, advances one cell along it, and sets the next wait from the
//! [`TileCostTable`] cost of the cell just entered, divided by the
//! configured speed.
//!
//! All failures are soft: an unreachable target or an exhausted search
//! budget leaves the agent where it is for this tick, and the next tick tries
//! again.

mod config;
mod controller;
mod cost;
mod error;
mod timer;

pub use config::MoverConfig;
pub use controller::{MoveController, MoveState, StepOutcome};
pub use cost::TileCostTable;
pub use error::{ConfigError, StepError};
pub use timer::{MIN_INTERVAL, StepTimer};

pub use tilewalk_paths::PathError;
