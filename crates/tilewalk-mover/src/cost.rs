//! Per-tile movement costs.

use std::collections::BTreeMap;
use std::time::Duration;

use tilewalk_core::{AllowedTiles, TileId};

use crate::error::ConfigError;

/// Movement cost per tile variant: the time units needed to cross one cell.
///
/// Costs are keyed by tile identity, never by position in the traversable
/// set, so reordering or extending the set cannot shift costs onto the wrong
/// tiles.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCostTable {
    costs: BTreeMap<TileId, f32>,
}

impl TileCostTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_cost(mut self, tile: TileId, cost: f32) -> Self {
        self.insert(tile, cost);
        self
    }

    /// Set the cost of `tile`, returning the previous one.
    pub fn insert(&mut self, tile: TileId, cost: f32) -> Option<f32> {
        self.costs.insert(tile, cost)
    }

    /// The cost of `tile`, if it has one.
    pub fn cost(&self, tile: TileId) -> Option<f32> {
        self.costs.get(&tile).copied()
    }

    /// Time to enter a `tile` cell at the given speed: `cost / speed`
    /// seconds. `None` if the tile has no cost or the result does not fit
    /// in a [`Duration`].
    pub fn interval(&self, tile: TileId, speed: f32) -> Option<Duration> {
        let cost = self.cost(tile)?;
        Duration::try_from_secs_f64(f64::from(cost) / f64::from(speed)).ok()
    }

    /// Check that every traversable tile has a finite, positive cost whose
    /// interval at `speed` is representable. Entries for tiles outside the
    /// set are ignored.
    pub fn validate(&self, allowed: &AllowedTiles, speed: f32) -> Result<(), ConfigError> {
        for &tile in allowed.get() {
            match self.cost(tile) {
                None => return Err(ConfigError::MissingCost(tile)),
                Some(cost) if !(cost.is_finite() && cost > 0.0) => {
                    return Err(ConfigError::InvalidCost { tile, cost });
                }
                Some(_) if self.interval(tile, speed).is_none() => {
                    return Err(ConfigError::IntervalOutOfRange {
                        tile: Some(tile),
                        speed,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Number of costed tiles.
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl FromIterator<(TileId, f32)> for TileCostTable {
    fn from_iter<I: IntoIterator<Item = (TileId, f32)>>(iter: I) -> Self {
        Self {
            costs: iter.into_iter().collect(),
        }
    }
}
