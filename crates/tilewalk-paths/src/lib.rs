//! Pathfinding for grid-based movement.
//!
//! A [`TilemapGraph`] turns any [`GridAdapter`](tilewalk_core::GridAdapter)
//! plus a traversable set into a lazily evaluated 4-connected graph, and
//! [`PathFinder::find_path`] runs a breadth-first search over it, bounded by
//! an expansion budget.
//!
//! Searches go through the [`Pather`] trait, so any graph with a fixed
//! neighbor order can be searched the same way.

mod bfs;
mod error;
mod finder;
mod graph;
mod traits;

pub use error::PathError;
pub use finder::PathFinder;
pub use graph::TilemapGraph;
pub use traits::Pather;
