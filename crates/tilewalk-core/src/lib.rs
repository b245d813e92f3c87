//! **tilewalk-core**: core types for grid-based movement.
//!
//! This crate provides the foundational types shared by the *tilewalk*
//! crates: geometry primitives, tile identities with the traversable set, and
//! the [`GridAdapter`] capability with a concrete [`Tilemap`].

pub mod geom;
pub mod tilemap;
pub mod tiles;

pub use geom::{Point, Range, WorldPos};
pub use tilemap::{GridAdapter, MapError, Tilemap};
pub use tiles::{AllowedTiles, TileId};
