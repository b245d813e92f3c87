//! Tile variants and the traversable set.
//!
//! A [`TileId`] names what occupies a cell (grass, hills, water, ...). Which
//! ids an agent may step onto is decided by an [`AllowedTiles`] set supplied
//! by the host.

use std::fmt;

/// An opaque tile-variant identity.
///
/// Different values represent different terrain kinds as determined by the
/// host; the movement core only compares them for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile id.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying integer value.
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for TileId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile#{}", self.0)
    }
}

/// The ordered set of tile variants an agent may step onto.
///
/// A variant that is not listed here is never traversable. Order is kept as
/// given (first occurrence wins for duplicates) so hosts can present the
/// set in a stable way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllowedTiles {
    tiles: Vec<TileId>,
}

impl AllowedTiles {
    /// Build a traversable set from the given variants.
    pub fn new(tiles: impl IntoIterator<Item = TileId>) -> Self {
        let mut out: Vec<TileId> = Vec::new();
        for t in tiles {
            if !out.contains(&t) {
                out.push(t);
            }
        }
        Self { tiles: out }
    }

    /// The traversable variants, in order.
    #[inline]
    pub fn get(&self) -> &[TileId] {
        &self.tiles
    }

    /// Whether `tile` may be stepped onto.
    #[inline]
    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }

    /// Whether the optional occupant of a cell is traversable. Empty cells
    /// never are.
    #[inline]
    pub fn allows(&self, tile: Option<TileId>) -> bool {
        tile.is_some_and(|t| self.contains(t))
    }

    /// Number of traversable variants.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no variant is traversable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl FromIterator<TileId> for AllowedTiles {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRASS: TileId = TileId(1);
    const HILLS: TileId = TileId(2);
    const WATER: TileId = TileId(9);

    #[test]
    fn membership() {
        let allowed = AllowedTiles::new([GRASS, HILLS]);
        assert!(allowed.contains(GRASS));
        assert!(!allowed.contains(WATER));
        assert!(allowed.allows(Some(HILLS)));
        assert!(!allowed.allows(Some(WATER)));
        assert!(!allowed.allows(None));
    }

    #[test]
    fn duplicates_keep_first_order() {
        let allowed: AllowedTiles = [HILLS, GRASS, HILLS].into_iter().collect();
        assert_eq!(allowed.get(), &[HILLS, GRASS]);
        assert_eq!(allowed.len(), 2);
    }

    #[test]
    fn empty_set_allows_nothing() {
        let allowed = AllowedTiles::default();
        assert!(allowed.is_empty());
        assert!(!allowed.allows(Some(GRASS)));
    }
}
