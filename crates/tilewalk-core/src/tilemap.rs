//! The [`GridAdapter`] capability and the [`Tilemap`] type implementing it.
//!
//! A `Tilemap` is a *view* into a shared backing buffer of optional tiles.
//! Cloning a `Tilemap` yields another view of the **same** storage, so a host
//! can keep editing the map while a movement controller holds a clone.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geom::{Point, Range, WorldPos};
use crate::tiles::TileId;

// ---------------------------------------------------------------------------
// GridAdapter
// ---------------------------------------------------------------------------

/// Conversion between world space and grid cells, plus tile lookup.
///
/// This is everything the movement core needs to know about a map.
pub trait GridAdapter {
    /// The cells that exist. Anything outside is never traversable.
    fn bounds(&self) -> Range;

    /// The cell containing a world position.
    fn world_to_cell(&self, pos: WorldPos) -> Point;

    /// The world position of a cell's centre.
    fn cell_to_world(&self, cell: Point) -> WorldPos;

    /// The tile variant occupying a cell, `None` for empty or out-of-bounds
    /// cells.
    fn tile_at(&self, cell: Point) -> Option<TileId>;
}

// ---------------------------------------------------------------------------
// Internal shared buffer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct TileBuffer {
    cells: Vec<Option<TileId>>,
    width: usize,
    height: usize,
}

impl TileBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![None; width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height {
            Some((p.y as usize) * self.width + (p.x as usize))
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tilemap
// ---------------------------------------------------------------------------

/// A rectangular map of optional tiles laid out on a square world grid.
///
/// Cell `(0, 0)` covers world space `[origin, origin + cell_size)` on both
/// axes.
#[derive(Debug, Clone)]
pub struct Tilemap {
    buffer: Rc<RefCell<TileBuffer>>,
    bounds: Range,
    cell_size: f32,
    origin: WorldPos,
}

impl Tilemap {
    /// Create an empty map of the given dimensions with unit cells at the
    /// world origin.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            buffer: Rc::new(RefCell::new(TileBuffer::new(w, h))),
            bounds: Range::new(0, 0, width.max(0), height.max(0)),
            cell_size: 1.0,
            origin: WorldPos::default(),
        }
    }

    /// Return a view with a different world layout. Non-positive or
    /// non-finite cell sizes fall back to 1.
    pub fn with_layout(mut self, cell_size: f32, origin: WorldPos) -> Self {
        self.cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        self.origin = origin;
        self
    }

    /// Parse a map from ASCII rows.
    ///
    /// A space is an empty cell; any other character is looked up with
    /// `legend`. Leading and trailing blank lines are ignored.
    pub fn parse(text: &str, legend: impl Fn(char) -> Option<TileId>) -> Result<Self, MapError> {
        let lines: Vec<&str> = text.lines().collect();
        let blank = |l: &&str| l.trim().is_empty();
        let (Some(start), Some(end)) = (
            lines.iter().position(|l| !blank(l)),
            lines.iter().rposition(|l| !blank(l)),
        ) else {
            return Err(MapError::Empty);
        };
        let rows = &lines[start..=end];
        let first = rows[0];
        let width = first.chars().count();
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(MapError::InconsistentSize {
                content: text.to_string(),
            });
        }

        let map = Self::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                if ch == ' ' {
                    continue;
                }
                let tile = legend(ch).ok_or(MapError::InvalidRune { ch, pos })?;
                map.set(pos, Some(tile));
            }
        }
        Ok(map)
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Side length of one cell in world units.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of the corner of cell `(0, 0)`.
    #[inline]
    pub fn origin(&self) -> WorldPos {
        self.origin
    }

    /// Whether `p` is inside the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// The tile at `p`, `None` if empty or outside bounds.
    pub fn at(&self, p: Point) -> Option<TileId> {
        if !self.bounds.contains(p) {
            return None;
        }
        let buf = self.buffer.borrow();
        buf.index(p).and_then(|i| buf.cells[i])
    }

    /// Set the tile at `p`. No-op if `p` is outside bounds.
    pub fn set(&self, p: Point, tile: Option<TileId>) {
        if !self.bounds.contains(p) {
            return;
        }
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(p) {
            buf.cells[i] = tile;
        }
    }

    /// Fill every cell with `tile`.
    pub fn fill(&self, tile: Option<TileId>) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.index(p) {
                buf.cells[i] = tile;
            }
        }
    }

    /// Count the cells holding `tile`.
    pub fn count(&self, tile: Option<TileId>) -> usize {
        let buf = self.buffer.borrow();
        self.bounds
            .iter()
            .filter(|&p| buf.index(p).is_some_and(|i| buf.cells[i] == tile))
            .count()
    }
}

impl GridAdapter for Tilemap {
    fn bounds(&self) -> Range {
        self.bounds
    }

    fn world_to_cell(&self, pos: WorldPos) -> Point {
        Point::new(
            ((pos.x - self.origin.x) / self.cell_size).floor() as i32,
            ((pos.y - self.origin.y) / self.cell_size).floor() as i32,
        )
    }

    fn cell_to_world(&self, cell: Point) -> WorldPos {
        WorldPos::new(
            self.origin.x + (cell.x as f32 + 0.5) * self.cell_size,
            self.origin.y + (cell.y as f32 + 0.5) * self.cell_size,
        )
    }

    fn tile_at(&self, cell: Point) -> Option<TileId> {
        self.at(cell)
    }
}

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a [`Tilemap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// The text contains no rows.
    Empty,
    /// Rows have inconsistent widths.
    InconsistentSize { content: String },
    /// A character with no legend entry was found.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("tilemap: no rows"),
            Self::InconsistentSize { content } => {
                write!(f, "tilemap: inconsistent row widths:\n{content}")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "tilemap: no tile for \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::*;

    const GRASS: TileId = TileId(1);
    const WATER: TileId = TileId(2);

    fn legend(ch: char) -> Option<TileId> {
        match ch {
            '.' => Some(GRASS),
            '=' => Some(WATER),
            _ => None,
        }
    }

    #[test]
    fn new_map_is_empty() {
        let m = Tilemap::new(4, 3);
        assert_eq!(m.bounds(), Range::new(0, 0, 4, 3));
        assert_eq!(m.count(None), 12);
        assert_eq!(m.at(Point::new(0, 0)), None);
    }

    #[test]
    fn set_and_at() {
        let m = Tilemap::new(4, 3);
        m.set(Point::new(2, 1), Some(GRASS));
        assert_eq!(m.at(Point::new(2, 1)), Some(GRASS));
        assert_eq!(m.tile_at(Point::new(2, 1)), Some(GRASS));
        // out of bounds is a no-op / empty
        m.set(Point::new(9, 9), Some(GRASS));
        assert_eq!(m.at(Point::new(9, 9)), None);
        assert_eq!(m.at(Point::new(-1, 0)), None);
    }

    #[test]
    fn clones_share_storage() {
        let m = Tilemap::new(3, 3);
        let view = m.clone();
        m.fill(Some(GRASS));
        m.set(Point::new(1, 1), Some(WATER));
        assert_eq!(view.at(Point::new(1, 1)), Some(WATER));
        assert_eq!(view.count(Some(GRASS)), 8);
    }

    #[test]
    fn world_cell_conversion_unit_cells() {
        let m = Tilemap::new(5, 5);
        assert_eq!(m.world_to_cell(WorldPos::new(0.0, 0.0)), Point::new(0, 0));
        assert_eq!(m.world_to_cell(WorldPos::new(2.99, 1.2)), Point::new(2, 1));
        assert_eq!(m.world_to_cell(WorldPos::new(-0.1, 0.0)), Point::new(-1, 0));
        assert_eq!(m.cell_to_world(Point::new(2, 1)), WorldPos::new(2.5, 1.5));
    }

    #[test]
    fn world_cell_conversion_with_layout() {
        let m = Tilemap::new(5, 5).with_layout(2.0, WorldPos::new(-4.0, 10.0));
        assert_eq!(m.world_to_cell(WorldPos::new(-4.0, 10.0)), Point::new(0, 0));
        assert_eq!(m.world_to_cell(WorldPos::new(0.5, 13.9)), Point::new(2, 1));
        assert_eq!(m.cell_to_world(Point::new(2, 1)), WorldPos::new(1.0, 13.0));
        for p in m.bounds() {
            assert_eq!(m.world_to_cell(m.cell_to_world(p)), p);
        }
    }

    #[test]
    fn invalid_cell_size_falls_back() {
        let m = Tilemap::new(2, 2).with_layout(0.0, WorldPos::default());
        assert_eq!(m.cell_size(), 1.0);
    }

    #[test]
    fn parse_map() {
        let m = Tilemap::parse("\n..=\n. .\n", legend).unwrap();
        assert_eq!(m.width(), 3);
        assert_eq!(m.height(), 2);
        assert_eq!(m.at(Point::new(2, 0)), Some(WATER));
        assert_eq!(m.at(Point::new(1, 1)), None);
        assert_eq!(m.count(Some(GRASS)), 4);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Tilemap::parse("\n \n", legend).unwrap_err(), MapError::Empty);
        assert!(matches!(
            Tilemap::parse("..\n...", legend),
            Err(MapError::InconsistentSize { .. })
        ));
        let err = Tilemap::parse("..\n.#", legend).unwrap_err();
        assert_eq!(
            err,
            MapError::InvalidRune {
                ch: '#',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }
}
