use tilewalk_core::{AllowedTiles, GridAdapter, Point};

use crate::traits::Pather;

/// A lazy graph view over a tile grid.
///
/// Nodes are cells; an edge joins two cells one axis-aligned step apart when
/// the destination cell holds a traversable tile. Nothing is materialized:
/// every [`neighbors`](Pather::neighbors) call consults the grid and the
/// traversable set at query time.
#[derive(Debug, Clone, Copy)]
pub struct TilemapGraph<'a, G> {
    grid: &'a G,
    allowed: &'a AllowedTiles,
}

impl<'a, G: GridAdapter> TilemapGraph<'a, G> {
    /// Create a graph view over `grid` restricted to `allowed` tiles.
    pub fn new(grid: &'a G, allowed: &'a AllowedTiles) -> Self {
        Self { grid, allowed }
    }

    /// Whether `p` is inside the grid and holds a traversable tile.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.grid.bounds().contains(p) && self.allowed.allows(self.grid.tile_at(p))
    }
}

impl<G: GridAdapter> Pather for TilemapGraph<'_, G> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.is_traversable(n) {
                buf.push(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewalk_core::{TileId, Tilemap};

    const GRASS: TileId = TileId(1);
    const WATER: TileId = TileId(2);

    fn map(text: &str) -> Tilemap {
        Tilemap::parse(text, |ch| match ch {
            '.' => Some(GRASS),
            '=' => Some(WATER),
            _ => None,
        })
        .unwrap()
    }

    fn neighbors_of<P: Pather>(g: &P, p: Point) -> Vec<Point> {
        let mut buf = Vec::new();
        g.neighbors(p, &mut buf);
        buf
    }

    #[test]
    fn open_cell_has_four_neighbors_in_order() {
        let m = map("...\n...\n...");
        let allowed = AllowedTiles::new([GRASS]);
        let g = TilemapGraph::new(&m, &allowed);
        assert_eq!(
            neighbors_of(&g, Point::new(1, 1)),
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1),
            ]
        );
    }

    #[test]
    fn bounds_and_blocked_tiles_are_omitted() {
        let m = map(".=\n .");
        let allowed = AllowedTiles::new([GRASS]);
        let g = TilemapGraph::new(&m, &allowed);
        // (1,0) is water, (0,1) is empty, the rest is out of bounds.
        assert!(neighbors_of(&g, Point::new(0, 0)).is_empty());
        assert_eq!(neighbors_of(&g, Point::new(1, 0)), vec![Point::new(1, 1)]);
    }

    #[test]
    fn query_cell_itself_is_not_required_traversable() {
        let m = map("=.");
        let allowed = AllowedTiles::new([GRASS]);
        let g = TilemapGraph::new(&m, &allowed);
        assert_eq!(neighbors_of(&g, Point::new(0, 0)), vec![Point::new(1, 0)]);
        assert!(!g.is_traversable(Point::new(0, 0)));
    }

    #[test]
    fn reflects_grid_edits_between_queries() {
        let m = map("..");
        let allowed = AllowedTiles::new([GRASS]);
        let g = TilemapGraph::new(&m, &allowed);
        assert_eq!(neighbors_of(&g, Point::new(0, 0)), vec![Point::new(1, 0)]);
        m.set(Point::new(1, 0), Some(WATER));
        assert!(neighbors_of(&g, Point::new(0, 0)).is_empty());
    }
}
