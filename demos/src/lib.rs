//! Shared scene for the tilewalk demos: a small hand-drawn map of bushes,
//! grass, hills, swamp and water, plus helpers to render it and pick targets.

use std::collections::HashSet;
use std::path::Path;

use tilewalk_core::{AllowedTiles, GridAdapter, Point, TileId, Tilemap, WorldPos};
use tilewalk_mover::{MoveController, MoverConfig, TileCostTable};
use tilewalk_paths::TilemapGraph;

pub const BUSHES: TileId = TileId(0);
pub const GRASS: TileId = TileId(1);
pub const HILLS: TileId = TileId(2);
pub const SWAMP: TileId = TileId(3);
pub const WATER: TileId = TileId(4);

pub const MAP: &str = "
....\"\"\"\"...^^^^^.......~~~~~~
....\"\"\"\"...^^^^^......~~~~~~~
..........^^==^^.....~~~~~~~~
...====...^^==^^.....~~~~~~..
...====.....==..........~~...
...====.....==....\"\"\"\"\"......
~~~.........==....\"\"\"\"\"......
~~~~~.......======\"\"\"\"\"...^^^
~~~~~~~.........==.......^^^^
~~~~~~~~........==......^^^^^
";

/// Map a map character to its tile. A space is an empty cell.
pub fn legend(ch: char) -> Option<TileId> {
    match ch {
        '"' => Some(BUSHES),
        '.' => Some(GRASS),
        '^' => Some(HILLS),
        '~' => Some(SWAMP),
        '=' => Some(WATER),
        _ => None,
    }
}

fn glyph(tile: Option<TileId>) -> char {
    match tile {
        Some(BUSHES) => '"',
        Some(GRASS) => '.',
        Some(HILLS) => '^',
        Some(SWAMP) => '~',
        Some(WATER) => '=',
        _ => ' ',
    }
}

/// Water is the only impassable terrain.
pub fn allowed_tiles() -> AllowedTiles {
    AllowedTiles::new([BUSHES, GRASS, HILLS, SWAMP])
}

pub fn tile_costs() -> TileCostTable {
    TileCostTable::new()
        .with_cost(BUSHES, 3.0)
        .with_cost(GRASS, 5.0)
        .with_cost(HILLS, 7.0)
        .with_cost(SWAMP, 1.0)
}

/// Read a [`MoverConfig`] from a JSON file. Missing fields take their
/// defaults.
pub fn load_config(path: &Path) -> Result<MoverConfig, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let config: MoverConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Build the demo controller with the agent in the top-left corner.
pub fn new_controller(
    config: MoverConfig,
) -> Result<MoveController<Tilemap>, Box<dyn std::error::Error>> {
    let map = Tilemap::parse(MAP, legend)?;
    let start = map.cell_to_world(Point::ZERO);
    let controller = MoveController::new(map, allowed_tiles(), tile_costs(), config, start)?;
    Ok(controller)
}

/// Pick a random traversable cell other than `avoid`.
pub fn random_target<G: GridAdapter>(
    grid: &G,
    allowed: &AllowedTiles,
    avoid: Point,
) -> Option<Point> {
    let graph = TilemapGraph::new(grid, allowed);
    let candidates: Vec<Point> = grid
        .bounds()
        .iter()
        .filter(|&p| p != avoid && graph.is_traversable(p))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rand::random_range(0..candidates.len())])
}

/// Draw the map with the planned path (`*`), the target (`X`) and the agent
/// (`@`).
pub fn render<G: GridAdapter>(controller: &MoveController<G>) -> String {
    let grid = controller.grid();
    let bounds = grid.bounds();
    let path: HashSet<Point> = controller.last_path().iter().copied().collect();
    let agent = controller.cell();
    let target = controller.target_cell();

    let mut out = String::with_capacity(bounds.len() + bounds.height() as usize);
    for y in bounds.min.y..bounds.max.y {
        for x in bounds.min.x..bounds.max.x {
            let p = Point::new(x, y);
            let ch = if p == agent {
                '@'
            } else if Some(p) == target {
                'X'
            } else if path.contains(&p) {
                '*'
            } else {
                glyph(grid.tile_at(p))
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

/// Status line under the map.
pub fn status<G: GridAdapter>(controller: &MoveController<G>) -> String {
    let target = controller
        .target()
        .map_or_else(|| "none".to_string(), |t: WorldPos| t.to_string());
    let mut line = format!(
        "pos {}  target {}  next step in {:.2}s",
        controller.position(),
        target,
        controller.time_between_steps().as_secs_f32()
    );
    if controller.at_target() {
        line.push_str("  [at target]");
    }
    if let Some(err) = controller.last_error() {
        line.push_str(&format!("  ({err})"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewalk_mover::StepOutcome;

    #[test]
    fn map_parses_and_is_rectangular() {
        let map = Tilemap::parse(MAP, legend).unwrap();
        assert_eq!(map.width(), 29);
        assert_eq!(map.height(), 10);
        assert_eq!(map.at(Point::ZERO), Some(GRASS));
        assert_eq!(map.count(None), 0);
    }

    #[test]
    fn costs_cover_allowed_tiles() {
        let speed = MoverConfig::default().speed;
        assert_eq!(tile_costs().validate(&allowed_tiles(), speed), Ok(()));
    }

    #[test]
    fn random_target_is_traversable() {
        let map = Tilemap::parse(MAP, legend).unwrap();
        let allowed = allowed_tiles();
        for _ in 0..20 {
            let p = random_target(&map, &allowed, Point::ZERO).unwrap();
            assert_ne!(p, Point::ZERO);
            assert!(allowed.allows(map.at(p)));
        }
    }

    #[test]
    fn render_marks_agent_and_target() {
        let mut c = new_controller(MoverConfig::default()).unwrap();
        c.set_target(WorldPos::new(3.5, 0.5));
        assert!(matches!(c.tick(), StepOutcome::Moved { .. }));
        let frame = render(&c);
        let first = frame.lines().next().unwrap();
        assert_eq!(&first[..4], "*@*X");
        assert!(status(&c).starts_with("pos (1.50, 0.50)"));
    }
}
