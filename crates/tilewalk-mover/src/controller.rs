//! The [`MoveController`] step state machine.

use std::time::Duration;

use tilewalk_core::{AllowedTiles, GridAdapter, Point, WorldPos};
use tilewalk_paths::{PathError, PathFinder, TilemapGraph};

use crate::config::MoverConfig;
use crate::cost::TileCostTable;
use crate::error::{ConfigError, StepError};
use crate::timer::StepTimer;

/// Whether the controller is still trying to reach its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveState {
    /// At the target (or no target yet). Ticks do nothing.
    Idle,
    /// Stepping toward the target, one cell per tick.
    Moving,
}

/// What a single [`tick`](MoveController::tick) did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Disabled, or nothing to do.
    Skipped,
    /// The agent entered `to`. `interval` is the wait before the next tick;
    /// `arrived` is set when `to` is the target cell.
    Moved {
        to: Point,
        interval: Duration,
        arrived: bool,
    },
    /// The planner returned a single-cell path: the agent already stands on
    /// the target cell.
    Arrived,
    /// No route this tick. The agent stays put and tries again next tick.
    Stalled(PathError),
}

#[derive(Debug, Clone, Copy)]
struct Target {
    world: WorldPos,
    cell: Point,
}

/// Moves a single agent toward a target cell, one cell per timer firing.
///
/// Every tick re-plans from scratch with a bounded breadth-first search, so
/// edits to the grid between ticks are picked up immediately. The wait
/// before the next tick is the movement cost of the cell just entered
/// divided by the configured speed.
///
/// The controller can be driven either by calling [`tick`](Self::tick)
/// whenever [`time_between_steps`](Self::time_between_steps) has elapsed, or
/// by feeding elapsed time to [`update`](Self::update) from a host loop.
pub struct MoveController<G: GridAdapter> {
    grid: G,
    allowed: AllowedTiles,
    costs: TileCostTable,
    config: MoverConfig,
    finder: PathFinder,
    timer: StepTimer,
    position: WorldPos,
    target: Option<Target>,
    state: MoveState,
    enabled: bool,
    time_between_steps: Duration,
    last_path: Vec<Point>,
    last_error: Option<StepError>,
}

impl<G: GridAdapter> MoveController<G> {
    /// Create a controller for an agent standing at `start`.
    ///
    /// The start position is snapped to its cell centre. The first wait is
    /// `1 / speed` seconds. Fails if `config` is out of range or a
    /// traversable tile has no valid cost.
    pub fn new(
        grid: G,
        allowed: AllowedTiles,
        costs: TileCostTable,
        config: MoverConfig,
        start: WorldPos,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        costs.validate(&allowed, config.speed)?;
        let position = grid.cell_to_world(grid.world_to_cell(start));
        let interval = config.base_interval()?;
        Ok(Self {
            finder: PathFinder::new(grid.bounds()),
            grid,
            allowed,
            costs,
            config,
            timer: StepTimer::new(interval),
            position,
            target: None,
            state: MoveState::Idle,
            enabled: true,
            time_between_steps: interval,
            last_path: Vec::new(),
            last_error: None,
        })
    }

    // -----------------------------------------------------------------------
    // Target
    // -----------------------------------------------------------------------

    /// Aim at a new world position.
    ///
    /// Setting the position already targeted is a no-op. Otherwise the
    /// controller starts moving, unless the agent already stands in the
    /// target cell, in which case it is at the target right away.
    pub fn set_target(&mut self, pos: WorldPos) {
        if self.target.is_some_and(|t| t.world == pos) {
            return;
        }
        let cell = self.grid.world_to_cell(pos);
        self.target = Some(Target { world: pos, cell });
        self.last_path.clear();
        self.last_error = None;
        if cell == self.cell() {
            self.arrive();
        } else {
            log::debug!("new target {pos} (cell {cell})");
            self.state = MoveState::Moving;
        }
    }

    /// The targeted world position, `None` before the first
    /// [`set_target`](Self::set_target).
    pub fn target(&self) -> Option<WorldPos> {
        self.target.map(|t| t.world)
    }

    /// The targeted cell.
    pub fn target_cell(&self) -> Option<Point> {
        self.target.map(|t| t.cell)
    }

    /// Whether the agent has reached its target (or has none).
    pub fn at_target(&self) -> bool {
        self.state == MoveState::Idle
    }

    pub fn state(&self) -> MoveState {
        self.state
    }

    // -----------------------------------------------------------------------
    // Agent
    // -----------------------------------------------------------------------

    /// Agent position, always a cell centre.
    pub fn position(&self) -> WorldPos {
        self.position
    }

    /// The cell the agent stands in.
    pub fn cell(&self) -> Point {
        self.grid.world_to_cell(self.position)
    }

    /// Teleport the agent, snapping to the cell centre. The movement state is
    /// left alone; the next tick plans from the new cell.
    pub fn set_position(&mut self, pos: WorldPos) {
        self.position = self.grid.cell_to_world(self.grid.world_to_cell(pos));
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Suspend or resume stepping. While disabled, ticks still fire on
    /// schedule but do nothing; all state is kept.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &MoverConfig {
        &self.config
    }

    /// Replace speed and search budget. Takes effect from the next tick.
    /// Rejected if any traversable tile's interval would be out of range at
    /// the new speed.
    pub fn set_config(&mut self, config: MoverConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.costs.validate(&self.allowed, config.speed)?;
        self.config = config;
        Ok(())
    }

    pub fn allowed_tiles(&self) -> &AllowedTiles {
        &self.allowed
    }

    /// Replace the traversable set. Every tile in it must be costed.
    pub fn set_allowed_tiles(&mut self, allowed: AllowedTiles) -> Result<(), ConfigError> {
        self.costs.validate(&allowed, self.config.speed)?;
        self.allowed = allowed;
        Ok(())
    }

    pub fn costs(&self) -> &TileCostTable {
        &self.costs
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// The wait before the next tick, as set by the last cell entered.
    pub fn time_between_steps(&self) -> Duration {
        self.time_between_steps
    }

    /// The path planned by the last tick that searched, empty if it failed.
    pub fn last_path(&self) -> &[Point] {
        &self.last_path
    }

    /// The problem met by the last tick that did work, if any.
    pub fn last_error(&self) -> Option<StepError> {
        self.last_error
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    /// Perform one step toward the target.
    pub fn tick(&mut self) -> StepOutcome {
        if !self.enabled {
            log::trace!("tick skipped: disabled");
            return StepOutcome::Skipped;
        }
        let Some(target) = self.target else {
            return StepOutcome::Skipped;
        };
        if self.state == MoveState::Idle {
            return StepOutcome::Skipped;
        }
        self.last_error = None;

        let start = self.cell();
        let bounds = self.grid.bounds();
        if self.finder.range() != bounds {
            self.finder.set_range(bounds);
        }
        let graph = TilemapGraph::new(&self.grid, &self.allowed);
        let planned =
            self.finder
                .find_path(&graph, start, target.cell, self.config.max_expansions);

        let path = match planned {
            Ok(path) => path,
            Err(err) => {
                log::debug!("no step from {start} toward {}: {err}", target.cell);
                self.last_path.clear();
                self.last_error = Some(StepError::Path(err));
                return StepOutcome::Stalled(err);
            }
        };
        log::debug!("shortest path = {}", display_path(&path));
        self.last_path = path;

        let Some(&next) = self.last_path.get(1) else {
            self.arrive();
            return StepOutcome::Arrived;
        };
        self.enter(next);
        let arrived = next == target.cell;
        if arrived {
            self.arrive();
        }
        StepOutcome::Moved {
            to: next,
            interval: self.time_between_steps,
            arrived,
        }
    }

    /// Let `dt` of wall-clock time pass, firing [`tick`](Self::tick) each
    /// time the current wait elapses.
    ///
    /// After each firing the timer is re-armed with the freshly computed
    /// [`time_between_steps`](Self::time_between_steps); a wait already in
    /// progress is never shortened or stretched.
    pub fn update(&mut self, dt: Duration) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        let mut dt = dt;
        while let Some(left) = self.timer.advance(dt) {
            outcomes.push(self.tick());
            self.timer.rearm(self.time_between_steps);
            dt = left;
        }
        outcomes
    }

    /// Time left before the next firing under [`update`](Self::update).
    pub fn until_next_tick(&self) -> Duration {
        self.timer.remaining()
    }

    /// Move onto `next` and derive the next wait from its tile. The tile is
    /// re-checked against the traversable set; if it no longer qualifies, or
    /// its interval cannot be represented, the wait is left unchanged.
    fn enter(&mut self, next: Point) {
        let tile = self.grid.tile_at(next);
        let interval = tile
            .filter(|&t| self.allowed.contains(t))
            .and_then(|t| self.costs.interval(t, self.config.speed));
        match interval {
            Some(interval) => self.time_between_steps = interval,
            None => {
                let err = StepError::InvalidTile { cell: next, tile };
                log::warn!(
                    "{err}; keeping step interval {:?}",
                    self.time_between_steps
                );
                self.last_error = Some(err);
            }
        }
        self.position = self.grid.cell_to_world(next);
    }

    fn arrive(&mut self) {
        if self.state != MoveState::Idle {
            log::info!("arrived at {}", self.cell());
        }
        self.state = MoveState::Idle;
    }
}

fn display_path(path: &[Point]) -> String {
    path.iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" , ")
}
