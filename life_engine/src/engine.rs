// engine.rs - Double-buffered simulation of one rule on a torus

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::grid::{ALIVE_MIDPOINT, Grid};
use crate::patterns::Pattern;
use crate::rows::{self, CancelToken, TickStatus};
use crate::rule::Rule;

/// Owns the current and next generation, the rule and the random source.
///
/// Every tick reads only the current buffer, writes every cell of the next
/// one, then swaps them.
pub struct Engine {
    config: EngineConfig,
    rule: Arc<Rule>,
    current: Arc<Grid>,
    next: Grid,
    generation: u64,
    rng: SmallRng,
}

impl Engine {
    /// Builds an engine seeded from `config.rng_seed`, or from entropy when
    /// no seed is set, and randomizes it.
    pub fn new(width: usize, height: usize, config: EngineConfig) -> Result<Self, EngineError> {
        let seed = config.rng_seed.unwrap_or_else(rand::random);
        Self::with_rng(width, height, config, SmallRng::seed_from_u64(seed))
    }

    /// Builds an engine drawing from the supplied random source.
    pub fn with_rng(
        width: usize,
        height: usize,
        config: EngineConfig,
        rng: SmallRng,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        config.seeding.validate()?;
        let rule = Rule::from_config(&config.rule)?;

        for (role, (radius_x, radius_y)) in rule.reach() {
            if 2 * radius_x >= width || 2 * radius_y >= height {
                return Err(EngineError::KernelTooLarge { role, radius_x, radius_y, width, height });
            }
        }

        let mut engine = Self {
            config,
            rule: Arc::new(rule),
            current: Arc::new(Grid::new(width, height)),
            next: Grid::new(width, height),
            generation: 0,
            rng,
        };
        engine.randomize();

        info!(width, height, rule = ?engine.config.rule, "engine ready");
        Ok(engine)
    }

    /// Refills the current generation per the configured seeding and resets
    /// the generation counter.
    pub fn randomize(&mut self) {
        let grid = Arc::make_mut(&mut self.current);
        self.config.seeding.apply(grid, &mut self.rng);
        self.generation = 0;
        debug!(seeding = ?self.config.seeding, "randomized");
    }

    /// Advances one generation on the calling thread.
    pub fn tick(&mut self) {
        let width = self.next.width();
        let current = &*self.current;
        for (y, row) in self.next.cells_mut().chunks_mut(width).enumerate() {
            self.rule.fill_row(current, y, row);
        }
        self.commit();
    }

    /// Advances one generation with one tokio task per row.
    ///
    /// `cancel` is checked at row boundaries. A cancelled tick leaves the
    /// grid and the generation counter untouched.
    pub fn tick_rows(&mut self, runtime: &Runtime, cancel: &CancelToken) -> Result<TickStatus, EngineError> {
        let Some(rows) = rows::compute_rows(runtime, &self.rule, &self.current, cancel)? else {
            debug!(generation = self.generation, "tick cancelled");
            return Ok(TickStatus::Cancelled);
        };

        let width = self.next.width();
        let cells = self.next.cells_mut();
        for (y, row) in rows {
            cells[y * width..(y + 1) * width].copy_from_slice(&row);
        }
        self.commit();
        Ok(TickStatus::Committed { generation: self.generation })
    }

    fn commit(&mut self) {
        std::mem::swap(Arc::make_mut(&mut self.current), &mut self.next);
        self.generation += 1;
    }

    /// Read-only view of the current generation.
    pub fn sample(&self) -> &Grid {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn width(&self) -> usize {
        self.current.width()
    }

    pub fn height(&self) -> usize {
        self.current.height()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn set_cell(&mut self, x: usize, y: usize, value: f32) {
        Arc::make_mut(&mut self.current).set(x, y, value);
    }

    /// Flips a cell between fully dead and fully alive.
    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        let alive = self.current.get(x, y) > ALIVE_MIDPOINT;
        self.set_cell(x, y, if alive { 0.0 } else { 1.0 });
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) {
        Arc::make_mut(&mut self.current).fill(0.0);
        self.generation = 0;
    }

    /// Clears the grid and draws `pattern` with its top-left at column `x`,
    /// row `y`, wrapping around the edges.
    pub fn stamp(&mut self, pattern: &Pattern, x: usize, y: usize) {
        self.clear();
        let (w, h) = (self.width(), self.height());
        let grid = Arc::make_mut(&mut self.current);
        for &(row, col) in pattern.cells {
            grid.set((x + col) % w, (y + row) % h, 1.0);
        }
        debug!(pattern = pattern.name, x, y, "stamped");
    }

    pub fn fingerprint(&self) -> u64 {
        self.current.fingerprint()
    }

    /// Sum of aliveness over the grid.
    pub fn population(&self) -> f32 {
        self.current.population()
    }
}
