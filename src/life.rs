//! The simulation engine.
//!
//! `Life` owns the current grid, the selected ruleset, the generation
//! counter and the random source behind `randomize`. It has no notion
//! of time: advancing is an explicit `step` call, and pacing those
//! calls is the scheduler's job.

use crate::config::Config;
use crate::error::LifeError;
use crate::grid::Grid;
use crate::rule::RulesetKey;
use crate::stats::Stats;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Simulation engine state
#[derive(Debug)]
pub struct Life {
    grid: Grid,
    ruleset: RulesetKey,
    generation: u64,
    stats: Stats,
    density: f32,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Life {
    /// Create an engine from a configuration, with every cell dead.
    pub fn new(config: &Config) -> Result<Self, LifeError> {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create an engine with a specific randomize seed for
    /// reproducible runs.
    pub fn new_with_seed(config: &Config, seed: u64) -> Result<Self, LifeError> {
        let grid = Grid::new(config.grid.rows, config.grid.columns)?;
        let ruleset = config.ruleset_key()?;
        Ok(Self {
            grid,
            ruleset,
            generation: 0,
            stats: Stats::new(),
            density: config.simulation.density,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ruleset(&self) -> RulesetKey {
        self.ruleset
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Seed of the random source, for reproducing a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flip one cell. The grid underneath is replaced, not mutated, so
    /// observers holding an earlier snapshot are unaffected.
    pub fn toggle(&mut self, row: usize, column: usize) -> Result<(), LifeError> {
        self.grid = self.grid.toggled(row, column)?;
        self.stats.population = self.grid.population();
        Ok(())
    }

    /// Kill every cell and restart the generation counter. Whether the
    /// clock keeps ticking is the scheduler's concern, not this one's.
    pub fn clear(&mut self) {
        self.grid = self.grid.cleared();
        self.generation = 0;
        self.stats = Stats::new();
    }

    /// Repopulate the grid with the configured density.
    pub fn randomize(&mut self) {
        self.randomize_with_density(self.density);
    }

    /// Repopulate the grid: each cell independently alive with
    /// probability `density` (clamped to `[0, 1]`).
    pub fn randomize_with_density(&mut self, density: f32) {
        self.grid = self.grid.randomized(&mut self.rng, density);
        self.generation = 0;
        self.stats = Stats::new();
        self.stats.population = self.grid.population();
    }

    /// Select the ruleset applied from the next generation on. The
    /// current grid is left exactly as it is.
    pub fn set_ruleset(&mut self, ruleset: RulesetKey) {
        self.ruleset = ruleset;
    }

    /// Advance one generation under the selected ruleset.
    pub fn step(&mut self) {
        let next = self.grid.step(self.ruleset.rules());
        self.generation += 1;
        self.stats.update(self.generation, &self.grid, &next);
        self.grid = next;
    }

    /// Advance `generations` generations.
    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }
}
