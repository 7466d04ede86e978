//! Snapshot types published to UI layers.
//!
//! A snapshot is a flat, immutable copy of one simulation state. Once
//! published it never changes, so a UI can hold one across any number
//! of later generations without locks and without seeing tearing.

use crate::life::Life;
use crate::rule::RulesetKey;
use crate::stats::Stats;

/// Immutable view of the simulation at one generation
#[derive(Debug, Clone)]
pub struct LifeSnapshot {
    /// Generation this snapshot belongs to
    pub generation: u64,
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub columns: usize,
    /// Flattened cell states, row-major, `rows * columns` long
    pub cells: Vec<bool>,
    /// Number of live cells
    pub population: usize,
    /// Ruleset in effect for the next generation
    pub ruleset: RulesetKey,
    /// Stats of the step that produced this generation
    pub stats: Stats,
    /// Cell edge length in pixels, echoed from the configuration
    pub cell_size: u32,
}

impl LifeSnapshot {
    /// Copy the current state out of the engine
    pub fn from_life(life: &Life, cell_size: u32) -> Self {
        let grid = life.grid();
        Self {
            generation: life.generation(),
            rows: grid.rows(),
            columns: grid.columns(),
            cells: grid.cells().to_vec(),
            population: grid.population(),
            ruleset: life.ruleset(),
            stats: life.stats().clone(),
            cell_size,
        }
    }

    /// Cell state at `(row, column)`; out-of-range positions read as dead.
    pub fn cell(&self, row: usize, column: usize) -> bool {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column]
        } else {
            false
        }
    }
}
