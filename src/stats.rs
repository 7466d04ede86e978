//! Statistics tracking for the simulation.

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Statistics snapshot for one generation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Generation the numbers refer to
    pub generation: u64,
    /// Live cells after the step
    pub population: usize,
    /// Cells that came alive in this step
    pub births: usize,
    /// Cells that died in this step
    pub deaths: usize,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the grid pair of one generation step
    pub fn update(&mut self, generation: u64, previous: &Grid, next: &Grid) {
        self.generation = generation;
        self.population = next.population();
        self.births = previous
            .cells()
            .iter()
            .zip(next.cells())
            .filter(|&(&before, &after)| !before && after)
            .count();
        self.deaths = previous
            .cells()
            .iter()
            .zip(next.cells())
            .filter(|&(&before, &after)| before && !after)
            .count();
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:6} | Pop:{:5} | Births:{:4} | Deaths:{:4}",
            self.generation, self.population, self.births, self.deaths
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in generations
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// True when a sample is due at `generation`
    pub fn due(&self, generation: u64) -> bool {
        self.interval > 0 && generation % self.interval == 0
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.population))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
