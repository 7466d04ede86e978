//! # lifegrid
//!
//! Configurable Game of Life engine with a pausable, speed-controlled
//! simulation thread.
//!
//! ## Features
//!
//! - **Rulesets**: closed catalog of birth/survival rules (Classic,
//!   High Life, Day & Night, Seeds), switchable while running
//! - **Immutable snapshots**: grids are replaced, never mutated, so a
//!   UI can keep a snapshot across generations without locks
//! - **Reproducible**: seeded random source behind randomize
//! - **Parallel**: the generation step leverages all cores via Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use lifegrid::{Config, Life};
//!
//! let mut config = Config::default();
//! config.grid.rows = 3;
//! config.grid.columns = 3;
//!
//! let mut life = Life::new_with_seed(&config, 42).unwrap();
//!
//! // Draw a horizontal blinker
//! life.toggle(1, 0).unwrap();
//! life.toggle(1, 1).unwrap();
//! life.toggle(1, 2).unwrap();
//!
//! life.step();
//! assert_eq!(life.generation(), 1);
//! assert_eq!(life.population(), 3); // now vertical
//! ```
//!
//! ## Driving it from a UI
//!
//! ```rust,no_run
//! use lifegrid::{Config, SimulationHandle};
//!
//! let mut sim = SimulationHandle::spawn(Config::default()).unwrap();
//! sim.randomize();
//! sim.set_speed(80);
//! sim.start();
//!
//! std::thread::sleep(std::time::Duration::from_secs(2));
//! if let Some(snapshot) = sim.try_recv_snapshot() {
//!     println!("gen {}: {} alive", snapshot.generation, snapshot.population);
//! }
//! sim.pause();
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod life;
pub mod rule;
pub mod scheduler;
pub mod shared;
pub mod stats;

// Re-export main types
pub use config::Config;
pub use error::LifeError;
pub use grid::Grid;
pub use life::Life;
pub use rule::{catalog, Ruleset, RulesetKey};
pub use scheduler::{Scheduler, SimState};
pub use shared::{LifeSnapshot, SimCommand, SimulationHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark on a randomized grid
pub fn benchmark(generations: u64, rows: usize, columns: usize) -> Result<BenchmarkResult, LifeError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.grid.rows = rows;
    config.grid.columns = columns;

    let mut life = Life::new(&config)?;
    life.randomize();
    let initial_population = life.population();

    let start = Instant::now();
    life.run(generations);
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        generations,
        rows,
        columns,
        initial_population,
        final_population: life.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u64,
    pub rows: usize,
    pub columns: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Grid: {}x{}", self.rows, self.columns)?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}
