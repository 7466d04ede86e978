//! Configuration system for the simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::error::LifeError;
use crate::rule::RulesetKey;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

/// Grid geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Cell edge length in pixels. A rendering hint: the core never
    /// reads it and republishes it unchanged to observers.
    pub cell_size: u32,
}

/// Simulation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Catalog key of the initial ruleset
    pub ruleset: String,
    /// Initial speed: 0 is slowest (1 generation/s), 100 is fastest
    pub speed: u8,
    /// Probability that randomize makes a cell alive (0.0 - 1.0)
    pub density: f32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats logging
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            simulation: SimulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            columns: 50,
            cell_size: 20,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ruleset: "classic".to_string(),
            speed: 50,
            density: 0.3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// Speed and density are not checked here: both are clamped into
    /// range wherever they are used.
    pub fn validate(&self) -> Result<(), LifeError> {
        if self.grid.rows == 0 || self.grid.columns == 0 {
            return Err(LifeError::InvalidDimensions {
                rows: self.grid.rows,
                columns: self.grid.columns,
            });
        }
        self.simulation.ruleset.parse::<RulesetKey>()?;
        Ok(())
    }

    /// Catalog entry selected by the configuration
    pub fn ruleset_key(&self) -> Result<RulesetKey, LifeError> {
        self.simulation.ruleset.parse()
    }
}
