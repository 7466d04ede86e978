//! lifegrid - CLI entry point
//!
//! Headless runner and terminal viewer for the simulation engine.

use ca_formats::rle::Rle;
use clap::{Parser, Subcommand};
use lifegrid::stats::StatsHistory;
use lifegrid::{benchmark, catalog, Config, Life, LifeSnapshot, RulesetKey, SimulationHandle};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "lifegrid")]
#[command(version)]
#[command(about = "Configurable Game of Life simulation engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "lifegrid.yaml")]
        config: PathBuf,

        /// Number of generations to simulate
        #[arg(short, long, default_value = "200")]
        generations: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Ruleset key (see `lifegrid rules`)
        #[arg(short, long)]
        ruleset: Option<String>,

        /// Live-cell probability for the initial randomize (0.0 - 1.0)
        #[arg(short, long)]
        density: Option<f32>,

        /// RLE pattern file used instead of a random start
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Write the stats history (JSON) to this file
        #[arg(long)]
        stats_out: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Watch the simulation live in the terminal
    Watch {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "lifegrid.yaml")]
        config: PathBuf,

        /// Stop after this many generations
        #[arg(short, long, default_value = "200")]
        generations: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Ruleset key (see `lifegrid rules`)
        #[arg(short, long)]
        ruleset: Option<String>,

        /// Speed from 0 (slowest) to 100 (fastest)
        #[arg(short, long)]
        speed: Option<i32>,

        /// RLE pattern file used instead of a random start
        #[arg(short, long)]
        pattern: Option<PathBuf>,
    },

    /// List the ruleset catalog
    Rules,

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "lifegrid.yaml")]
        output: PathBuf,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of generations
        #[arg(short, long, default_value = "1000")]
        generations: u64,

        /// Grid rows
        #[arg(long, default_value = "100")]
        rows: usize,

        /// Grid columns
        #[arg(long, default_value = "100")]
        columns: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            generations,
            seed,
            ruleset,
            density,
            pattern,
            stats_out,
            quiet,
        } => run_simulation(
            config,
            generations,
            seed,
            ruleset,
            density,
            pattern,
            stats_out,
            quiet,
        ),

        Commands::Watch {
            config,
            generations,
            seed,
            ruleset,
            speed,
            pattern,
        } => watch_simulation(config, generations, seed, ruleset, speed, pattern),

        Commands::Rules => list_rules(),

        Commands::Init { output } => generate_config(output),

        Commands::Benchmark {
            generations,
            rows,
            columns,
        } => run_benchmark(generations, rows, columns),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_simulation(
    config_path: PathBuf,
    generations: u64,
    seed: Option<u64>,
    ruleset: Option<String>,
    density: Option<f32>,
    pattern: Option<PathBuf>,
    stats_out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(&config_path)?;
    if let Some(key) = ruleset {
        config.simulation.ruleset = key;
    }
    if let Some(d) = density {
        config.simulation.density = d;
    }
    config.validate()?;

    let mut life = if let Some(s) = seed {
        println!("Using seed: {}", s);
        Life::new_with_seed(&config, s)?
    } else {
        Life::new(&config)?
    };

    match &pattern {
        Some(path) => {
            let loaded = read_pattern(path)?;
            if let Some(key) = loaded.resolve_rule() {
                life.set_ruleset(key);
            }
            for (row, column) in centered(&loaded.cells, life.rows(), life.columns())? {
                life.toggle(row, column)?;
            }
            println!("Loaded pattern: {:?} ({} cells)", path, life.population());
        }
        None => life.randomize(),
    }

    println!("Starting simulation");
    println!("  Grid: {}x{}", config.grid.rows, config.grid.columns);
    println!("  Ruleset: {}", life.ruleset().display_name());
    println!("  Initial population: {}", life.population());
    println!("  Generations: {}", generations);
    println!();

    let mut history = StatsHistory::new(config.logging.stats_interval);

    let start = Instant::now();

    for _ in 0..generations {
        life.step();

        if history.due(life.generation()) {
            history.record(life.stats().clone());
            if !quiet {
                println!("{}", life.stats().summary());
            }
        }

        // Check for extinction
        if life.population() == 0 {
            println!("\nGrid died out at generation {}", life.generation());
            break;
        }
    }

    let elapsed = start.elapsed();
    let generations_per_sec = life.generation() as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Generations: {}", life.generation());
    println!("Speed: {:.1} generations/s", generations_per_sec);
    println!("Final population: {}", life.population());

    if !quiet {
        println!();
        println!("{}", life.grid());
    }

    if let Some(path) = stats_out {
        history.save(&path.to_string_lossy())?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn watch_simulation(
    config_path: PathBuf,
    generations: u64,
    seed: Option<u64>,
    ruleset: Option<String>,
    speed: Option<i32>,
    pattern: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&config_path)?;
    config.validate()?;

    let mut sim = if let Some(s) = seed {
        SimulationHandle::spawn_with_seed(config, s)?
    } else {
        SimulationHandle::spawn(config)?
    };

    if let Some(key) = ruleset {
        sim.set_ruleset(&key)?;
    }
    if let Some(s) = speed {
        sim.set_speed(s);
    }

    match &pattern {
        Some(path) => {
            let loaded = read_pattern(path)?;
            if let Some(key) = loaded.resolve_rule() {
                sim.set_ruleset(key.key())?;
            }
            for (row, column) in centered(&loaded.cells, sim.rows(), sim.columns())? {
                sim.toggle_cell(row, column)?;
            }
        }
        None => sim.randomize(),
    }

    sim.start();

    loop {
        let Some(snapshot) = sim.recv_snapshot_timeout(Duration::from_millis(250)) else {
            continue;
        };

        // Clear screen and repaint
        print!("\x1b[2J\x1b[H");
        println!(
            "lifegrid | {} | gen {:5} | pop {:5} | speed {:3}",
            snapshot.ruleset.display_name(),
            snapshot.generation,
            snapshot.population,
            sim.speed()
        );
        println!("{}", render(&snapshot));

        if snapshot.generation >= generations {
            break;
        }
    }

    sim.pause();
    sim.shutdown();
    println!("Stopped after {} generations", generations);

    Ok(())
}

fn list_rules() -> Result<(), Box<dyn std::error::Error>> {
    println!("Available rulesets:");
    for (key, name) in catalog() {
        let rules = key.rules();
        let survival = rules.survival_counts();
        println!("  {:12} {}", key.key(), name);
        if survival.is_empty() {
            println!(
                "  {:12} a cell is born with {} neighbors and never survives",
                "",
                describe_counts(&rules.birth_counts()),
            );
        } else {
            println!(
                "  {:12} a cell is born with {} neighbors and survives with {}",
                "",
                describe_counts(&rules.birth_counts()),
                describe_counts(&survival),
            );
        }
    }
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}

fn run_benchmark(
    generations: u64,
    rows: usize,
    columns: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== lifegrid Benchmark ===");
    println!("Grid: {}x{}", rows, columns);
    println!("Generations: {}", generations);
    println!();

    let result = benchmark(generations, rows, columns)?;
    println!("{}", result);

    Ok(())
}

/// Load a config file, falling back to defaults when it does not exist
fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        println!("Loading config from: {:?}", path);
        Ok(Config::from_file(path)?)
    } else {
        println!("Using default configuration");
        Ok(Config::default())
    }
}

/// Cells and declared rule of an RLE pattern file
struct Pattern {
    cells: Vec<(i64, i64)>,
    rule: Option<String>,
}

impl Pattern {
    /// Match the declared rulestring against the catalog. A rule that
    /// is not in the catalog is logged and ignored.
    fn resolve_rule(&self) -> Option<RulesetKey> {
        let rulestring = self.rule.as_deref()?;
        match RulesetKey::from_notation(rulestring) {
            Some(key) => Some(key),
            None => {
                log::warn!(
                    "Pattern rule {:?} is not in the catalog; keeping the active ruleset",
                    rulestring
                );
                None
            }
        }
    }
}

/// Read live-cell positions from an RLE pattern file
fn read_pattern(path: &Path) -> Result<Pattern, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let rle = Rle::new_from_file(file)?;

    let rule = rle
        .header_data()
        .and_then(|header| header.rule.as_deref())
        .map(str::to_owned);

    let mut cells = Vec::new();
    for cell in rle {
        cells.push(cell?.position);
    }

    Ok(Pattern { cells, rule })
}

/// Center pattern positions on a grid, as `(row, column)` pairs.
/// Patterns larger than the grid are rejected.
fn centered(
    cells: &[(i64, i64)],
    rows: usize,
    columns: usize,
) -> Result<Vec<(usize, usize)>, Box<dyn std::error::Error>> {
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let max_x = cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let max_y = cells.iter().map(|&(_, y)| y).max().unwrap_or(0);
    let width = (max_x - min_x + 1) as usize;
    let height = (max_y - min_y + 1) as usize;

    if height > rows || width > columns {
        return Err(format!(
            "Pattern is {}x{} but the grid is only {}x{}",
            height, width, rows, columns
        )
        .into());
    }

    let row_offset = (rows - height) / 2;
    let col_offset = (columns - width) / 2;

    Ok(cells
        .iter()
        .map(|&(x, y)| {
            (
                (y - min_y) as usize + row_offset,
                (x - min_x) as usize + col_offset,
            )
        })
        .collect())
}

/// ASCII rendering of a snapshot, 'O' for live cells and '.' for dead
fn render(snapshot: &LifeSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.columns + 1) * snapshot.rows);
    for row in 0..snapshot.rows {
        for column in 0..snapshot.columns {
            out.push(if snapshot.cell(row, column) { 'O' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// Human-readable neighbor counts, e.g. "2 or 3"
fn describe_counts(counts: &[u8]) -> String {
    match counts {
        [] => String::new(),
        [single] => single.to_string(),
        _ => {
            let mut parts: Vec<String> = counts.iter().map(|n| n.to_string()).collect();
            let last = parts.pop().unwrap_or_default();
            format!("{} or {}", parts.join(", "), last)
        }
    }
}
