//! Simulation thread that runs independently from the UI layer.
//!
//! The thread owns the engine and the scheduler. Every manual edit and
//! every timed tick is applied on this one thread, so an edit is atomic
//! with respect to tick boundaries and a published snapshot can never
//! show half an update.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::LifeError;
use crate::life::Life;
use crate::scheduler::{clamp_speed, Scheduler, SimState};

use super::commands::SimCommand;
use super::snapshot::LifeSnapshot;

/// Loop sleep while idle (~60fps command latency)
const IDLE_POLL: Duration = Duration::from_millis(16);
/// Loop sleep while running (tick granularity)
const RUN_POLL: Duration = Duration::from_millis(1);

/// Handle for controlling the simulation thread
pub struct SimulationHandle {
    /// Thread handle
    thread: Option<JoinHandle<()>>,
    /// Channel to send commands to the simulation
    command_tx: Sender<SimCommand>,
    /// Channel to receive snapshots from the simulation
    snapshot_rx: Receiver<LifeSnapshot>,
    /// Current state as seen from the UI side
    pub state: SimState,
    /// Current speed, clamped to 0-100
    speed: u8,
    /// Grid rows, fixed for the lifetime of the thread
    rows: usize,
    /// Grid columns, fixed for the lifetime of the thread
    columns: usize,
    /// Cell edge length in pixels, echoed into snapshots
    cell_size: u32,
}

impl SimulationHandle {
    /// Spawn a new simulation thread for `config`.
    ///
    /// Invalid dimensions or an unknown ruleset key surface here,
    /// before any thread exists.
    pub fn spawn(config: Config) -> Result<Self, LifeError> {
        let life = Life::new(&config)?;
        Ok(Self::spawn_with(life, &config))
    }

    /// Spawn with a fixed randomize seed for reproducible sessions.
    pub fn spawn_with_seed(config: Config, seed: u64) -> Result<Self, LifeError> {
        let life = Life::new_with_seed(&config, seed)?;
        Ok(Self::spawn_with(life, &config))
    }

    fn spawn_with(life: Life, config: &Config) -> Self {
        let speed = clamp_speed(i32::from(config.simulation.speed));
        let rows = life.rows();
        let columns = life.columns();
        let cell_size = config.grid.cell_size;

        let (command_tx, command_rx) = mpsc::channel();
        let (snapshot_tx, snapshot_rx) = mpsc::channel();

        let thread = thread::spawn(move || {
            run_simulation(life, speed, cell_size, command_rx, snapshot_tx);
        });

        Self {
            thread: Some(thread),
            command_tx,
            snapshot_rx,
            state: SimState::Idle,
            speed,
            rows,
            columns,
            cell_size,
        }
    }

    /// Flip one cell. Coordinates outside the grid are rejected here,
    /// synchronously, and nothing is sent.
    pub fn toggle_cell(&mut self, row: usize, column: usize) -> Result<(), LifeError> {
        if row >= self.rows || column >= self.columns {
            return Err(LifeError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        self.send(SimCommand::ToggleCell { row, column });
        Ok(())
    }

    /// Begin ticking from the current grid.
    pub fn start(&mut self) {
        self.send(SimCommand::Start);
    }

    /// Stop ticking. The grid keeps whatever state it has.
    pub fn pause(&mut self) {
        self.send(SimCommand::Pause);
    }

    /// Execute a single generation, typically while paused.
    pub fn step(&mut self) {
        self.send(SimCommand::Step);
    }

    /// Pause and clear the grid, keeping its dimensions.
    pub fn reset(&mut self) {
        self.send(SimCommand::Reset);
    }

    /// Repopulate the grid with the configured density.
    pub fn randomize(&mut self) {
        self.send(SimCommand::Randomize);
    }

    /// Change the tick cadence. Out-of-range speeds are clamped to
    /// `[0, 100]`, never rejected.
    pub fn set_speed(&mut self, speed: i32) {
        self.send(SimCommand::SetSpeed(clamp_speed(speed)));
    }

    /// Select a ruleset by catalog key. Unrecognized keys are rejected
    /// here, synchronously, and the active ruleset stays unchanged.
    pub fn set_ruleset(&mut self, key: &str) -> Result<(), LifeError> {
        let ruleset = key.parse()?;
        self.send(SimCommand::SetRuleset(ruleset));
        Ok(())
    }

    /// Send a command to the simulation
    pub fn send(&mut self, command: SimCommand) {
        match command {
            SimCommand::Start => self.state = SimState::Running,
            SimCommand::Pause | SimCommand::Reset => self.state = SimState::Idle,
            SimCommand::Shutdown => self.state = SimState::Stopped,
            SimCommand::SetSpeed(speed) => self.speed = speed,
            _ => {}
        }
        let _ = self.command_tx.send(command);
    }

    /// Try to receive the latest snapshot (non-blocking)
    pub fn try_recv_snapshot(&self) -> Option<LifeSnapshot> {
        let mut latest = None;
        // Drain all available snapshots, keep only the latest
        loop {
            match self.snapshot_rx.try_recv() {
                Ok(snapshot) => latest = Some(snapshot),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Wait for the next snapshot, up to `timeout`.
    pub fn recv_snapshot_timeout(&self, timeout: Duration) -> Option<LifeSnapshot> {
        match self.snapshot_rx.recv_timeout(timeout) {
            Ok(snapshot) => Some(snapshot),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Check if the simulation is running
    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Shutdown the simulation thread
    pub fn shutdown(&mut self) {
        self.send(SimCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Main simulation loop running in a separate thread
fn run_simulation(
    mut life: Life,
    speed: u8,
    cell_size: u32,
    command_rx: Receiver<SimCommand>,
    snapshot_tx: Sender<LifeSnapshot>,
) {
    let mut scheduler = Scheduler::new(i32::from(speed));

    // Send initial snapshot
    let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));

    loop {
        // Process commands (non-blocking)
        match command_rx.try_recv() {
            Ok(command) => match command {
                SimCommand::ToggleCell { row, column } => match life.toggle(row, column) {
                    Ok(()) => {
                        let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));
                    }
                    // The handle validates bounds before sending
                    Err(e) => log::warn!("Toggle rejected: {}", e),
                },
                SimCommand::Start => {
                    scheduler.start(Instant::now());
                    log::debug!("Simulation started at speed {}", scheduler.speed());
                }
                SimCommand::Pause => {
                    scheduler.pause();
                    log::debug!("Simulation paused at generation {}", life.generation());
                }
                SimCommand::Step => {
                    life.step();
                    let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));
                }
                SimCommand::SetSpeed(speed) => {
                    scheduler.set_speed(i32::from(speed));
                    log::debug!(
                        "Speed set to {} (interval {:?})",
                        scheduler.speed(),
                        scheduler.interval()
                    );
                }
                SimCommand::SetRuleset(ruleset) => {
                    life.set_ruleset(ruleset);
                    log::info!("Ruleset changed to {}", ruleset.display_name());
                }
                SimCommand::Randomize => {
                    life.randomize();
                    log::debug!("Grid randomized: population={}", life.population());
                    let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));
                }
                SimCommand::Reset => {
                    scheduler.pause();
                    life.clear();
                    log::info!("Simulation reset: {}x{} grid cleared", life.rows(), life.columns());
                    let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));
                }
                SimCommand::Shutdown => {
                    log::debug!("Simulation thread shutting down at generation {}", life.generation());
                    return;
                }
            },
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                return;
            }
        }

        // Timed generation step
        if scheduler.poll(Instant::now()) {
            life.step();
            let _ = snapshot_tx.send(LifeSnapshot::from_life(&life, cell_size));
        }

        // Small sleep to avoid busy-waiting
        if scheduler.is_running() {
            thread::sleep(RUN_POLL);
        } else {
            thread::sleep(IDLE_POLL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(rows: usize, columns: usize) -> Config {
        let mut config = Config::default();
        config.grid.rows = rows;
        config.grid.columns = columns;
        config
    }

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_spawn_sends_initial_snapshot() {
        let mut sim = SimulationHandle::spawn(test_config(5, 7)).unwrap();
        let snapshot = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert_eq!(snapshot.rows, 5);
        assert_eq!(snapshot.columns, 7);
        assert_eq!(snapshot.generation, 0);
        assert_eq!(snapshot.population, 0);
        assert_eq!(sim.rows(), 5);
        assert_eq!(sim.columns(), 7);
        assert!(!sim.is_running());
        sim.shutdown();
    }

    #[test]
    fn test_spawn_rejects_invalid_config() {
        assert!(matches!(
            SimulationHandle::spawn(test_config(0, 7)),
            Err(LifeError::InvalidDimensions { .. })
        ));

        let mut config = test_config(5, 5);
        config.simulation.ruleset = "nope".to_string();
        assert!(matches!(
            SimulationHandle::spawn(config),
            Err(LifeError::UnknownRuleset(_))
        ));
    }

    #[test]
    fn test_toggle_cell_publishes_snapshot() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        let _ = sim.recv_snapshot_timeout(WAIT).unwrap(); // initial

        sim.toggle_cell(2, 3).unwrap();
        let snapshot = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert!(snapshot.cell(2, 3));
        assert_eq!(snapshot.population, 1);
        sim.shutdown();
    }

    #[test]
    fn test_toggle_cell_out_of_bounds_is_synchronous() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        let err = sim.toggle_cell(5, 0).unwrap_err();
        assert_eq!(
            err,
            LifeError::OutOfBounds {
                row: 5,
                column: 0,
                rows: 5,
                columns: 5
            }
        );
        assert!(sim.toggle_cell(0, 5).is_err());
        sim.shutdown();
    }

    #[test]
    fn test_set_ruleset_validates_key() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        assert_eq!(
            sim.set_ruleset("toroidal").unwrap_err(),
            LifeError::UnknownRuleset("toroidal".to_string())
        );
        assert!(sim.set_ruleset("highLife").is_ok());
        sim.shutdown();
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        sim.set_speed(250);
        assert_eq!(sim.speed(), 100);
        sim.set_speed(-40);
        assert_eq!(sim.speed(), 0);
        sim.shutdown();
    }

    #[test]
    fn test_start_ticks_and_pause_stops() {
        let mut config = test_config(16, 16);
        config.simulation.speed = 100; // 100ms interval
        let mut sim = SimulationHandle::spawn_with_seed(config, 42).unwrap();

        sim.randomize();
        sim.start();
        assert!(sim.is_running());
        assert_eq!(sim.state, SimState::Running);

        // A generation must arrive within the deadline
        let deadline = Instant::now() + WAIT;
        let mut ticked = false;
        while Instant::now() < deadline {
            if let Some(snapshot) = sim.recv_snapshot_timeout(Duration::from_millis(200)) {
                if snapshot.generation >= 1 {
                    ticked = true;
                    break;
                }
            }
        }
        assert!(ticked, "no generation was computed while running");

        sim.pause();
        assert!(!sim.is_running());
        sim.shutdown();
        assert_eq!(sim.state, SimState::Stopped);
    }

    #[test]
    fn test_step_advances_exactly_one_generation() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        let _ = sim.recv_snapshot_timeout(WAIT).unwrap(); // initial

        // Horizontal blinker across the middle
        sim.toggle_cell(2, 1).unwrap();
        sim.toggle_cell(2, 2).unwrap();
        sim.toggle_cell(2, 3).unwrap();
        for _ in 0..3 {
            let _ = sim.recv_snapshot_timeout(WAIT).unwrap();
        }

        sim.step();
        let snapshot = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert_eq!(snapshot.generation, 1);
        // Vertical now
        assert!(snapshot.cell(1, 2));
        assert!(snapshot.cell(2, 2));
        assert!(snapshot.cell(3, 2));
        assert!(!snapshot.cell(2, 1));
        sim.shutdown();
    }

    #[test]
    fn test_reset_pauses_and_clears() {
        let mut sim = SimulationHandle::spawn(test_config(6, 6)).unwrap();
        let _ = sim.recv_snapshot_timeout(WAIT).unwrap(); // initial

        sim.toggle_cell(1, 1).unwrap();
        let after_toggle = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert_eq!(after_toggle.population, 1);

        sim.reset();
        assert_eq!(sim.state, SimState::Idle);
        let after_reset = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert_eq!(after_reset.population, 0);
        assert_eq!(after_reset.generation, 0);
        assert_eq!(after_reset.rows, 6);
        assert_eq!(after_reset.columns, 6);
        sim.shutdown();
    }

    #[test]
    fn test_snapshots_are_isolated_from_later_edits() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        let _ = sim.recv_snapshot_timeout(WAIT).unwrap(); // initial

        sim.toggle_cell(0, 0).unwrap();
        let first = sim.recv_snapshot_timeout(WAIT).unwrap();
        assert_eq!(first.population, 1);

        sim.toggle_cell(4, 4).unwrap();
        let second = sim.recv_snapshot_timeout(WAIT).unwrap();

        // The first snapshot is untouched by the second edit
        assert_eq!(first.population, 1);
        assert!(!first.cell(4, 4));
        assert_eq!(second.population, 2);
        sim.shutdown();
    }

    #[test]
    fn test_try_recv_snapshot_keeps_latest() {
        let mut sim = SimulationHandle::spawn(test_config(5, 5)).unwrap();
        sim.toggle_cell(0, 0).unwrap();
        sim.toggle_cell(0, 1).unwrap();
        sim.toggle_cell(0, 2).unwrap();

        // Give the thread time to process all three edits
        let deadline = Instant::now() + WAIT;
        let mut latest = None;
        while Instant::now() < deadline {
            if let Some(snapshot) = sim.try_recv_snapshot() {
                latest = Some(snapshot);
            }
            if latest.as_ref().map(|s| s.population) == Some(3) {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(latest.unwrap().population, 3);
        sim.shutdown();
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let mut sim = SimulationHandle::spawn(test_config(4, 4)).unwrap();
        sim.shutdown();
        assert_eq!(sim.state, SimState::Stopped);
        // Second shutdown (and the Drop that follows) must not hang
        sim.shutdown();
    }
}
