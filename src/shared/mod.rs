//! Shared types for the UI-to-simulation boundary.
//!
//! This module contains the command set, the snapshot type and the
//! thread handle that any front end (terminal, GUI, web) uses to drive
//! the simulation.

pub mod commands;
pub mod sim_thread;
pub mod snapshot;

pub use commands::SimCommand;
pub use sim_thread::SimulationHandle;
pub use snapshot::LifeSnapshot;
