//! Commands for controlling the simulation from a UI layer.

use crate::rule::RulesetKey;

/// Commands sent from the UI layer to the simulation thread.
///
/// Everything that can fail is validated before the command is sent:
/// coordinates against the fixed dimensions, ruleset keys against the
/// catalog, speeds clamped into range. A command that reaches the
/// thread always applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimCommand {
    /// Flip one cell
    ToggleCell { row: usize, column: usize },
    /// Begin ticking from the current grid
    Start,
    /// Stop ticking, keeping the grid as it is
    Pause,
    /// Execute a single generation
    Step,
    /// Change the tick cadence (already clamped to 0-100)
    SetSpeed(u8),
    /// Select the ruleset for subsequent generations
    SetRuleset(RulesetKey),
    /// Repopulate the grid with the configured density
    Randomize,
    /// Pause and clear the grid, keeping its dimensions
    Reset,
    /// Shutdown the simulation thread
    Shutdown,
}
