//! Error types for the simulation core.

use std::fmt;

/// Errors raised by the simulation core.
///
/// Every variant is a precondition violation reported synchronously at
/// the call that caused it. None of them leave the engine in a partial
/// state: a failed call changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    /// Grid construction with a zero dimension
    InvalidDimensions { rows: usize, columns: usize },
    /// Cell coordinates outside the grid
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// Ruleset key not present in the catalog
    UnknownRuleset(String),
}

impl fmt::Display for LifeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, columns } => {
                write!(
                    f,
                    "Invalid grid dimensions {}x{}: both must be at least 1",
                    rows, columns
                )
            }
            Self::OutOfBounds {
                row,
                column,
                rows,
                columns,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is outside the {}x{} grid",
                    row, column, rows, columns
                )
            }
            Self::UnknownRuleset(key) => write!(f, "Unknown ruleset key: {:?}", key),
        }
    }
}

impl std::error::Error for LifeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LifeError::InvalidDimensions {
            rows: 0,
            columns: 50,
        };
        assert_eq!(
            err.to_string(),
            "Invalid grid dimensions 0x50: both must be at least 1"
        );

        let err = LifeError::OutOfBounds {
            row: 30,
            column: 2,
            rows: 30,
            columns: 50,
        };
        assert_eq!(err.to_string(), "Cell (30, 2) is outside the 30x50 grid");

        let err = LifeError::UnknownRuleset("toroidal".to_string());
        assert_eq!(err.to_string(), "Unknown ruleset key: \"toroidal\"");
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(
            LifeError::UnknownRuleset("x".to_string()),
            LifeError::UnknownRuleset("x".to_string())
        );
        assert_ne!(
            LifeError::InvalidDimensions {
                rows: 0,
                columns: 1
            },
            LifeError::InvalidDimensions {
                rows: 1,
                columns: 0
            }
        );
    }
}
