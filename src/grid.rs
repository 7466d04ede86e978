//! Fixed-size two-dimensional cell grid and the generation transform.
//!
//! `Grid` behaves as an immutable value: every mutation-shaped
//! operation (`toggled`, `cleared`, `randomized`, `step`) returns a
//! fresh grid and leaves the receiver untouched. Published snapshots
//! therefore stay valid no matter how far the simulation moves on.
//!
//! The boundary is hard: positions outside the grid read as dead and
//! never wrap around.

use crate::error::LifeError;
use crate::rule::Ruleset;
use rand::Rng;
use rayon::prelude::*;
use std::fmt;

/// Row-major boolean cell field with fixed dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid. Both dimensions must be at least 1.
    pub fn new(rows: usize, columns: usize) -> Result<Self, LifeError> {
        if rows == 0 || columns == 0 {
            return Err(LifeError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Flattened row-major cell buffer, `rows * columns` long.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Cell state at `(row, column)`; out-of-range positions read as dead.
    #[inline]
    pub fn get(&self, row: usize, column: usize) -> bool {
        if row < self.rows && column < self.columns {
            self.cells[row * self.columns + column]
        } else {
            false
        }
    }

    fn check_bounds(&self, row: usize, column: usize) -> Result<(), LifeError> {
        if row < self.rows && column < self.columns {
            Ok(())
        } else {
            Err(LifeError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Copy of this grid with the cell at `(row, column)` flipped.
    pub fn toggled(&self, row: usize, column: usize) -> Result<Self, LifeError> {
        self.check_bounds(row, column)?;
        let mut next = self.clone();
        let index = row * self.columns + column;
        next.cells[index] = !next.cells[index];
        Ok(next)
    }

    /// All-dead copy with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: vec![false; self.cells.len()],
        }
    }

    /// Copy where each cell is independently alive with probability
    /// `density`. Densities outside `[0, 1]` are clamped.
    pub fn randomized<R: Rng>(&self, rng: &mut R, density: f32) -> Self {
        let density = density.clamp(0.0, 1.0);
        let cells = (0..self.cells.len())
            .map(|_| rng.gen::<f32>() < density)
            .collect();
        Self {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }

    /// Live cells among the 8 Moore neighbors of `(row, column)`.
    /// Neighbors beyond the boundary count as dead.
    #[inline]
    pub fn live_neighbors(&self, row: usize, column: usize) -> u8 {
        let mut count = 0;
        for row_offset in -1isize..=1 {
            for col_offset in -1isize..=1 {
                if row_offset == 0 && col_offset == 0 {
                    continue;
                }
                let r = row as isize + row_offset;
                let c = column as isize + col_offset;
                if r >= 0
                    && r < self.rows as isize
                    && c >= 0
                    && c < self.columns as isize
                    && self.cells[r as usize * self.columns + c as usize]
                {
                    count += 1;
                }
            }
        }
        count
    }

    /// Compute the next generation under `rules`.
    ///
    /// Reads only from `self` and writes only into a fresh grid, so
    /// every cell sees the same input generation. Updating in place
    /// would let early writes leak into later neighbor counts and break
    /// oscillators like the blinker.
    pub fn step(&self, rules: &Ruleset) -> Self {
        let cells: Vec<bool> = (0..self.rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..self.columns).map(move |column| {
                    rules.next_state(self.get(row, column), self.live_neighbors(row, column))
                })
            })
            .collect();
        Self {
            rows: self.rows,
            columns: self.columns,
            cells,
        }
    }

    /// Coordinates of all live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(index, _)| (index / self.columns, index % self.columns))
    }
}

/// One text row per grid row, `'O'` for live cells and `'.'` for dead.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            for column in 0..self.columns {
                f.write_str(if self.get(row, column) { "O" } else { "." })?;
            }
        }
        Ok(())
    }
}
