use log::debug;
use rand::prelude::*;

use crate::grid::{Grid, GridError};

/// Creates a random puzzle of the given size with `givens` pre-filled
/// cells. A complete rule-respecting grid is built first and then
/// blanked down to the requested givens, so the result always has at
/// least that grid as a solution.
pub fn create_random_puzzle(size: usize, givens: usize) -> Result<Grid, GridError> {
    let mut grid = Grid::new(size)?;
    let cells = size * size;
    if givens > cells {
        return Err(GridError::TooManyGivens {
            requested: givens,
            available: cells,
        });
    }

    let mut rng = rand::thread_rng();
    let filled = fill_from(&mut grid, 0, &mut rng);
    debug_assert!(filled, "backtracking over all candidate values fills any valid empty grid");
    debug!("generated a complete {}x{} grid", size, size);

    // Blank random cells until only the requested givens remain.
    let mut positions: Vec<usize> = (0..cells).collect();
    positions.shuffle(&mut rng);
    for &position in positions.iter().take(cells - givens) {
        grid.set_value(position / size, position % size, 0);
    }

    Ok(grid)
}

/// Fills the grid from `index` (row-major) onwards by trying candidate
/// values in random order and backtracking on dead ends.
fn fill_from(grid: &mut Grid, index: usize, rng: &mut ThreadRng) -> bool {
    let size = grid.size();
    if index == size * size {
        return true;
    }
    let (row, col) = (index / size, index % size);

    let mut candidates: Vec<usize> = (1..=size).collect();
    candidates.shuffle(rng);

    for value in candidates {
        if placement_allowed(grid, row, col, value) {
            grid.set_value(row, col, value);
            if fill_from(grid, index + 1, rng) {
                return true;
            }
            grid.set_value(row, col, 0);
        }
    }
    false
}

/// Checks the row, column and block of (row, col) for an existing copy
/// of `value`
fn placement_allowed(grid: &Grid, row: usize, col: usize, value: usize) -> bool {
    let size = grid.size();
    for other in 0..size {
        if grid.value(row, other) == value || grid.value(other, col) == value {
            return false;
        }
    }

    let side = grid.block_size();
    let top = row / side * side;
    let left = col / side * side;
    for block_row in top..top + side {
        for block_col in left..left + side {
            if grid.value(block_row, block_col) == value {
                return false;
            }
        }
    }
    true
}
