/// The sudoku grid representation, parsing and rendering
pub mod grid;
/// Random creation of solvable puzzles
pub mod puzzle_creation;
/// The reduction of sudoku puzzles to boolean satisfiability
pub mod sat_conversion;

pub use grid::{Grid, GridError};
pub use puzzle_creation::create_random_puzzle;
pub use sat_conversion::{grid_to_formula, solve_grid, CellValue};
