use itertools::Itertools;
use log::debug;

use solver::{Formula, Literal, SATSolution, Solver, VarId};

use crate::grid::{Cell, Grid};

/// One proposition of the SAT encoding: "cell (row, col) holds value",
/// possibly negated.
///
/// For a grid of size n the literal magnitude is `(n·row + col)·n + value`
/// with value in 1..=n, which maps every proposition to a distinct
/// variable and is exactly invertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellValue {
    pub row: usize,
    pub col: usize,
    pub value: usize,
    pub negated: bool,
}

impl CellValue {
    /// The proposition "cell (row, col) holds value"
    pub fn holds(row: usize, col: usize, value: usize) -> CellValue {
        CellValue {
            row,
            col,
            value,
            negated: false,
        }
    }

    /// The proposition "cell (row, col) does not hold value"
    pub fn excluded(row: usize, col: usize, value: usize) -> CellValue {
        CellValue {
            row,
            col,
            value,
            negated: true,
        }
    }

    /// Encodes the proposition as a literal of the formula for a grid of
    /// the given size
    pub fn to_literal(self, size: usize) -> Literal {
        let magnitude = ((size * self.row + self.col) * size + self.value) as VarId;
        if self.negated {
            Literal::neg(magnitude)
        } else {
            Literal::pos(magnitude)
        }
    }

    /// Decodes a literal back into its proposition; the exact inverse of
    /// [`CellValue::to_literal`]
    pub fn from_literal(literal: Literal, size: usize) -> CellValue {
        let magnitude = literal.var() as usize;

        // value lives in 1..=n, so a residue of 0 is value n in the
        // previous cell index
        let mut value = magnitude % size;
        let mut index = magnitude / size;
        if value == 0 {
            value = size;
            index -= 1;
        }

        CellValue {
            row: index / size,
            col: index % size,
            value,
            negated: !literal.is_positive(),
        }
    }
}

/// The cells of row `row`, left to right
pub fn row_cells(grid: &Grid, row: usize) -> Vec<Cell> {
    (0..grid.size()).map(|col| (row, col)).collect()
}

/// The cells of column `col`, top to bottom
pub fn column_cells(grid: &Grid, col: usize) -> Vec<Cell> {
    (0..grid.size()).map(|row| (row, col)).collect()
}

/// The cells of block `block`, row-major. Blocks are the √n×√n sub-grids
/// numbered row-major, so block b starts at row `(b / √n)·√n` and column
/// `(b % √n)·√n`.
pub fn block_cells(grid: &Grid, block: usize) -> Vec<Cell> {
    let side = grid.block_size();
    let top = block / side * side;
    let left = block % side * side;

    (0..side)
        .cartesian_product(0..side)
        .map(|(row, col)| (top + row, left + col))
        .collect()
}

/// One unit clause per given, pinning the pre-filled cells
fn add_given_clauses(formula: &mut Formula, grid: &Grid) {
    let size = grid.size();
    for (row, col, value) in grid.givens() {
        formula.add_clause(vec![CellValue::holds(row, col, value).to_literal(size)]);
    }
}

/// Every cell holds at least one value
fn add_cell_completeness(formula: &mut Formula, grid: &Grid) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            formula.add_clause(
                (1..=size).map(|value| CellValue::holds(row, col, value).to_literal(size)),
            );
        }
    }
}

/// Every cell holds at most one value: for every unordered pair of
/// distinct values, at least one of them is excluded
fn add_cell_uniqueness(formula: &mut Formula, grid: &Grid) {
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            for (first, second) in (1..=size).tuple_combinations() {
                formula.add_clause(vec![
                    CellValue::excluded(row, col, first).to_literal(size),
                    CellValue::excluded(row, col, second).to_literal(size),
                ]);
            }
        }
    }
}

/// Every value appears somewhere in the group
fn add_group_completeness(formula: &mut Formula, grid: &Grid, cells: &[Cell]) {
    let size = grid.size();
    for value in 1..=size {
        formula.add_clause(
            cells
                .iter()
                .map(|&(row, col)| CellValue::holds(row, col, value).to_literal(size)),
        );
    }
}

/// No value appears twice in the group: for every unordered pair of
/// distinct cells, at least one of them excludes the value
fn add_group_uniqueness(formula: &mut Formula, grid: &Grid, cells: &[Cell]) {
    let size = grid.size();
    for (&(row1, col1), &(row2, col2)) in cells.iter().tuple_combinations() {
        for value in 1..=size {
            formula.add_clause(vec![
                CellValue::excluded(row1, col1, value).to_literal(size),
                CellValue::excluded(row2, col2, value).to_literal(size),
            ]);
        }
    }
}

/// Reduces the sudoku completion problem for `grid` to a CNF formula:
/// the formula is satisfiable exactly when the grid has a solution, and
/// a witness decodes into one via [`solve_grid`].
pub fn grid_to_formula(grid: &Grid) -> Formula {
    let mut formula = Formula::new();
    let size = grid.size();

    add_given_clauses(&mut formula, grid);

    // every cell holds exactly one value
    add_cell_completeness(&mut formula, grid);
    add_cell_uniqueness(&mut formula, grid);

    // every row, column and block contains every value exactly once
    for index in 0..size {
        for cells in &[
            row_cells(grid, index),
            column_cells(grid, index),
            block_cells(grid, index),
        ] {
            add_group_completeness(&mut formula, grid, cells);
            add_group_uniqueness(&mut formula, grid, cells);
        }
    }

    debug!(
        "encoded {}x{} grid with {} givens into {} clauses over {} variables",
        size,
        size,
        grid.givens().count(),
        formula.len(),
        formula.num_variables(),
    );
    formula
}

/// Solves the puzzle: encodes the grid, runs the solver and decodes the
/// witness back into a filled copy of the grid. `None` means the puzzle
/// has no solution (or the solver gave up).
pub fn solve_grid(grid: &Grid, solver: &impl Solver) -> Option<Grid> {
    let formula = grid_to_formula(grid);

    match solver.solve(&formula) {
        SATSolution::Satisfiable(valuation) => {
            let mut solved = grid.clone();
            for literal in valuation {
                let proposition = CellValue::from_literal(literal, grid.size());
                if !proposition.negated {
                    solved
                        .set(proposition.row, proposition.col, proposition.value)
                        .expect("witness literals decode to cells of the encoded grid");
                }
            }
            Some(solved)
        }
        SATSolution::Unsatisfiable | SATSolution::Unknown => None,
    }
}
