use proptest::prelude::*;

use solver::{check_valuation, DpllSolver, SATSolution, Solver};
use sudoku::sat_conversion::grid_to_formula;
use sudoku::{solve_grid, CellValue, Grid};

fn encode_decode_identity(size: usize) {
    for row in 0..size {
        for col in 0..size {
            for value in 1..=size {
                for &negated in &[false, true] {
                    let proposition = CellValue {
                        row,
                        col,
                        value,
                        negated,
                    };
                    let literal = proposition.to_literal(size);
                    assert_eq!(CellValue::from_literal(literal, size), proposition);
                }
            }
        }
    }
}

#[test]
fn encode_then_decode_is_the_identity_for_4x4() {
    encode_decode_identity(4);
}

#[test]
fn encode_then_decode_is_the_identity_for_9x9() {
    encode_decode_identity(9);
}

#[test]
fn distinct_propositions_encode_to_distinct_variables() {
    let size = 4;
    let mut seen = std::collections::HashSet::new();
    for row in 0..size {
        for col in 0..size {
            for value in 1..=size {
                let literal = CellValue::holds(row, col, value).to_literal(size);
                assert!(seen.insert(literal.var()));
            }
        }
    }
}

#[test]
fn givens_become_unit_clauses() {
    let mut grid = Grid::new(4).unwrap();
    grid.set(2, 1, 3).unwrap();
    let formula = grid_to_formula(&grid);

    let literal = CellValue::holds(2, 1, 3).to_literal(4);
    let unit_clauses: Vec<_> = formula
        .clauses()
        .filter(|(_, clause)| clause.is_unit())
        .collect();
    assert_eq!(unit_clauses.len(), 1);
    assert!(unit_clauses[0].1.contains(literal));
}

/// A solved grid must fill every cell and respect every row, column and
/// block constraint.
fn assert_solution(puzzle: &Grid, solved: &Grid) {
    let size = puzzle.size();
    for row in 0..size {
        for col in 0..size {
            let value = solved.value(row, col);
            assert!(value >= 1 && value <= size);
        }
    }
    assert!(solved.is_consistent());

    // givens survive solving
    for (row, col, value) in puzzle.givens() {
        assert_eq!(solved.value(row, col), value);
    }
}

#[test]
fn a_4x4_puzzle_with_one_given_is_solvable() {
    let mut puzzle = Grid::new(4).unwrap();
    puzzle.set(0, 0, 1).unwrap();

    let solved = solve_grid(&puzzle, &DpllSolver).expect("puzzle is solvable");
    assert_eq!(solved.value(0, 0), 1);
    assert_solution(&puzzle, &solved);
}

#[test]
fn the_witness_satisfies_every_encoded_clause() {
    let mut puzzle = Grid::new(4).unwrap();
    puzzle.set(0, 0, 1).unwrap();
    let formula = grid_to_formula(&puzzle);

    match DpllSolver.solve(&formula) {
        SATSolution::Satisfiable(valuation) => {
            assert!(check_valuation(&formula, &valuation));
        }
        other => panic!("expected satisfiable, got {}", other),
    }
}

#[test]
fn conflicting_givens_in_a_row_are_unsolvable() {
    let mut puzzle = Grid::new(4).unwrap();
    puzzle.set(0, 0, 2).unwrap();
    puzzle.set(0, 3, 2).unwrap();

    assert!(solve_grid(&puzzle, &DpllSolver).is_none());
}

#[test]
fn a_cell_forced_to_two_values_is_unsatisfiable() {
    // the same cell pinned to two different values contradicts the
    // cell uniqueness clauses
    let puzzle = Grid::new(4).unwrap();
    let mut formula = grid_to_formula(&puzzle);
    formula.add_clause(vec![CellValue::holds(1, 1, 1).to_literal(4)]);
    formula.add_clause(vec![CellValue::holds(1, 1, 2).to_literal(4)]);

    assert!(DpllSolver.solve(&formula).is_unsat());
}

#[test]
fn a_solved_grid_stays_solved() {
    let mut puzzle = Grid::new(4).unwrap();
    let solution = [
        [1, 2, 3, 4],
        [3, 4, 1, 2],
        [2, 1, 4, 3],
        [4, 3, 2, 1],
    ];
    for (row, values) in solution.iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            puzzle.set(row, col, value).unwrap();
        }
    }

    let solved = solve_grid(&puzzle, &DpllSolver).expect("a complete valid grid is solvable");
    assert_eq!(solved, puzzle);
}

#[test]
fn generated_puzzles_are_solvable() {
    let puzzle = sudoku::create_random_puzzle(4, 6).unwrap();
    let solved = solve_grid(&puzzle, &DpllSolver).expect("generated puzzles have a solution");
    assert_solution(&puzzle, &solved);
}

#[test]
#[ignore] // minutes with the naive full-copy engine
fn a_9x9_puzzle_is_solvable() {
    let puzzle: Grid = "\
5;3;0;0;7;0;0;0;0
6;0;0;1;9;5;0;0;0
0;9;8;0;0;0;0;6;0
8;0;0;0;6;0;0;0;3
4;0;0;8;0;3;0;0;1
7;0;0;0;2;0;0;0;6
0;6;0;0;0;0;2;8;0
0;0;0;4;1;9;0;0;5
0;0;0;0;8;0;0;7;9"
        .parse()
        .unwrap();

    let solved = solve_grid(&puzzle, &DpllSolver).expect("puzzle is solvable");
    assert_solution(&puzzle, &solved);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_propositions_round_trip(
        row in 0usize..9,
        col in 0usize..9,
        value in 1usize..=9,
        negated in proptest::bool::ANY,
    ) {
        let proposition = CellValue { row, col, value, negated };
        let literal = proposition.to_literal(9);
        prop_assert_eq!(CellValue::from_literal(literal, 9), proposition);
    }

    #[test]
    fn decoding_any_encoded_literal_is_within_bounds(
        row in 0usize..4,
        col in 0usize..4,
        value in 1usize..=4,
    ) {
        let literal = CellValue::holds(row, col, value).to_literal(4);
        let decoded = CellValue::from_literal(literal, 4);
        prop_assert!(decoded.row < 4 && decoded.col < 4);
        prop_assert!(decoded.value >= 1 && decoded.value <= 4);
    }
}
