use std::time::Duration;

use solver::solvers::{TimeLimitedSolver, TimedSolver};
use solver::{DpllSolver, Formula, Literal, Solver};

/// An implication chain 1 → 2 → ... → length, forced true by the unit
/// clause (1)
fn chain(length: u32) -> Formula {
    let mut formula = Formula::new();
    formula.add_clause(vec![Literal::pos(1)]);
    for variable in 1..length {
        formula.add_clause(vec![Literal::neg(variable), Literal::pos(variable + 1)]);
    }
    formula
}

/// The pigeonhole principle for `holes + 1` pigeons, far beyond what the
/// naive engine finishes in milliseconds
fn pigeonhole(holes: u32) -> Formula {
    let pigeons = holes + 1;
    let var = |pigeon: u32, hole: u32| pigeon * holes + hole + 1;

    let mut formula = Formula::new();
    for pigeon in 0..pigeons {
        formula.add_clause((0..holes).map(|hole| Literal::pos(var(pigeon, hole))));
    }
    for hole in 0..holes {
        for first in 0..pigeons {
            for second in first + 1..pigeons {
                formula.add_clause(vec![
                    Literal::neg(var(first, hole)),
                    Literal::neg(var(second, hole)),
                ]);
            }
        }
    }
    formula
}

#[test]
fn timed_solver_reports_the_inner_verdict() {
    let formula = chain(20);
    let solver = TimedSolver::new(DpllSolver);

    let (duration, solution) = solver.solve_timed(&formula);
    assert!(solution.is_sat());
    assert!(duration > Duration::from_secs(0));

    // the plain Solver impl passes straight through
    assert!(solver.solve(&formula).is_sat());
}

#[test]
fn time_limited_solver_answers_within_a_generous_budget() {
    let formula = chain(20);
    let solver = TimeLimitedSolver::new(DpllSolver, Duration::from_secs(60));

    assert!(solver.solve(&formula).is_sat());
}

#[test]
fn time_limited_solver_gives_up_on_a_tiny_budget() {
    let formula = pigeonhole(7);
    let solver = TimeLimitedSolver::new(DpllSolver, Duration::from_millis(10));

    assert!(solver.solve(&formula).is_unknown());
}
