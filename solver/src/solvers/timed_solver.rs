use std::time::{Duration, Instant};

use crate::cnf::Formula;
use crate::sat_solution::SATSolution;
use crate::sat_solver::Solver;

/// A wrapper for another solver which exposes time performance
/// measurement
pub struct TimedSolver<S> {
    solver: S,
}

impl<S> TimedSolver<S> {
    pub fn new(solver: S) -> Self {
        TimedSolver { solver }
    }
}

impl<S: Solver> Solver for TimedSolver<S> {
    fn solve(&self, formula: &Formula) -> SATSolution {
        self.solver.solve(formula)
    }
}

impl<S: Solver> TimedSolver<S> {
    pub fn solve_timed(&self, formula: &Formula) -> (Duration, SATSolution) {
        let start = Instant::now();
        let solution = self.solver.solve(formula);
        let duration = start.elapsed();
        (duration, solution)
    }
}
