use std::sync::mpsc::channel;
use std::sync::Arc;
use std::thread::spawn;
use std::time::Duration;

use crate::cnf::Formula;
use crate::sat_solution::SATSolution;
use crate::sat_solver::Solver;

/// A wrapper that gives the inner solver a fixed time budget. The search
/// runs on a worker thread; if it does not answer in time the result is
/// `Unknown` and the worker is left to finish on its own.
pub struct TimeLimitedSolver<S> {
    solver: Arc<S>,
    max_duration: Duration,
}

impl<S: Solver> TimeLimitedSolver<S> {
    pub fn new(solver: S, max_duration: Duration) -> TimeLimitedSolver<S> {
        TimeLimitedSolver {
            solver: Arc::new(solver),
            max_duration,
        }
    }
}

impl<S: Solver + Send + Sync + 'static> Solver for TimeLimitedSolver<S> {
    fn solve(&self, formula: &Formula) -> SATSolution {
        let (sender, receiver) = channel();
        let solver = self.solver.clone();
        let formula = formula.clone();
        spawn(move || {
            let _ = sender.send(solver.solve(&formula));
        });
        receiver
            .recv_timeout(self.max_duration)
            .unwrap_or(SATSolution::Unknown)
    }
}
