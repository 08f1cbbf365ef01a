use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::cnf::{Formula, Literal, VarId};
use crate::sat_solution::SATSolution;

pub trait Solver {
    fn solve(&self, formula: &Formula) -> SATSolution;
}

/// Evaluates a formula under a witness: a variable is true iff the
/// witness asserts it positively, all unmentioned variables are false.
pub fn check_valuation(formula: &Formula, valuation: &[Literal]) -> bool {
    let assigned_true: FxHashSet<VarId> = valuation
        .iter()
        .filter(|literal| literal.is_positive())
        .map(|literal| literal.var())
        .collect();

    formula.clauses().par_bridge().all(|(_, clause)| {
        clause
            .literals()
            .any(|literal| literal.is_positive() == assigned_true.contains(&literal.var()))
    })
}

impl<T: Solver + ?Sized> Solver for &T {
    fn solve(&self, formula: &Formula) -> SATSolution {
        (**self).solve(formula)
    }
}

impl<T: Solver + ?Sized> Solver for Box<T> {
    fn solve(&self, formula: &Formula) -> SATSolution {
        (**self).solve(formula)
    }
}
