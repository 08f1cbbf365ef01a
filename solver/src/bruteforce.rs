use crate::cnf::{Formula, Literal, VarId};
use crate::sat_solution::SATSolution;
use crate::sat_solver::{check_valuation, Solver};

/// A simple CNF solver that naively checks all possible valuations in
/// order to ensure satisfiability. Exponential in the number of
/// variables; only useful as a reference for tests and benchmarks.
pub enum Bruteforce {
    Bruteforce,
}

impl Solver for Bruteforce {
    fn solve(&self, formula: &Formula) -> SATSolution {
        let variables = formula.variables();
        // initial valuation sets all to false
        let mut valuation = vec![false; variables.len()];
        if guess(formula, &variables, 0, &mut valuation) {
            SATSolution::Satisfiable(
                variables
                    .iter()
                    .zip(valuation.iter())
                    .map(|(&var, &value)| {
                        if value {
                            Literal::pos(var)
                        } else {
                            Literal::neg(var)
                        }
                    })
                    .collect(),
            )
        } else {
            SATSolution::Unsatisfiable
        }
    }
}

fn guess(formula: &Formula, variables: &[VarId], change: usize, valuation: &mut Vec<bool>) -> bool {
    if change == variables.len() {
        evaluate(formula, variables, valuation)
    } else {
        if guess(formula, variables, change + 1, valuation) {
            true
        } else {
            // set current bit
            valuation[change] = true;
            // try again
            let res = guess(formula, variables, change + 1, valuation);
            if !res {
                // if failed set back to default
                valuation[change] = false;
            }
            res
        }
    }
}

fn evaluate(formula: &Formula, variables: &[VarId], valuation: &[bool]) -> bool {
    let literals: Vec<Literal> = variables
        .iter()
        .zip(valuation.iter())
        .map(|(&var, &value)| {
            if value {
                Literal::pos(var)
            } else {
                Literal::neg(var)
            }
        })
        .collect();
    check_valuation(formula, &literals)
}
