use std::iter;

use log::{debug, trace};

use crate::cnf::{Formula, Literal};
use crate::sat_solution::SATSolution;
use crate::sat_solver::Solver;

/// The DPLL solver: deterministic simplification (unit propagation and
/// pure literal elimination) interleaved with first-literal case splits.
/// Branching forks an independent deep copy of the formula per branch,
/// so no undo bookkeeping is needed.
pub struct DpllSolver;

impl Solver for DpllSolver {
    fn solve(&self, formula: &Formula) -> SATSolution {
        // The caller keeps its formula; all work happens on copies.
        let mut trail = Vec::new();
        if search(formula.clone(), &mut trail) {
            SATSolution::Satisfiable(trail)
        } else {
            SATSolution::Unsatisfiable
        }
    }
}

/// The literal of the first unit clause in enumeration order, if any
fn find_unit_literal(formula: &Formula) -> Option<Literal> {
    formula.clauses().find_map(|(_, clause)| {
        if clause.is_unit() {
            clause.first()
        } else {
            None
        }
    })
}

/// The first literal in enumeration order whose negation appears in no
/// clause, if any
fn find_pure_literal(formula: &Formula) -> Option<Literal> {
    formula
        .clauses()
        .flat_map(|(_, clause)| clause.literals())
        .find(|literal| {
            let negation = literal.negated();
            formula.clauses().all(|(_, clause)| !clause.contains(negation))
        })
}

/// Commits a literal: clauses containing it are satisfied and removed,
/// occurrences of its negation can no longer help their clause and are
/// deleted. The latter may shrink a clause to a new unit or to empty.
fn assign(formula: &mut Formula, literal: Literal) {
    let negation = literal.negated();
    for id in formula.clause_ids() {
        if formula.clause(id).map_or(false, |clause| clause.contains(literal)) {
            formula.take_clause(id);
        } else if let Some(clause) = formula.clause_mut(id) {
            clause.remove(negation);
        }
    }
}

/// Runs unit propagation to fixpoint. Every propagated literal is pushed
/// onto the trail; afterwards the formula contains no unit clause.
pub fn propagate_units(formula: &mut Formula, trail: &mut Vec<Literal>) {
    while let Some(literal) = find_unit_literal(formula) {
        trace!("unit propagation commits {}", literal);
        assign(formula, literal);
        trail.push(literal);
    }
}

/// Runs pure literal elimination to fixpoint. Every clause containing a
/// pure literal is satisfied by asserting that literal, which goes onto
/// the trail so witnesses stay evaluable.
pub fn eliminate_pure_literals(formula: &mut Formula, trail: &mut Vec<Literal>) {
    while let Some(literal) = find_pure_literal(formula) {
        trace!("pure literal {} eliminated", literal);
        for id in formula.clause_ids() {
            if formula.clause(id).map_or(false, |clause| clause.contains(literal)) {
                formula.take_clause(id);
            }
        }
        trail.push(literal);
    }
}

/// The first literal of the first clause in enumeration order. Only
/// called once the formula is known to be non-empty and free of empty
/// clauses, so a literal always exists.
fn choose_literal(formula: &Formula) -> Option<Literal> {
    formula
        .clauses()
        .next()
        .and_then(|(_, clause)| clause.first())
}

fn search(mut formula: Formula, trail: &mut Vec<Literal>) -> bool {
    propagate_units(&mut formula, trail);
    eliminate_pure_literals(&mut formula, trail);

    if formula.is_empty() {
        return true;
    }
    if formula.clauses().any(|(_, clause)| clause.is_empty()) {
        return false;
    }

    let literal = choose_literal(&formula)
        .expect("a non-empty formula without empty clauses has a literal");
    debug!("case split on {} at depth {}", literal, trail.len());

    // Fork the search: one copy asserts the literal, the original copy
    // asserts its negation. Each decision enters the trail through the
    // unit propagation of the added unit clause, and a failed branch
    // must not leave its decisions behind for the other one.
    let depth = trail.len();

    let mut asserted = formula.clone();
    asserted.add_clause(iter::once(literal));
    if search(asserted, trail) {
        return true;
    }
    trail.truncate(depth);

    formula.add_clause(iter::once(literal.negated()));
    if search(formula, trail) {
        return true;
    }
    trail.truncate(depth);
    false
}
