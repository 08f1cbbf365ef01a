use proptest::{bool::weighted, collection::vec, prelude::*};
use solver::{check_valuation, Bruteforce, DpllSolver, Formula, Literal, SATSolution, Solver, VarId};

const MAX_NUM_VARIABLES: u32 = 4;
const MAX_NUM_LITERALS: usize = 3;
const MAX_NUM_CLAUSES: usize = 6;

/// Runs the solver under test and the brute force oracle on the same
/// formula. Verdicts must agree, and any witness must actually satisfy
/// the formula.
fn execute_solvers(formula: &Formula) -> (bool, bool) {
    let testing_solution = DpllSolver.solve(formula);
    let reference_solution = Bruteforce::Bruteforce.solve(formula);

    if let SATSolution::Satisfiable(valuation) = &testing_solution {
        assert!(check_valuation(formula, valuation));
    }
    if let SATSolution::Satisfiable(valuation) = &reference_solution {
        assert!(check_valuation(formula, valuation));
    }

    (testing_solution.is_sat(), reference_solution.is_sat())
}

fn build_formula(clauses: &[Vec<(VarId, bool)>]) -> Formula {
    let mut formula = Formula::new();
    for clause in clauses {
        formula.add_clause(clause.iter().map(|&(variable, sign)| {
            if sign {
                Literal::pos(variable)
            } else {
                Literal::neg(variable)
            }
        }));
    }
    formula
}

proptest! {
    #[test]
    fn only_positive_unit_clauses(num_variables in 1..=MAX_NUM_VARIABLES) {
        let mut formula = Formula::new();
        for variable in 1..=num_variables {
            formula.add_clause(vec![Literal::pos(variable)]);
        }

        let (custom, reference) = execute_solvers(&formula);
        prop_assert!(custom);
        prop_assert_eq!(custom, reference);
    }

    #[test]
    fn only_negative_unit_clauses(num_variables in 1..=MAX_NUM_VARIABLES) {
        let mut formula = Formula::new();
        for variable in 1..=num_variables {
            formula.add_clause(vec![Literal::neg(variable)]);
        }

        let (custom, reference) = execute_solvers(&formula);
        prop_assert!(custom);
        prop_assert_eq!(custom, reference);
    }

    #[test]
    fn only_unit_clauses(signs in vec(weighted(0.5), 1..=MAX_NUM_VARIABLES as usize)) {
        let clauses: Vec<_> = signs.iter()
            .enumerate()
            .map(|(variable, &sign)| vec![(variable as VarId + 1, sign)])
            .collect();
        let formula = build_formula(&clauses);

        let (custom, reference) = execute_solvers(&formula);
        prop_assert!(custom);
        prop_assert_eq!(custom, reference);
    }

    #[test]
    fn arbitrary_cnf_formula(
        clauses in vec(vec((1..=MAX_NUM_VARIABLES, weighted(0.5)), 1..=MAX_NUM_LITERALS), 1..=MAX_NUM_CLAUSES)
    ) {
        let formula = build_formula(&clauses);

        let (custom, reference) = execute_solvers(&formula);
        prop_assert_eq!(custom, reference);
    }

    #[test]
    fn verdict_is_independent_of_clause_insertion_order(
        clauses in vec(vec((1..=MAX_NUM_VARIABLES, weighted(0.5)), 1..=MAX_NUM_LITERALS), 1..=MAX_NUM_CLAUSES)
    ) {
        let formula = build_formula(&clauses);
        let reversed: Vec<_> = clauses.iter().rev().cloned().collect();
        let reversed_formula = build_formula(&reversed);

        // the simplification tie-break order differs between the two,
        // the verdict must not
        prop_assert_eq!(
            DpllSolver.solve(&formula).is_sat(),
            DpllSolver.solve(&reversed_formula).is_sat()
        );
    }
}
