use std::fmt;
use std::hash::BuildHasherDefault;
use std::iter::FromIterator;

use dimacs::parse_dimacs;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use rustc_hash::FxHasher;
use thiserror::Error;

/// Type used for referencing logical variables
pub type VarId = u32;

/// Type used for referencing clauses inside a formula
pub type ClauseId = usize;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Errors reported by the formula store for contract violations
/// by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("0 is not a valid literal")]
    ZeroLiteral,
    #[error("clause {0} does not exist in this formula")]
    UnknownClause(ClauseId),
    #[error("invalid DIMACS input: {0}")]
    InvalidDimacs(String),
}

/// A literal: a non-zero signed integer. The magnitude names a boolean
/// variable, the sign its polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(i32);

impl Literal {
    /// Creates a literal from its signed integer encoding.
    /// The value 0 is rejected.
    pub fn new(raw: i32) -> Result<Literal, FormulaError> {
        if raw == 0 {
            Err(FormulaError::ZeroLiteral)
        } else {
            Ok(Literal(raw))
        }
    }

    /// Creates a positive literal for the given variable (id >= 1)
    pub fn pos(var: VarId) -> Literal {
        debug_assert!(var != 0);
        Literal(var as i32)
    }

    /// Creates a negative literal for the given variable (id >= 1)
    pub fn neg(var: VarId) -> Literal {
        debug_assert!(var != 0);
        Literal(-(var as i32))
    }

    /// The variable this literal talks about
    pub fn var(self) -> VarId {
        self.0.unsigned_abs()
    }

    /// Checks if the literal asserts its variable rather than negating it
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// The literal of the same variable with the opposite polarity
    pub fn negated(self) -> Literal {
        Literal(-self.0)
    }

    /// Converts to the signed integer encoding
    pub fn to_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "x{}", self.var())
        } else {
            write!(f, "¬x{}", self.var())
        }
    }
}

/// A clause: a disjunction of literals. Duplicate literals collapse to a
/// single occurrence; insertion order is kept for enumeration only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clause {
    literals: FxIndexSet<Literal>,
}

impl Clause {
    /// Creates an empty clause, the unconditional contradiction
    pub fn new() -> Clause {
        Clause::default()
    }

    /// Number of distinct literals in the clause
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// A clause with no literals cannot be satisfied
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause with exactly one literal forces that literal
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    /// Adds a literal. Adding a literal that is already present is a no-op.
    pub fn insert(&mut self, literal: Literal) -> bool {
        self.literals.insert(literal)
    }

    /// Removes a literal. Removing an absent literal is a no-op.
    pub fn remove(&mut self, literal: Literal) -> bool {
        self.literals.swap_remove(&literal)
    }

    /// The first literal in enumeration order, if any
    pub fn first(&self) -> Option<Literal> {
        self.literals.get_index(0).copied()
    }

    /// Iterates over the literals of the clause
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause {
            literals: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.literals().format(" ∨ "))
    }
}

/// A formula in conjunctive normal form: a conjunction of clauses keyed
/// by clause id.
///
/// Ids are handed out by a counter owned by the formula itself, increase
/// monotonically and are never reused, even after removals. A deep copy
/// (`Clone`) yields an independent formula with identical ids and
/// contents; this is what the DPLL engine forks at every branch point.
#[derive(Clone, Debug, Default)]
pub struct Formula {
    clauses: FxIndexMap<ClauseId, Clause>,
    next_id: ClauseId,
}

impl Formula {
    /// Creates an empty formula
    pub fn new() -> Formula {
        Formula::default()
    }

    /// Number of clauses in the formula
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// A formula with no clauses is vacuously satisfiable
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Inserts a new clause and returns its id. Duplicate literals in the
    /// input are coalesced; an empty input yields the empty clause.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = Literal>) -> ClauseId {
        let id = self.next_id;
        self.next_id += 1;
        self.clauses.insert(id, literals.into_iter().collect());
        id
    }

    /// Inserts a clause given in signed integer encoding. Fails on a 0
    /// literal, leaving the formula untouched.
    pub fn try_add_clause(&mut self, literals: &[i32]) -> Result<ClauseId, FormulaError> {
        let literals = literals
            .iter()
            .map(|&raw| Literal::new(raw))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.add_clause(literals))
    }

    /// Removes a clause. Other clauses keep their ids.
    pub fn remove_clause(&mut self, id: ClauseId) -> Result<(), FormulaError> {
        self.take_clause(id)
            .map(|_| ())
            .ok_or(FormulaError::UnknownClause(id))
    }

    /// Removes a clause and hands it back, or `None` for an unknown id
    pub fn take_clause(&mut self, id: ClauseId) -> Option<Clause> {
        self.clauses.swap_remove(&id)
    }

    pub fn clause(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(&id)
    }

    pub fn clause_mut(&mut self, id: ClauseId) -> Option<&mut Clause> {
        self.clauses.get_mut(&id)
    }

    /// Adds a literal to an existing clause; idempotent
    pub fn clause_add_literal(&mut self, id: ClauseId, literal: Literal) -> Result<(), FormulaError> {
        self.clause_mut(id)
            .map(|clause| {
                clause.insert(literal);
            })
            .ok_or(FormulaError::UnknownClause(id))
    }

    /// Removes a literal from an existing clause; idempotent
    pub fn clause_remove_literal(
        &mut self,
        id: ClauseId,
        literal: Literal,
    ) -> Result<(), FormulaError> {
        self.clause_mut(id)
            .map(|clause| {
                clause.remove(literal);
            })
            .ok_or(FormulaError::UnknownClause(id))
    }

    pub fn clause_is_empty(&self, id: ClauseId) -> Result<bool, FormulaError> {
        self.clause(id)
            .map(Clause::is_empty)
            .ok_or(FormulaError::UnknownClause(id))
    }

    pub fn clause_is_unit(&self, id: ClauseId) -> Result<bool, FormulaError> {
        self.clause(id)
            .map(Clause::is_unit)
            .ok_or(FormulaError::UnknownClause(id))
    }

    pub fn clause_contains_literal(
        &self,
        id: ClauseId,
        literal: Literal,
    ) -> Result<bool, FormulaError> {
        self.clause(id)
            .map(|clause| clause.contains(literal))
            .ok_or(FormulaError::UnknownClause(id))
    }

    /// A snapshot of the clause ids currently in the formula
    pub fn clause_ids(&self) -> Vec<ClauseId> {
        self.clauses.keys().copied().collect()
    }

    /// A snapshot of the literals of a clause
    pub fn clause_literals(&self, id: ClauseId) -> Result<Vec<Literal>, FormulaError> {
        self.clause(id)
            .map(|clause| clause.literals().collect())
            .ok_or(FormulaError::UnknownClause(id))
    }

    /// Iterates over the clauses in enumeration order
    pub fn clauses(&self) -> impl Iterator<Item = (ClauseId, &Clause)> + '_ {
        self.clauses.iter().map(|(&id, clause)| (id, clause))
    }

    /// Collects all variable identifiers that appear in the formula,
    /// sorted ascending
    pub fn variables(&self) -> Vec<VarId> {
        self.clauses
            .values()
            .flat_map(|clause| clause.literals().map(Literal::var))
            .unique()
            .sorted()
            .collect()
    }

    /// Calculates the number of distinct variables (unifies negated and
    /// positive occurrences)
    pub fn num_variables(&self) -> usize {
        self.variables().len()
    }

    /// Prints the formula in DIMACS compatible form
    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.num_variables(), self.len());
        for (_, clause) in self.clauses() {
            for literal in clause.literals() {
                out.push_str(&literal.to_i32().to_string());
                out.push(' ');
            }
            out.push_str("0\n");
        }
        out
    }

    /// Parse a DIMACS string into a formula
    pub fn from_dimacs(input: &str) -> Result<Formula, FormulaError> {
        match parse_dimacs(input) {
            Ok(dimacs::Instance::Cnf { clauses, .. }) => {
                let mut formula = Formula::new();
                for clause in clauses.iter() {
                    formula.add_clause(clause.lits().iter().map(|lit| {
                        let var = lit.var().to_u64() as VarId;
                        match lit.sign() {
                            dimacs::Sign::Pos => Literal::pos(var),
                            dimacs::Sign::Neg => Literal::neg(var),
                        }
                    }));
                }
                Ok(formula)
            }
            Ok(_) => Err(FormulaError::InvalidDimacs(
                "only cnf instances are supported".to_string(),
            )),
            Err(_) => Err(FormulaError::InvalidDimacs("parse error".to_string())),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clauses.values().format(" ∧ "))
    }
}
