use std::fmt::Write as FmtWrite;

use crate::cnf::Literal;

/// The literals committed true along an accepting search path, in the
/// order they were decided
pub type Valuation = Vec<Literal>;

const MAX_LITERALS_PER_LINE: usize = 8;

#[derive(Clone, PartialEq, Eq)]
pub enum SATSolution {
    Satisfiable(Valuation),
    Unsatisfiable,
    Unknown,
}

impl SATSolution {
    pub fn is_sat(&self) -> bool {
        match self {
            SATSolution::Satisfiable(_) => true,
            _ => false,
        }
    }

    pub fn is_unsat(&self) -> bool {
        match self {
            SATSolution::Unsatisfiable => true,
            _ => false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        match self {
            SATSolution::Unknown => true,
            _ => false,
        }
    }

    /// The witness of a satisfiable solution
    pub fn valuation(&self) -> Option<&Valuation> {
        match self {
            SATSolution::Satisfiable(valuation) => Some(valuation),
            _ => None,
        }
    }

    pub fn to_dimacs(&self) -> String {
        format!(
            "s {}\n",
            match self {
                SATSolution::Unsatisfiable => "UNSATISFIABLE".to_string(),
                SATSolution::Unknown => "UNKNOWN".to_string(),
                SATSolution::Satisfiable(literals) => {
                    format!("SATISFIABLE\n{}", {
                        let mut out = String::new();
                        let mut iter = literals.iter().peekable();

                        while iter.peek().is_some() {
                            out.push('v');
                            for literal in iter.by_ref().take(MAX_LITERALS_PER_LINE) {
                                write!(&mut out, " {}", literal.to_i32()).unwrap();
                            }
                            out.push_str(" 0\n");
                        }
                        out
                    })
                }
            }
        )
    }
}

impl std::fmt::Debug for SATSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.to_dimacs())
    }
}

impl std::fmt::Display for SATSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SATSolution::Unsatisfiable => "Unsatisfiable".to_string(),
                SATSolution::Unknown => "Unknown".to_string(),
                SATSolution::Satisfiable(literals) => {
                    format!("Satisfiable:\n{}", {
                        let mut out = String::new();
                        let mut iter = literals.iter().peekable();

                        while iter.peek().is_some() {
                            for literal in iter.by_ref().take(MAX_LITERALS_PER_LINE) {
                                write!(&mut out, "{} ", literal.to_i32())?;
                            }
                            out.push('\n');
                        }
                        out
                    })
                }
            }
        )
    }
}
