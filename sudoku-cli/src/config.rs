use std::path::PathBuf;

use solver::Solver;

pub struct Config {
    pub input: Option<String>,
    pub output: Option<PathBuf>,
    pub return_code: bool,
    pub dimacs: bool,
    pub solver: Box<dyn Solver>,
}
