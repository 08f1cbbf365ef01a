mod config;

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::{App, Arg};

use config::Config;
use solver::solvers::TimeLimitedSolver;
use solver::{Bruteforce, DpllSolver, Formula, Solver};
use sudoku::{solve_grid, Grid};

fn make_config() -> Config {
    let matches = App::new("sudoku-sat")
        .version("1.0")
        .about("Solves sudoku grids by reduction to boolean satisfiability")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .help("Input file"),
        )
        .arg(
            Arg::with_name("algorithm")
                .long("algorithm")
                .value_name("ALGORITHM")
                .help("SAT solving algorithm")
                .takes_value(true)
                .possible_values(&["dpll", "bruteforce"])
                .default_value("dpll"),
        )
        .arg(
            Arg::with_name("time-limit")
                .long("time-limit")
                .takes_value(true)
                .help("Give up after the given number of seconds"),
        )
        .arg(
            Arg::with_name("dimacs")
                .long("dimacs")
                .takes_value(false)
                .help("Treat the input as a DIMACS CNF formula instead of a grid"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("File name for the solution"),
        )
        .arg(
            Arg::with_name("return_code")
                .long("return-code")
                .short("r")
                .help("Will return 1 if solvable and 0 if not (useful for scripting)")
                .takes_value(false),
        )
        .get_matches();

    let solver: Box<dyn Solver + Send + Sync> = match matches.value_of("algorithm") {
        Some("bruteforce") => Box::new(Bruteforce::Bruteforce),
        Some("dpll") => Box::new(DpllSolver),
        _ => unreachable!(), // already handled by clap
    };

    let solver: Box<dyn Solver> = match matches.value_of("time-limit") {
        Some(seconds) => {
            let seconds = seconds.parse().unwrap_or_else(|_| {
                eprintln!("Invalid time limit: {}", seconds);
                exit(2)
            });
            Box::new(TimeLimitedSolver::new(solver, Duration::from_secs(seconds)))
        }
        None => solver,
    };

    Config {
        input: matches.value_of("input").map(String::from),
        output: matches.value_of("output").map(PathBuf::from),
        return_code: matches.is_present("return_code"),
        dimacs: matches.is_present("dimacs"),
        solver,
    }
}

fn get_input(handle: &mut impl Read) -> io::Result<String> {
    let mut buffer = String::new();
    handle.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn write_output(output: &Option<PathBuf>, content: &str) -> io::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = make_config();

    let input = match &config.input {
        None => {
            println!("No input file specified. Reading from standard input...");
            get_input(&mut io::stdin())
        }
        Some(file) => get_input(&mut File::open(file)?),
    }?;

    if config.dimacs {
        let formula = Formula::from_dimacs(&input)?;
        let solution = config.solver.solve(&formula);
        write_output(&config.output, &solution.to_dimacs())?;

        if config.return_code && solution.is_sat() {
            exit(1);
        }
        if solution.is_unknown() {
            exit(2);
        }
        return Ok(());
    }

    let grid: Grid = input.parse()?;
    match solve_grid(&grid, &config.solver) {
        Some(solved) => {
            write_output(&config.output, &solved.to_string())?;
            if config.return_code {
                exit(1);
            }
        }
        None => {
            println!("Grid is not solvable.");
        }
    }
    Ok(())
}
