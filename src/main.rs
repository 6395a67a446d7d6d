//! # twosat
//!
//! `twosat` decides 2-SAT instances with Papadimitriou's randomized walk, after
//! removing variables that only ever occur with one polarity.
//!
//! A `SATISFIABLE` answer is always correct. An `UNSATISFIABLE` answer only means
//! no model turned up within `⌊log2 n⌋ + 1` restarts of `⌊2n²⌋` flips each.
//!
//! ## Usage
//!
//! ```sh
//! twosat [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! -   `PATH` on its own solves a file (`.cnf` as DIMACS, anything else as the
//!     two-column format) or every `.cnf`/`.txt` file under a directory.
//! -   `file --path <FILE>` solves a two-column file: the clause count `N` on the
//!     first line, then `N` lines holding two signed literals over `1..=N`.
//! -   `dimacs --path <FILE>` solves a DIMACS 2-CNF file.
//! -   `text --input <STRING>` solves a two-column instance given inline.
//! -   `completions <SHELL>` prints a shell completion script.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: debug logging. `RUST_LOG` takes precedence when set.
//! -   `--verify <BOOL>`: check a model against the original instance (default `true`).
//! -   `--stats <BOOL>`: print statistics (default `true`).
//! -   `-p, --print-solution`: print the model as signed literals.
//! -   `--seed <SEED>`: fix the random walk.
//! -   `--passes <N>` / `--fixed-point`: how long elimination runs (default 60 passes).
//! -   `--no-simplify`: skip elimination.
//! -   `--literals <packed|negative>`: literal encoding.
//!
//! ## Example Invocations
//!
//! ```sh
//! twosat 2sat1.txt
//! twosat dimacs --path problem.cnf --seed 7 --print-solution
//! twosat text --input "$(printf '2\n1 -2\n-1 2')"
//! twosat instances/ --fixed-point --stats false
//! ```

use crate::command_line::cli::{
    Cli, Commands, CommonOptions, InputFormat, solve_and_report, solve_file, solve_path,
};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use two_sat_solver::sat::input;

mod command_line;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(common: &CommonOptions) {
    let default = if common.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(path) = &cli.path {
        if cli.command.is_none() {
            init_logging(&cli.common);
            return solve_path(path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => {
            init_logging(&common);
            solve_file(&path, InputFormat::Plain, &common)
        }
        Some(Commands::Dimacs { path, common }) => {
            init_logging(&common);
            solve_file(&path, InputFormat::Dimacs, &common)
        }
        Some(Commands::Text { input, common }) => {
            init_logging(&common);
            let time = Instant::now();
            let instance = input::parse_str(&input).map_err(|e| e.to_string())?;
            solve_and_report(&instance, &common, None, time.elapsed())
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| format!("failed to print help: {e}"))?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
