#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fastrand::Rng;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{debug, warn};
use two_sat_solver::sat::assignment::Solutions;
use two_sat_solver::sat::input::Instance;
use two_sat_solver::sat::literal::{NegativeLiteral, PackedLiteral};
use two_sat_solver::sat::papadimitriou::Papadimitriou;
use two_sat_solver::sat::simplify::{
    DEFAULT_PASSES, MeaninglessVariableElimination, NoSimplification, PassLimit,
};
use two_sat_solver::sat::solver::{Config, SolutionStats, Solver, SolverConfig, Verdict};
use two_sat_solver::sat::{dimacs, input};

/// Defines the command-line interface for the 2-SAT solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "twosat", version, about = "A randomized 2-SAT solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand it is
    /// solved directly: `.cnf` files are read as DIMACS, anything else as the
    /// two-column format. A directory is searched recursively for both.
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dimacs`, `text`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a file in the two-column format (clause count, then one "a b" pair per line).
    File {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a 2-CNF file in DIMACS format.
    Dimacs {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve an instance given inline in the two-column format (e.g. "2\n1 -2\n-1 2").
    Text {
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Literal encoding used by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum LiteralType {
    /// Variable and polarity packed into one `u32`.
    #[default]
    Packed,
    /// Plain signed `i32`.
    Negative,
}

impl Display for LiteralType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packed => write!(f, "packed"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// Options shared across subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check a found model against the original, unsimplified instance.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the satisfying assignment, if one is found.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Seed for the random walk. Seeded from system entropy when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Number of meaningless-variable elimination passes.
    #[arg(long, default_value_t = DEFAULT_PASSES)]
    pub(crate) passes: usize,

    /// Repeat elimination passes until nothing changes instead of a fixed count.
    #[arg(long, default_value_t = false, conflicts_with = "passes")]
    pub(crate) fixed_point: bool,

    /// Skip meaningless-variable elimination.
    #[arg(long, default_value_t = false)]
    pub(crate) no_simplify: bool,

    /// Literal encoding used by the solver.
    #[arg(long, value_enum, default_value_t = LiteralType::Packed)]
    pub(crate) literals: LiteralType,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            seed: None,
            passes: DEFAULT_PASSES,
            fixed_point: false,
            no_simplify: false,
            literals: LiteralType::Packed,
        }
    }
}

impl CommonOptions {
    pub(crate) const fn pass_limit(&self) -> PassLimit {
        if self.fixed_point {
            PassLimit::UntilFixedPoint
        } else {
            PassLimit::Fixed(self.passes)
        }
    }
}

/// What one solve produced.
pub(crate) struct Outcome {
    pub verdict: Verdict,
    pub elapsed: Duration,
    pub stats: SolutionStats,
}

/// Input formats the CLI understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputFormat {
    Plain,
    Dimacs,
}

impl InputFormat {
    /// `.cnf` is DIMACS, everything else is the two-column format.
    pub(crate) fn from_path(path: &Path) -> Self {
        if path.extension().is_some_and(|ext| ext == "cnf") {
            Self::Dimacs
        } else {
            Self::Plain
        }
    }
}

/// Reads an instance file in the given format.
///
/// # Errors
///
/// If the file cannot be read or is malformed.
pub(crate) fn load(path: &Path, format: InputFormat) -> Result<Instance, String> {
    let result = match format {
        InputFormat::Plain => input::parse_file(path),
        InputFormat::Dimacs => dimacs::parse_file(path),
    };
    result.map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads, solves and reports one file.
///
/// # Errors
///
/// If the file cannot be loaded.
pub(crate) fn solve_file(
    path: &Path,
    format: InputFormat,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let instance = load(path, format)?;
    let parse_time = time.elapsed();

    solve_and_report(&instance, common, Some(path), parse_time)
}

/// Solves a file, or every `.txt`/`.cnf` file below a directory.
///
/// # Errors
///
/// If the path does not exist or a file cannot be loaded.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if path.is_dir() {
        solve_dir(path, common)
    } else if path.is_file() {
        solve_file(path, InputFormat::from_path(path), common)
    } else {
        Err(format!("No such file or directory: {}", path.display()))
    }
}

/// Solves a directory of instance files.
///
/// Every `.cnf` file is read as DIMACS and every `.txt` file as the two-column
/// format. Other entries are skipped.
///
/// # Errors
///
/// If any instance file cannot be loaded.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }

        if file_path
            .extension()
            .is_none_or(|ext| ext != "cnf" && ext != "txt")
        {
            warn!("Skipping non-instance file: {}", file_path.display());
            continue;
        }

        solve_file(file_path, InputFormat::from_path(file_path), common)?;
    }

    Ok(())
}

fn run<C: SolverConfig>(
    instance: &Instance,
    simplifier: C::Simplifier,
    seed: Option<u64>,
) -> Result<Outcome, String> {
    let formula = instance
        .to_formula::<C::Literal>()
        .map_err(|e| e.to_string())?;
    let rng = seed.map_or_else(Rng::new, Rng::with_seed);
    let mut solver = Papadimitriou::<C>::from_parts(formula, simplifier, rng);

    let time = Instant::now();
    let verdict = solver.solve();
    let elapsed = time.elapsed();

    Ok(Outcome {
        verdict,
        elapsed,
        stats: solver.stats(),
    })
}

/// Solves `instance` with the literal type and simplifier chosen in `common`.
///
/// # Errors
///
/// If the instance references variables outside its declared range.
pub(crate) fn solve(instance: &Instance, common: &CommonOptions) -> Result<Outcome, String> {
    let eliminate = MeaninglessVariableElimination::new(common.pass_limit());
    let seed = common.seed;

    match (common.literals, common.no_simplify) {
        (LiteralType::Packed, false) => {
            run::<Config<PackedLiteral, MeaninglessVariableElimination>>(instance, eliminate, seed)
        }
        (LiteralType::Packed, true) => {
            run::<Config<PackedLiteral, NoSimplification>>(instance, NoSimplification, seed)
        }
        (LiteralType::Negative, false) => {
            run::<Config<NegativeLiteral, MeaninglessVariableElimination>>(
                instance, eliminate, seed,
            )
        }
        (LiteralType::Negative, true) => {
            run::<Config<NegativeLiteral, NoSimplification>>(instance, NoSimplification, seed)
        }
    }
}

/// Checks a model against every clause of the original instance.
///
/// # Errors
///
/// If the model leaves a clause false.
pub(crate) fn verify_solution(instance: &Instance, verdict: &Verdict) -> Result<(), String> {
    let Some(assignment) = verdict.assignment() else {
        return Ok(());
    };

    let formula = instance
        .to_formula::<PackedLiteral>()
        .map_err(|e| e.to_string())?;
    if formula.verify(assignment) {
        println!("Verified: true");
        Ok(())
    } else {
        Err("Solution failed verification!".to_string())
    }
}

/// Solves an instance and reports verification and statistics.
///
/// # Errors
///
/// If solving fails or the model does not verify.
pub(crate) fn solve_and_report(
    instance: &Instance,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Result<(), String> {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }
    debug!(
        variables = instance.num_vars,
        clauses = instance.num_clauses(),
        "loaded instance"
    );

    let outcome = solve(instance, common)?;
    let (allocated, resident) = memory_usage();

    if common.verify {
        verify_solution(instance, &outcome.verdict)?;
    }

    if common.stats {
        print_stats(parse_time, instance, &outcome, allocated, resident);
    }

    print_verdict(&outcome.verdict, common.print_solution);
    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
pub(crate) fn memory_usage() -> (f64, f64) {
    if epoch::advance().is_err() {
        return (0.0, 0.0);
    }
    let mib = |bytes: Result<usize, tikv_jemalloc_ctl::Error>| {
        bytes.map_or(0.0, |b| b as f64 / (1024.0 * 1024.0))
    };
    (mib(stats::allocated::read()), mib(stats::resident::read()))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem, simplification and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    instance: &Instance,
    outcome: &Outcome,
    allocated: f64,
    resident: f64,
) {
    let s = &outcome.stats;
    let elapsed_secs = outcome.elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", instance.num_vars);
    stat_line("Clauses", instance.num_clauses());

    println!("======================[ Simplification Statistics ]==================");
    stat_line("Passes", s.simplify.passes);
    stat_line("Variables eliminated", s.simplify.variables_eliminated);
    stat_line("Clauses removed", s.simplify.clauses_removed);
    stat_line("Clauses remaining", s.clauses_after);
    stat_line("Active variables", s.active_variables);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Restarts", s.restarts, elapsed_secs);
    stat_line_with_rate("Flips", s.flips, elapsed_secs);
    stat_line_with_rate("Clause scans", s.clause_scans, elapsed_secs);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

fn print_verdict(verdict: &Verdict, print_solution: bool) {
    match verdict.solutions() {
        Some(solutions) => {
            if print_solution {
                print_solutions(&solutions);
            }
            println!("\nSATISFIABLE");
        }
        None => println!("\nUNSATISFIABLE (no model found within the search budget)"),
    }
}

fn print_solutions(solutions: &Solutions) {
    println!("Solutions: {solutions}");
}
