use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::{error, info, Level, LevelFilter, Record};

use linksat::{EdgeColoring, Puzzle, Refinement, Search, SolveConfig, SolveError};

/// Solve a Numberlink puzzle given as text: one line per row, `.` for an empty cell, a letter or digit for each terminus.
#[derive(Parser, Debug)]
#[command(name = "linksat-solver", version)]
struct Args {
    /// The puzzle file to solve (stdin if omitted)
    input: Option<PathBuf>,
    /// Read solve options from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Give up after this many candidate solutions
    #[arg(long, value_name = "N")]
    max_candidates: Option<usize>,
    /// What to rule out after a candidate with a cycle: block-model or forbid-cycle
    #[arg(long)]
    refinement: Option<Refinement>,
    /// Encoding of same-colored edges: cross-product or implication
    #[arg(long)]
    edge_coloring: Option<EdgeColoring>,
    /// Enumerate every solution instead of stopping at the first
    #[arg(long)]
    all: bool,
}

fn main() {
    let exit_code = match main_with_err() {
        Err(err) => {
            error!("{:#}", err);
            1
        }
        Ok(exit_code) => exit_code,
    };
    std::process::exit(exit_code);
}

fn init_logging() {
    let format = |buf: &mut env_logger::fmt::Formatter, record: &Record| {
        if record.level() == Level::Info {
            writeln!(buf, "c {}", record.args())
        } else {
            writeln!(buf, "c {}: {}", record.level(), record.args())
        }
    };

    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .format(format)
        .filter_level(LevelFilter::Info);

    if let Ok(ref env_var) = env::var("LINKSAT_LOG") {
        builder.parse_filters(env_var);
    }

    builder.init();
}

fn load_config(args: &Args) -> anyhow::Result<SolveConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading config file '{}'", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("parsing config file '{}'", path.display()))?
        }
        None => SolveConfig::default(),
    };

    if let Some(max_candidates) = args.max_candidates {
        config.max_candidates = Some(max_candidates);
    }
    if let Some(refinement) = args.refinement {
        config.refinement = refinement;
    }
    if let Some(edge_coloring) = args.edge_coloring {
        config.edge_coloring = edge_coloring;
    }

    Ok(config)
}

fn main_with_err() -> anyhow::Result<i32> {
    let args = Args::parse();
    init_logging();

    let config = load_config(&args)?;

    let mut text = String::new();
    match &args.input {
        Some(path) => {
            info!("Reading file '{}'", path.display());
            fs::File::open(path)
                .and_then(|mut file| file.read_to_string(&mut text))
                .with_context(|| format!("reading puzzle '{}'", path.display()))?;
        }
        None => {
            info!("Reading from stdin");
            io::stdin().lock().read_to_string(&mut text)?;
        }
    };

    let puzzle: Puzzle = text.parse()?;
    info!("puzzle size: {}x{}", puzzle.width(), puzzle.height());
    info!("colors: {}", puzzle.color_count());

    let start = Instant::now();
    let mut search = Search::new(&puzzle, config);
    let mut found = 0;

    loop {
        match search.next_solution() {
            Ok(Some(solved)) => {
                found += 1;
                if args.all {
                    println!("solution {}", found);
                }
                print!("{}", solved);
                if !args.all {
                    break;
                }
            }
            Ok(None) => break,
            Err(err) => {
                report(&search, start);
                return Err(err.into());
            }
        }
    }

    report(&search, start);

    if found > 0 {
        if args.all {
            info!("{} solutions", found);
        }
        return Ok(0);
    }

    let outcome = match search.stats().candidates {
        0 => SolveError::Unsatisfiable,
        candidates => SolveError::NoAcyclicSolution { candidates },
    };
    println!("{}", outcome);
    Ok(20)
}

fn report(search: &Search, start: Instant) {
    let stats = search.stats();
    info!("time: {:.3}s", start.elapsed().as_secs_f64());
    info!("number of variables: {}", stats.variables);
    info!("number of clauses: {}", stats.clauses);
    info!("number of candidates: {}", stats.candidates);
}
