use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};
use rand::{rngs::StdRng, thread_rng, RngCore, SeedableRng};
use slider_puzzle::input::read_board;
use slider_puzzle::render::{write_solution, RenderOptions};
use slider_puzzle::{Board, Priority, Solver, SolverConfig};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PriorityArg {
    Manhattan,
    Hamming,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Manhattan => Priority::Manhattan,
            PriorityArg::Hamming => Priority::Hamming,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "slider-puzzle", version, about = "Solve n-puzzles with A*")]
struct Args {
    /// Puzzle file: the dimension n followed by n² tiles, 0 for the blank. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Solve a random board of this dimension instead of reading one
    #[arg(long, conflicts_with = "path")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Reshuffle --random boards until they are solvable
    #[arg(long, requires = "random")]
    solvable_only: bool,

    /// Heuristic used to order the search frontier
    #[arg(long, value_enum, default_value = "manhattan")]
    priority: PriorityArg,

    /// Print only the move count
    #[arg(long)]
    moves_only: bool,

    /// Highlight tiles already in their goal cell
    #[arg(long)]
    color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn random_board(size: usize, seed: Option<u64>, solvable_only: bool) -> anyhow::Result<Board> {
    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    };

    loop {
        let board = Board::shuffled(size, &mut rng)?;
        if !solvable_only || board.is_solvable_by_parity() {
            return Ok(board);
        }
    }
}

fn load_board(args: &Args) -> anyhow::Result<Board> {
    if let Some(size) = args.random {
        let board = random_board(size, args.seed, args.solvable_only)?;
        println!("Shuffled puzzle:\n{}", board);
        return Ok(board);
    }

    match &args.path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_board(file)
                .with_context(|| format!("failed to read puzzle from {}", path.display()))
        }
        None => read_board(io::stdin().lock()).context("failed to read puzzle from stdin"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let board = load_board(&args)?;
    let config = SolverConfig {
        priority: args.priority.into(),
    };

    let start = Instant::now();
    let solver = Solver::with_config(board, config);
    let (primary, shadow) = solver.expanded();
    info!(
        "solved in {:?}, expanded {} primary and {} shadow nodes",
        start.elapsed(),
        primary,
        shadow
    );

    let options = RenderOptions {
        color: args.color,
        moves_only: args.moves_only,
    };
    let mut out = BufWriter::new(io::stdout().lock());
    write_solution(&mut out, &solver, options)?;
    out.flush()?;

    Ok(())
}
