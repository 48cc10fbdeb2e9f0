//! Indefinite Loop command-line entry point
//!
//! Prints generated levels as box-drawing text. Useful for eyeballing the
//! generator and for checking what a given level looks like.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use indefinite_loop::puzzle::{Grid, generate, open_ends};
use indefinite_loop::{JsonProgress, ProgressStore, Result};

/// Print Indefinite Loop levels.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// First level to print (defaults to the highest unlocked level)
    #[arg(short, long)]
    level: Option<u32>,

    /// Number of consecutive levels to print
    #[arg(short, long, default_value_t = 1)]
    count: u32,

    /// Print the solved layout instead of the scrambled puzzle
    #[arg(short, long, default_value_t = false)]
    presolved: bool,

    /// Directory holding the progress file
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let first = match args.level {
        Some(level) => level,
        None => JsonProgress::open(&args.data_dir).max_level(),
    };

    for number in first..first.saturating_add(args.count) {
        let level = generate(number)?;
        let board = if args.presolved {
            &level.solution
        } else {
            &level.puzzle
        };
        print_level(number, board);
    }
    Ok(())
}

fn print_level(number: u32, board: &Grid) {
    println!(
        "Level {number} ({}x{}), {} open ends",
        board.width(),
        board.height(),
        open_ends(board)
    );
    let counts: Vec<String> = board
        .shape_counts()
        .iter()
        .map(|(shape, n)| format!("{}={n}", shape.as_str()))
        .collect();
    println!("{}", counts.join(" "));
    print!("{board}");
    println!();
}
