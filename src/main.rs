//! Command line front end: read a scramble's facelet net from a file, solve
//! it, and write the quarter-turn letters to the output file. Diagnostics go
//! to stderr through the logger; the output file only ever holds the
//! solution line (empty when the search ran out of time).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{warn, LevelFilter};
use thiserror::Error;

use twophase::cube333::facelet::{ParseError, StickerCube};
use twophase::cube333::two_phase_solver::Solver;
use twophase::cube333::CubieCube;

/// Solve a scrambled 3x3x3 cube described as a 9 line facelet net.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// File holding the scramble's facelet net.
    input: PathBuf,
    /// File the solution line is written to.
    output: PathBuf,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), RunError> {
    let net: StickerCube = fs::read_to_string(&cli.input)?.parse()?;
    let cube = CubieCube::try_from(&net)?;

    let solver = Solver::new();
    let line = match solver.solve(&cube) {
        Some(moves) => moves.iter().map(|m| m.letter()).collect::<String>(),
        None => {
            warn!("no solution within the time limit, writing an empty one");
            String::new()
        }
    };

    fs::write(&cli.output, line + "\n")?;
    Ok(())
}
