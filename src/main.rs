//! River and Thicket MaxSAT Encoder
//!
//! `generate` writes the WCNF instance for a field; pipe it into a MaxSAT
//! solver, then feed the solver's output to `decode` with the same
//! dimensions to see the layout.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use river_maxsat::solution::{self, SolverOutcome};
use river_maxsat::{wcnf, Field, Formula, Result, RiverGrid};

/// Encodes the river and thicket puzzle as MaxSAT and decodes solver answers.
#[derive(Parser)]
#[command(name = "river-maxsat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Field width in tiles.
    #[arg(long, global = true, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Field height in tiles.
    #[arg(long, global = true, default_value_t = 12, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,
}

#[derive(Subcommand)]
enum Command {
    /// Write the WCNF instance for the field.
    Generate {
        /// Write to this file instead of standard output.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Read solver output and print the resulting layout.
    Decode {
        /// Read from this file instead of standard input.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = Field::new(cli.width as usize, cli.height as usize).and_then(|field| {
        match cli.command {
            Some(Command::Generate { output }) => run_generate(field, output),
            Some(Command::Decode { input }) => run_decode(field, input),
            // default: generate to standard output
            None => run_generate(field, None),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Encodes the field and writes the document.
fn run_generate(field: Field, output: Option<PathBuf>) -> Result<()> {
    let formula = Formula::encode(field)?;

    match output {
        Some(path) => wcnf::write_document(&mut File::create(&path)?, &formula)?,
        None => wcnf::write_document(&mut io::stdout().lock(), &formula)?,
    }

    eprintln!(
        "Encoded {}x{} field: {} variables, {} clauses, top weight {}",
        field.width(),
        field.height(),
        formula.variable_count(),
        formula.clause_count(),
        formula.top()
    );
    Ok(())
}

/// Parses solver output and prints the verdict.
fn run_decode(field: Field, input: Option<PathBuf>) -> Result<()> {
    let report = match input {
        Some(path) => solution::read_report(BufReader::new(File::open(&path)?))?,
        None => solution::read_report(io::stdin().lock())?,
    };

    let mut stdout = io::stdout().lock();
    solution::write_verdict(&mut stdout, field, &report)?;
    stdout.flush()?;

    if report.outcome == SolverOutcome::OptimumFound {
        let grid = RiverGrid::from_assignment(field, &report.assignment)?;
        if let Some(cost) = report.final_cost() {
            eprintln!("Solver cost {}, score {}", cost, grid.score());
        }
        let components = grid.river_components();
        if components > 1 {
            eprintln!("Warning: the river is split into {} disconnected parts", components);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dimensions() {
        let cli = Cli::try_parse_from(["river-maxsat"]).unwrap();
        assert_eq!((cli.width, cli.height), (5, 12));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_dimensions_after_subcommand() {
        let cli = Cli::try_parse_from(["river-maxsat", "decode", "--width", "3", "--height", "4"])
            .unwrap();
        assert_eq!((cli.width, cli.height), (3, 4));
        assert!(matches!(cli.command, Some(Command::Decode { input: None })));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        assert!(Cli::try_parse_from(["river-maxsat", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["river-maxsat", "--height", "-2"]).is_err());
    }
}
