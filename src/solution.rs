//! Reading MaxSAT solver output and reporting the verdict.
//!
//! Recognized lines:
//! - `c ...` comment, ignored
//! - `s OPTIMUM FOUND` | `s UNSAT` | `s UNKNOWN`
//! - `o <cost>` intermediate optimum
//! - `v <lit> <lit> ...` model literals, possibly over several lines
//!
//! Blank lines are skipped; anything else is an error.

use std::io::{BufRead, Write};
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::geometry::Field;
use crate::grid::RiverGrid;
use crate::variables::Literal;

/// Variable index to value, as reported by the solver.
pub type Assignment = FxHashMap<u32, bool>;

/// Terminal state of a solver run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverOutcome {
    OptimumFound,
    Unsat,
    Unknown,
}

impl FromStr for SolverOutcome {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "OPTIMUM FOUND" => Ok(Self::OptimumFound),
            "UNSAT" => Ok(Self::Unsat),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(Error::UnknownResultToken(other.to_string())),
        }
    }
}

/// Everything a solver run printed that the decoder cares about.
#[derive(Clone, Debug)]
pub struct SolverReport {
    pub outcome: SolverOutcome,
    pub assignment: Assignment,
    /// Costs from `o` lines, in the order reported.
    pub intermediate_optimums: Vec<u64>,
}

impl SolverReport {
    /// The last reported cost, if any.
    pub fn final_cost(&self) -> Option<u64> {
        self.intermediate_optimums.last().copied()
    }
}

/// Parses solver output. A later `s` line overrides an earlier one.
pub fn read_report(reader: impl BufRead) -> Result<SolverReport> {
    let mut outcome: Option<SolverOutcome> = None;
    let mut assignment = Assignment::default();
    let mut intermediate_optimums = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let malformed = || Error::MalformedLine {
            line: number + 1,
            content: line.clone(),
        };

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        match tag {
            "c" => {}
            "s" => {
                let token = tokens.collect::<Vec<_>>().join(" ");
                outcome = Some(token.parse::<SolverOutcome>()?);
            }
            "o" => {
                let cost = tokens
                    .next()
                    .and_then(|cost| cost.parse::<u64>().ok())
                    .ok_or_else(malformed)?;
                intermediate_optimums.push(cost);
            }
            "v" => {
                for token in tokens {
                    let raw = token.parse::<i32>().map_err(|_| malformed())?;
                    // 0 terminates the model
                    if raw == 0 {
                        continue;
                    }
                    let literal = Literal::new(raw)?;
                    assignment.insert(literal.variable().index(), literal.is_positive());
                }
            }
            _ => return Err(malformed()),
        }
    }

    Ok(SolverReport {
        outcome: outcome.ok_or(Error::MissingResult)?,
        assignment,
        intermediate_optimums,
    })
}

/// Prints the user-facing verdict for `report`.
///
/// Only an optimum is decoded into a grid; the other outcomes never look at
/// the assignment.
pub fn write_verdict(writer: &mut impl Write, field: Field, report: &SolverReport) -> Result<()> {
    match report.outcome {
        SolverOutcome::OptimumFound => {
            let grid = RiverGrid::from_assignment(field, &report.assignment)?;
            writeln!(writer, "An optimum solution was found.")?;
            writeln!(writer)?;
            write!(writer, "{grid}")?;
            if let Some(link) = grid.share_link() {
                writeln!(writer, "see also: {link}")?;
            }
        }
        SolverOutcome::Unsat => writeln!(
            writer,
            "Error: The formula is unsatisfiable, therefore no valid solution exists"
        )?,
        SolverOutcome::Unknown => writeln!(
            writer,
            "Error: The solver gave up, the search was inconclusive"
        )?,
    }
    Ok(())
}
