//! WCNF text output.
//!
//! Layout of a document:
//! - `c ` comment block describing the puzzle and the instance
//! - `p wcnf <variables> <clauses> <top>`
//! - one `<weight> <literal>... 0` line per clause, in generation order,
//!   with `top` as the weight of hard clauses

use std::io::{BufWriter, Write};

use crate::clauses::Weight;
use crate::formula::Formula;

const PROBLEM_DESCRIPTION: &str = "\
c Problem:
c * Based on this reddit post:
c   https://www.reddit.com/r/AskComputerScience/comments/m4mxgq/is_this_problem_intractable/
c * Given an m x n region, place \"thickets\" and \"rivers\" to generate the highest possible score.
c * A thicket which has no rivers above, below, left, or right of it, is worth 2 points.
c * A thicket with 1 adjacency is worth 4 points.
c * A thicket with 2 adjacency is worth 8 points.
c * A thicket with 3 adjacency is worth 12 points.
c * A thicket with full (4) adjacency is worth 16 points.
c * A river must begin on the border of a region and it cannot branch,
c   in other words, you can't ever backtrack on a river.
c
c This is a MaxSAT translation of an instance of the above problem.
c
";

/// Writes the comment block, header and clauses of `formula`.
pub fn write_document(writer: &mut impl Write, formula: &Formula) -> std::io::Result<()> {
    let mut writer = BufWriter::new(writer);
    write_comments(&mut writer, formula)?;
    write_formula(&mut writer, formula)?;
    writer.flush()
}

/// Writes the `c ` comment block.
pub fn write_comments(writer: &mut impl Write, formula: &Formula) -> std::io::Result<()> {
    let field = formula.field();
    let variables = formula.variables();
    write!(writer, "{PROBLEM_DESCRIPTION}")?;
    writeln!(
        writer,
        "c Problem instance: {}x{} (width x height)",
        field.width(),
        field.height()
    )?;
    writeln!(writer, "c")?;
    writeln!(
        writer,
        "c In this translation false='thicket' and true='river' for variables 1...{}",
        variables.last_tile_variable()
    )
}

/// Writes the `p wcnf` header and one line per clause.
pub fn write_formula(writer: &mut impl Write, formula: &Formula) -> std::io::Result<()> {
    let top = formula.top();
    writeln!(
        writer,
        "p wcnf {} {} {}",
        formula.variable_count(),
        formula.clause_count(),
        top
    )?;

    for clause in formula.clauses() {
        let weight = match clause.weight() {
            Weight::Hard => top,
            Weight::Soft(weight) => weight.get(),
        };
        write!(writer, "{weight}")?;
        for literal in clause.literals() {
            write!(writer, " {literal}")?;
        }
        writeln!(writer, " 0")?;
    }
    Ok(())
}
