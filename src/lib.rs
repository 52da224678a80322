//! River and Thicket MaxSAT Encoder
//!
//! Translates the river and thicket tile puzzle into a weighted CNF (WCNF)
//! instance for an external MaxSAT solver, and decodes the solver's answer
//! back into a grid.
//!
//! Every tile of a `width x height` field is either river or thicket. A
//! thicket earns 4 points per adjacent river tile, or 2 points when no river
//! touches it. The river must run from border to border without branching.

pub mod clauses;
pub mod constraints;
pub mod error;
pub mod formula;
pub mod geometry;
pub mod grid;
pub mod solution;
pub mod variables;
pub mod wcnf;

pub use error::{Error, Result};
pub use formula::Formula;
pub use geometry::Field;
pub use grid::RiverGrid;
