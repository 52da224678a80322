//! Error types shared by the encoder and the solver-output decoder.

use thiserror::Error;

/// Errors that can occur while encoding a field or decoding a solver answer.
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height is zero, or the field does not fit the literal range.
    #[error("invalid field dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A clause was empty, contained literal 0, or carried a zero weight.
    #[error("invalid clause: {0}")]
    InvalidClause(String),

    /// The solver reported a result the decoder cannot classify.
    #[error("could not parse result: 's {0}'")]
    UnknownResultToken(String),

    /// The solver model has no value for a tile variable.
    #[error("unknown assignment for tile ({x},{y})")]
    MissingAssignment { x: usize, y: usize },

    /// A solver output line with an unrecognized tag or an unparsable number.
    #[error("malformed solver output at line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    /// The solver output ended without an `s` line.
    #[error("solver output contains no result line")]
    MissingResult,

    /// A textual grid contained something other than `W` or `T`.
    #[error("invalid tile character '{0}'")]
    InvalidTile(char),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for encoder and decoder operations.
pub type Result<T> = std::result::Result<T, Error>;
