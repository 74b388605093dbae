//! Error types for elevation grid operations.

use thiserror::Error;

/// Errors that can occur while loading or querying an elevation grid.
#[derive(Error, Debug)]
pub enum DemError {
    /// The input text does not follow the ASCII grid layout.
    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    /// A cell coordinate outside the grid.
    #[error("cell ({row}, {col}) is outside grid bounds {rows}x{cols}")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// A statistic was requested over a grid where every cell is no-data.
    #[error("grid contains no data cells")]
    EmptyData,

    /// A caller-supplied argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DemError {
    /// Create a Format error for the given 1-based line.
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Whether this error came from malformed input rather than a bad query.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Result type for elevation grid operations.
pub type Result<T> = std::result::Result<T, DemError>;
