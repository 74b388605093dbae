//! Error types for mesh export.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeshError {
    /// Exaggeration or offset is not a finite number.
    #[error("invalid mesh options: {0}")]
    InvalidOptions(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MeshError>;
