//! Error types for rendering and image export.

use thiserror::Error;

/// Errors raised while rendering or encoding images.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Pixel data does not match the stated image size.
    #[error("pixel buffer for {width}x{height} needs {expected} bytes, got {actual}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// A flood mask computed for a different grid.
    #[error("flood mask is {mask_rows}x{mask_cols} but grid is {rows}x{cols}")]
    MaskMismatch {
        mask_rows: usize,
        mask_cols: usize,
        rows: usize,
        cols: usize,
    },

    /// Animation frames must all share one size.
    #[error("frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameMismatch {
        index: usize,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    /// An animation was requested without frames.
    #[error("animation needs at least one frame")]
    NoFrames,

    /// Image dimensions do not fit the encoder.
    #[error("image of {width}x{height} is too large to encode")]
    TooLarge { width: usize, height: usize },

    /// Error from the `image` crate's encoders.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Grid query error.
    #[error(transparent)]
    Grid(#[from] dem_common::DemError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
