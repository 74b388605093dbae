//! Image rendering for elevation grids.
//!
//! Implements the colouring policies:
//! - Grayscale
//! - Colour ramp / RGB spectrum
//! - Sea-level and connected-water overlays
//!
//! and the encoders that write the resulting pixel buffers (PNG, animated GIF).

pub mod animation;
pub mod error;
pub mod gradient;
pub mod png;
pub mod render;
pub mod style;

pub use animation::{level_steps, sealevel_series, write_gif, WaterModel};
pub use error::{RenderError, Result};
pub use gradient::{Color, ColorRamp, ColorStop, RampError};
pub use png::{encode_png, write_png};
pub use render::{BaseColoring, PixelBuffer, RenderOptions, Renderer};
pub use style::{StyleDefinition, StyleError};
