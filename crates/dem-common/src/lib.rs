//! Elevation grid model shared by the renderer, mesh exporter and CLI.
//!
//! - [`Grid`]: parsed Esri ASCII grid with its [`RasterHeader`]
//! - statistics: min/max/mean and histograms over measured cells
//! - [`flood`]: boundary-connected flood simulation

pub mod ascii;
pub mod error;
pub mod flood;
pub mod grid;
pub mod header;
pub mod stats;

pub use error::{DemError, Result};
pub use flood::{below_level_mask, flood, flood_from_boundary, FloodMask, FloodSource};
pub use grid::Grid;
pub use header::{OriginKind, RasterHeader};
pub use stats::{normalize, GridStats, Histogram};
