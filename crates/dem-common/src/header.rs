//! Raster header metadata for Esri ASCII grids.

use serde::Serialize;

use crate::error::{DemError, Result};

/// How the lower-left origin coordinates are anchored.
///
/// Esri ASCII grids name the origin either `xllcorner`/`yllcorner` (outer
/// corner of the lower-left cell) or `xllcenter`/`yllcenter` (its centre).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    #[default]
    Corner,
    Center,
}

impl OriginKind {
    /// Header key for the x coordinate of the origin.
    pub fn x_key(self) -> &'static str {
        match self {
            OriginKind::Corner => "xllcorner",
            OriginKind::Center => "xllcenter",
        }
    }

    /// Header key for the y coordinate of the origin.
    pub fn y_key(self) -> &'static str {
        match self {
            OriginKind::Corner => "yllcorner",
            OriginKind::Center => "yllcenter",
        }
    }
}

/// Immutable header of an elevation raster.
///
/// Always holds positive dimensions, a positive finite cell size and finite
/// origin and no-data values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RasterHeader {
    ncols: usize,
    nrows: usize,
    x_origin: f64,
    y_origin: f64,
    origin_kind: OriginKind,
    cellsize: f64,
    nodata_value: f64,
}

impl RasterHeader {
    /// Create a validated header.
    pub fn new(
        ncols: usize,
        nrows: usize,
        x_origin: f64,
        y_origin: f64,
        origin_kind: OriginKind,
        cellsize: f64,
        nodata_value: f64,
    ) -> Result<Self> {
        if ncols == 0 || nrows == 0 {
            return Err(DemError::invalid_argument(format!(
                "grid dimensions must be positive, got {}x{}",
                nrows, ncols
            )));
        }
        if ncols.checked_mul(nrows).is_none() {
            return Err(DemError::invalid_argument(format!(
                "grid of {}x{} cells is too large",
                nrows, ncols
            )));
        }
        if !cellsize.is_finite() || cellsize <= 0.0 {
            return Err(DemError::invalid_argument(format!(
                "cellsize must be a positive number, got {}",
                cellsize
            )));
        }
        if !x_origin.is_finite() || !y_origin.is_finite() {
            return Err(DemError::invalid_argument("origin must be finite"));
        }
        if !nodata_value.is_finite() {
            return Err(DemError::invalid_argument("nodata_value must be finite"));
        }

        Ok(Self {
            ncols,
            nrows,
            x_origin,
            y_origin,
            origin_kind,
            cellsize,
            nodata_value,
        })
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// X coordinate of the lower-left origin.
    pub fn x_origin(&self) -> f64 {
        self.x_origin
    }

    /// Y coordinate of the lower-left origin.
    pub fn y_origin(&self) -> f64 {
        self.y_origin
    }

    pub fn origin_kind(&self) -> OriginKind {
        self.origin_kind
    }

    /// Map units per cell.
    pub fn cellsize(&self) -> f64 {
        self.cellsize
    }

    /// Sentinel marking a cell without a measurement.
    pub fn nodata_value(&self) -> f64 {
        self.nodata_value
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        // `new` rejects dimensions whose product overflows.
        self.ncols * self.nrows
    }

    /// Always false: a validated header has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of this header with new dimensions and cell size.
    pub(crate) fn resized(&self, ncols: usize, nrows: usize, cellsize: f64) -> Result<Self> {
        Self::new(
            ncols,
            nrows,
            self.x_origin,
            self.y_origin,
            self.origin_kind,
            cellsize,
            self.nodata_value,
        )
    }
}
