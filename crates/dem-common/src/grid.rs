//! The elevation grid store.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::ascii;
use crate::error::{DemError, Result};
use crate::header::RasterHeader;

/// A rectangular matrix of elevation samples in row-major order.
///
/// Row 0 is the northernmost row of the file. Cells equal to the header's
/// no-data value carry no measurement. A grid is immutable once built; every
/// derived product borrows it read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    header: RasterHeader,
    data: Vec<f64>,
}

impl Grid {
    /// Build a grid from a header and `nrows * ncols` finite samples.
    pub fn new(header: RasterHeader, data: Vec<f64>) -> Result<Self> {
        if data.len() != header.len() {
            return Err(DemError::invalid_argument(format!(
                "expected {} samples for a {}x{} grid, got {}",
                header.len(),
                header.nrows(),
                header.ncols(),
                data.len()
            )));
        }
        if let Some(idx) = data.iter().position(|v| !v.is_finite()) {
            return Err(DemError::invalid_argument(format!(
                "sample {} is not a finite number",
                idx
            )));
        }

        Ok(Self { header, data })
    }

    /// Parse an ASCII grid document.
    pub fn parse(text: &str) -> Result<Self> {
        ascii::parse(text)
    }

    /// Load an ASCII grid file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let grid = Self::parse(&text)?;

        info!(
            path = %path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            cellsize = grid.header.cellsize(),
            "Loaded elevation grid"
        );

        Ok(grid)
    }

    /// Serialize to the ASCII grid format.
    pub fn to_ascii(&self) -> String {
        ascii::to_ascii(self)
    }

    /// Write the grid to `path` in the ASCII grid format.
    pub fn write_ascii(&self, path: impl AsRef<Path>) -> Result<()> {
        ascii::write_ascii(self, path)
    }

    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    pub fn rows(&self) -> usize {
        self.header.nrows()
    }

    pub fn cols(&self) -> usize {
        self.header.ncols()
    }

    /// Total number of cells, including no-data cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw samples in row-major order, no-data sentinels included.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Samples of one row, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows() {
            return None;
        }
        let start = row * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// Raw sample at (row, col), no-data sentinel included.
    pub fn height_at(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.checked_index(row, col)?;
        Ok(self.data[idx])
    }

    /// Whether the cell at (row, col) holds the no-data sentinel.
    pub fn is_no_data(&self, row: usize, col: usize) -> Result<bool> {
        let idx = self.checked_index(row, col)?;
        Ok(self.is_no_data_value(self.data[idx]))
    }

    /// The measured height at (row, col), or `None` for no-data or
    /// out-of-range cells.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.value_at_index(self.index(row, col))
    }

    /// Whether `value` equals this grid's no-data sentinel.
    pub fn is_no_data_value(&self, value: f64) -> bool {
        value == self.header.nodata_value()
    }

    /// All measured heights, skipping no-data cells.
    pub fn valid_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .copied()
            .filter(move |&v| !self.is_no_data_value(v))
    }

    /// Whether (row, col) lies on the outer edge of the grid.
    pub fn is_boundary(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows() || col + 1 == self.cols()
    }

    /// A coarser copy keeping every `factor`-th row and column.
    ///
    /// Sampling starts at row 0 and column 0; the cell size grows by
    /// `factor`. A factor of 1 returns an identical grid.
    pub fn downsample(&self, factor: usize) -> Result<Grid> {
        if factor == 0 {
            return Err(DemError::invalid_argument("downsample factor must be at least 1"));
        }

        let new_rows = self.rows().div_ceil(factor);
        let new_cols = self.cols().div_ceil(factor);

        let mut data = Vec::with_capacity(new_rows * new_cols);
        for row in (0..self.rows()).step_by(factor) {
            let start = row * self.cols();
            data.extend(self.data[start..start + self.cols()].iter().step_by(factor));
        }

        let header = self
            .header
            .resized(new_cols, new_rows, self.header.cellsize() * factor as f64)?;

        debug!(
            factor,
            from_rows = self.rows(),
            from_cols = self.cols(),
            rows = new_rows,
            cols = new_cols,
            "Downsampled grid"
        );

        Grid::new(header, data)
    }

    /// Flat index of (row, col). Callers must have checked bounds.
    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// Measured height at a flat index, `None` for no-data.
    pub(crate) fn value_at_index(&self, idx: usize) -> Option<f64> {
        let v = self.data[idx];
        (!self.is_no_data_value(v)).then_some(v)
    }

    fn checked_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows() || col >= self.cols() {
            return Err(DemError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(self.index(row, col))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valid = self.valid_values().count();
        write!(
            f,
            "{} rows x {} columns, cellsize {}, nodata {} ({} of {} cells with data)",
            self.rows(),
            self.cols(),
            self.header.cellsize(),
            self.header.nodata_value(),
            valid,
            self.len()
        )
    }
}
