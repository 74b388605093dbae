//! Connected-region flood simulation.
//!
//! A naive sea-level threshold marks every cell below the level as water.
//! The flood engine instead floods only cells that water can actually reach:
//! starting from open water (the grid edge, optionally no-data areas, or a
//! single source cell) it spreads through neighbouring cells at or below the
//! level. Low cells enclosed by higher terrain stay dry.

use tracing::debug;

use crate::error::{DemError, Result};
use crate::grid::Grid;

/// Neighbour offsets used to spread water: 4-connected (N, S, W, E).
///
/// Diagonal pinch points between two higher cells therefore block the flood.
pub const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Where water enters the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloodSource {
    /// Every edge cell is open sea.
    #[default]
    Boundary,
    /// Edge cells plus cells next to a no-data cell, for rasters whose sea is
    /// clipped out as no-data.
    BoundaryAndNoData,
    /// A single source cell.
    Cell { row: usize, col: usize },
}

/// Boolean matrix with the grid's dimensions; `true` marks connected water.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodMask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl FloodMask {
    fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether (row, col) is flooded. Out-of-range cells are dry.
    pub fn is_flooded(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Flags in row-major order.
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    pub fn flooded_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Whether every cell flooded here is also flooded in `other`.
    pub fn is_subset_of(&self, other: &FloodMask) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(&mine, &theirs)| !mine || theirs)
    }
}

/// Flood from the grid edge at `level`.
pub fn flood_from_boundary(grid: &Grid, level: f64) -> FloodMask {
    let seeds = boundary_cells(grid);
    spread(grid, level, seeds)
}

/// Flood at `level` from the given source.
///
/// A [`FloodSource::Cell`] must lie inside the grid, hold data and sit at or
/// below `level`.
pub fn flood(grid: &Grid, level: f64, source: FloodSource) -> Result<FloodMask> {
    let mask = match source {
        FloodSource::Boundary => flood_from_boundary(grid, level),
        FloodSource::BoundaryAndNoData => {
            let mut seeds = boundary_cells(grid);
            seeds.extend(no_data_shore_cells(grid));
            spread(grid, level, seeds)
        }
        FloodSource::Cell { row, col } => {
            let height = grid.height_at(row, col)?;
            if grid.is_no_data_value(height) {
                return Err(DemError::invalid_argument(format!(
                    "water source ({}, {}) has no data",
                    row, col
                )));
            }
            if height > level {
                return Err(DemError::invalid_argument(format!(
                    "water source ({}, {}) at {} is above the level {}",
                    row, col, height, level
                )));
            }
            spread(grid, level, vec![grid.index(row, col)])
        }
    };

    Ok(mask)
}

/// Cells strictly below `level`, connected or not.
pub fn below_level_mask(grid: &Grid, level: f64) -> FloodMask {
    let cells = (0..grid.len())
        .map(|idx| grid.value_at_index(idx).is_some_and(|h| h < level))
        .collect();

    FloodMask {
        rows: grid.rows(),
        cols: grid.cols(),
        cells,
    }
}

/// Iterative flood fill from `seeds` through cells at or below `level`.
///
/// A cell is marked when it is pushed, so each enters the worklist at most
/// once.
fn spread(grid: &Grid, level: f64, seeds: Vec<usize>) -> FloodMask {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut mask = FloodMask::empty(rows, cols);
    let floodable = |idx: usize| grid.value_at_index(idx).is_some_and(|h| h <= level);

    let mut worklist: Vec<usize> = Vec::with_capacity(seeds.len());
    for idx in seeds {
        if !mask.cells[idx] && floodable(idx) {
            mask.cells[idx] = true;
            worklist.push(idx);
        }
    }

    while let Some(idx) = worklist.pop() {
        let row = idx / cols;
        let col = idx % cols;

        for (dr, dc) in NEIGHBOURS {
            let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if nr >= rows || nc >= cols {
                continue;
            }
            let nidx = nr * cols + nc;
            if !mask.cells[nidx] && floodable(nidx) {
                mask.cells[nidx] = true;
                worklist.push(nidx);
            }
        }
    }

    debug!(
        level,
        flooded = mask.flooded_count(),
        cells = grid.len(),
        "Flood fill complete"
    );

    mask
}

fn boundary_cells(grid: &Grid) -> Vec<usize> {
    let rows = grid.rows();
    let cols = grid.cols();
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|&(row, col)| grid.is_boundary(row, col))
        .map(|(row, col)| grid.index(row, col))
        .collect()
}

/// Data cells with at least one no-data neighbour.
fn no_data_shore_cells(grid: &Grid) -> Vec<usize> {
    let rows = grid.rows();
    let cols = grid.cols();
    let mut shore = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let idx = grid.index(row, col);
            if grid.value_at_index(idx).is_none() {
                continue;
            }
            let touches_no_data = NEIGHBOURS.iter().any(|&(dr, dc)| {
                match (row.checked_add_signed(dr), col.checked_add_signed(dc)) {
                    (Some(nr), Some(nc)) if nr < rows && nc < cols => {
                        grid.value_at_index(grid.index(nr, nc)).is_none()
                    }
                    _ => false,
                }
            });
            if touches_no_data {
                shore.push(idx);
            }
        }
    }

    shore
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{OriginKind, RasterHeader};

    const ND: f64 = -9999.0;

    fn grid(cols: usize, rows: usize, data: Vec<f64>) -> Grid {
        let header = RasterHeader::new(cols, rows, 0.0, 0.0, OriginKind::Corner, 1.0, ND).unwrap();
        Grid::new(header, data).unwrap()
    }

    #[test]
    fn test_diagonal_pinch_blocks_flood() {
        // The low cell at (1, 1) only touches the low edge cell (0, 0)
        // diagonally.
        #[rustfmt::skip]
        let g = grid(3, 3, vec![
            0.0, 9.0, 9.0,
            9.0, 0.0, 9.0,
            9.0, 9.0, 9.0,
        ]);
        let mask = flood_from_boundary(&g, 1.0);
        assert!(mask.is_flooded(0, 0));
        assert!(!mask.is_flooded(1, 1));
        assert_eq!(mask.flooded_count(), 1);
    }

    #[test]
    fn test_level_is_inclusive() {
        let g = grid(2, 1, vec![5.0, 6.0]);
        let mask = flood_from_boundary(&g, 5.0);
        assert!(mask.is_flooded(0, 0));
        assert!(!mask.is_flooded(0, 1));
    }

    #[test]
    fn test_no_data_seeds_shore() {
        #[rustfmt::skip]
        let g = grid(5, 5, vec![
            9.0, 9.0, 9.0, 9.0, 9.0,
            9.0, 9.0, 9.0, 9.0, 9.0,
            9.0, 1.0,  ND, 9.0, 9.0,
            9.0, 9.0, 9.0, 9.0, 9.0,
            9.0, 9.0, 9.0, 9.0, 9.0,
        ]);
        let boundary = flood(&g, 2.0, FloodSource::Boundary).unwrap();
        assert_eq!(boundary.flooded_count(), 0);

        let with_no_data = flood(&g, 2.0, FloodSource::BoundaryAndNoData).unwrap();
        assert!(with_no_data.is_flooded(2, 1));
        assert!(!with_no_data.is_flooded(2, 2));
        assert_eq!(with_no_data.flooded_count(), 1);
    }

    #[test]
    fn test_single_source_cell() {
        #[rustfmt::skip]
        let g = grid(5, 1, vec![1.0, 1.0, 9.0, 1.0, 1.0]);
        let mask = flood(&g, 2.0, FloodSource::Cell { row: 0, col: 4 }).unwrap();
        assert!(!mask.is_flooded(0, 0));
        assert!(mask.is_flooded(0, 3));
        assert!(mask.is_flooded(0, 4));
    }

    #[test]
    fn test_source_cell_validation() {
        let g = grid(2, 1, vec![ND, 5.0]);
        assert!(matches!(
            flood(&g, 2.0, FloodSource::Cell { row: 0, col: 0 }),
            Err(DemError::InvalidArgument(_))
        ));
        assert!(matches!(
            flood(&g, 2.0, FloodSource::Cell { row: 0, col: 1 }),
            Err(DemError::InvalidArgument(_))
        ));
        assert!(matches!(
            flood(&g, 2.0, FloodSource::Cell { row: 1, col: 0 }),
            Err(DemError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_below_level_is_strict_and_skips_no_data() {
        let g = grid(3, 1, vec![1.0, 2.0, ND]);
        let mask = below_level_mask(&g, 2.0);
        assert_eq!(mask.as_slice(), &[true, false, false]);
    }

    #[test]
    fn test_subset_requires_same_shape() {
        let a = FloodMask::empty(2, 2);
        let b = FloodMask::empty(1, 4);
        assert!(!a.is_subset_of(&b));
        assert!(a.is_subset_of(&a.clone()));
    }
}
