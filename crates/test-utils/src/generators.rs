//! Synthetic elevation data for tests and benchmarks.
//!
//! These generators create predictable, verifiable terrain patterns that can
//! be used across the test suite. Heights are returned row-major, row 0 first.

/// No-data sentinel used by every generated document.
pub const NODATA: f64 = -9999.0;

/// Render an ASCII grid document.
///
/// # Panics
///
/// Panics if `data.len() != cols * rows`.
pub fn asc_document(cols: usize, rows: usize, cellsize: f64, nodata: f64, data: &[f64]) -> String {
    assert_eq!(data.len(), cols * rows, "data does not match {}x{}", rows, cols);

    let mut out = format!(
        "ncols {}\nnrows {}\nxllcorner 0\nyllcorner 0\ncellsize {}\nNODATA_value {}\n",
        cols, rows, cellsize, nodata
    );
    for row in data.chunks(cols) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Creates heights where each cell is `row * cols + col`.
///
/// # Example
///
/// ```
/// use test_utils::create_ramp_heights;
///
/// let heights = create_ramp_heights(4, 3);
/// assert_eq!(heights.len(), 12);
/// assert_eq!(heights[5], 5.0); // row 1, col 1
/// ```
pub fn create_ramp_heights(cols: usize, rows: usize) -> Vec<f64> {
    (0..cols * rows).map(|i| i as f64).collect()
}

/// ASCII document for [`create_ramp_heights`] with cell size 1.
pub fn ramp_asc(cols: usize, rows: usize) -> String {
    asc_document(cols, rows, 1.0, NODATA, &create_ramp_heights(cols, rows))
}

/// A 5x5 coast with an enclosed basin.
///
/// ```text
///   0   0   0   0   0
///   0 100 100 100  50
///   0 100   0 100  50
///   0 100 100 100  50
///   0  50  50  50  50
/// ```
///
/// The top row and left column are sea at height 0. The centre cell is also
/// at 0 but walled in by a ring of 100s, so a flood at any level below 100
/// must leave it dry.
pub fn create_basin_ring_heights() -> Vec<f64> {
    vec![
        0.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 100.0, 100.0, 100.0, 50.0, //
        0.0, 100.0, 0.0, 100.0, 50.0, //
        0.0, 100.0, 100.0, 100.0, 50.0, //
        0.0, 50.0, 50.0, 50.0, 50.0,
    ]
}

/// ASCII document for [`create_basin_ring_heights`].
pub fn basin_ring_asc() -> String {
    asc_document(5, 5, 1.0, NODATA, &create_basin_ring_heights())
}

/// Rolling terrain with several local basins and ridges.
///
/// Heights stay within roughly 10..90, which makes it useful for sweeping
/// water levels.
pub fn create_terrain_heights(cols: usize, rows: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as f64;
            let y = row as f64;
            let h = 50.0 + 30.0 * (x * 0.7).sin() * (y * 0.5).cos() + 10.0 * ((x + y) * 0.3).sin();
            data.push(h);
        }
    }
    data
}

/// Replace the cell at (row, col) with the no-data sentinel.
pub fn with_no_data(mut data: Vec<f64>, cols: usize, row: usize, col: usize) -> Vec<f64> {
    data[row * cols + col] = NODATA;
    data
}
