//! Tests for the connected flood engine.

use dem_common::flood::{flood, NEIGHBOURS};
use dem_common::{below_level_mask, flood_from_boundary, FloodSource, Grid};
use test_utils::{
    asc_document, basin_ring_asc, create_terrain_heights, ramp_asc, with_no_data, NODATA,
};

fn terrain_grid(cols: usize, rows: usize) -> Grid {
    Grid::parse(&asc_document(cols, rows, 1.0, NODATA, &create_terrain_heights(cols, rows))).unwrap()
}

// ============================================================================
// Connectivity
// ============================================================================

#[test]
fn test_enclosed_basin_stays_dry() {
    let grid = Grid::parse(&basin_ring_asc()).unwrap();
    let mask = flood_from_boundary(&grid, 10.0);

    // Centre is below the level but walled in
    assert!(!mask.is_flooded(2, 2));

    // Sea along the top row and left column floods
    for i in 0..5 {
        assert!(mask.is_flooded(0, i), "top row col {}", i);
        assert!(mask.is_flooded(i, 0), "left column row {}", i);
    }
    assert_eq!(mask.flooded_count(), 9);
}

#[test]
fn test_naive_threshold_floods_basin() {
    let grid = Grid::parse(&basin_ring_asc()).unwrap();
    let naive = below_level_mask(&grid, 10.0);
    let connected = flood_from_boundary(&grid, 10.0);

    assert!(naive.is_flooded(2, 2));
    assert_eq!(naive.flooded_count(), 10);
    assert!(connected.is_subset_of(&naive));
}

#[test]
fn test_basin_floods_once_ring_is_overtopped() {
    let grid = Grid::parse(&basin_ring_asc()).unwrap();
    let mask = flood_from_boundary(&grid, 100.0);
    assert!(mask.is_flooded(2, 2));
    assert_eq!(mask.flooded_count(), 25);
}

#[test]
fn test_four_neighbours() {
    assert_eq!(NEIGHBOURS.len(), 4);
    assert!(NEIGHBOURS.iter().all(|(dr, dc)| (dr.abs() + dc.abs()) == 1));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_level_below_minimum_floods_nothing() {
    let grid = Grid::parse(&ramp_asc(6, 4)).unwrap();
    let mask = flood_from_boundary(&grid, -1.0);
    assert_eq!(mask.flooded_count(), 0);
    assert_eq!(mask.rows(), 4);
    assert_eq!(mask.cols(), 6);
}

#[test]
fn test_level_above_maximum_floods_everything() {
    let grid = terrain_grid(20, 15);
    let mask = flood_from_boundary(&grid, 1000.0);
    assert_eq!(mask.flooded_count(), grid.len());
}

#[test]
fn test_no_data_never_floods() {
    let cols = 7;
    let rows = 7;
    let data = with_no_data(create_terrain_heights(cols, rows), cols, 0, 3);
    let grid = Grid::parse(&asc_document(cols, rows, 1.0, NODATA, &data)).unwrap();

    for level in [-10_000.0, 0.0, 50.0, 1e9] {
        let mask = flood_from_boundary(&grid, level);
        assert!(!mask.is_flooded(0, 3), "flooded at level {}", level);

        let seeded = flood(&grid, level, FloodSource::BoundaryAndNoData).unwrap();
        assert!(!seeded.is_flooded(0, 3), "flooded at level {}", level);
    }
}

#[test]
fn test_no_data_does_not_propagate() {
    // A column of no-data splits the grid; the right half is sealed off by
    // high ground everywhere else.
    #[rustfmt::skip]
    let data = vec![
        1.0, NODATA, 9.0, 9.0, 9.0,
        1.0, NODATA, 1.0, 1.0, 9.0,
        1.0, NODATA, 9.0, 9.0, 9.0,
    ];
    let grid = Grid::parse(&asc_document(5, 3, 1.0, NODATA, &data)).unwrap();
    let mask = flood_from_boundary(&grid, 2.0);
    assert!(mask.is_flooded(1, 0));
    assert!(!mask.is_flooded(1, 2));
    assert!(!mask.is_flooded(1, 3));
}

// ============================================================================
// Monotonicity
// ============================================================================

#[test]
fn test_flood_is_monotonic_in_level() {
    let grid = terrain_grid(40, 30);
    let levels: Vec<f64> = (0..=20).map(|i| i as f64 * 5.0).collect();

    let masks: Vec<_> = levels
        .iter()
        .map(|&level| flood_from_boundary(&grid, level))
        .collect();

    for pair in masks.windows(2) {
        assert!(pair[0].is_subset_of(&pair[1]));
        assert!(pair[0].flooded_count() <= pair[1].flooded_count());
    }
}

#[test]
fn test_connected_is_subset_of_naive() {
    let grid = terrain_grid(32, 32);
    for level in [20.0, 40.0, 60.0, 80.0] {
        let connected = flood_from_boundary(&grid, level);
        // Connected uses <= while the naive mask is strict, so compare
        // against a level just above.
        let naive = below_level_mask(&grid, level + 1e-9);
        assert!(connected.is_subset_of(&naive), "level {}", level);
    }
}

#[test]
fn test_source_cell_flood_is_subset_of_full_flood() {
    let grid = terrain_grid(24, 24);
    let level = 60.0;
    let full = flood_from_boundary(&grid, level);

    let (row, col) = (0..grid.rows())
        .flat_map(|r| (0..grid.cols()).map(move |c| (r, c)))
        .find(|&(r, c)| grid.is_boundary(r, c) && full.is_flooded(r, c))
        .expect("some boundary cell floods at this level");

    let from_source = flood(&grid, level, FloodSource::Cell { row, col }).unwrap();
    assert!(from_source.is_flooded(row, col));
    assert!(from_source.is_subset_of(&full));
}
