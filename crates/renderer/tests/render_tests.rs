//! Tests for the colouring policies.
//!
//! Covers grayscale scaling, no-data transparency, the spectrum, and the
//! naive versus connected water overlays on the basin fixture.

use dem_common::{flood_from_boundary, Grid};
use renderer::render::{DEFAULT_LAND_COLOR, DEFAULT_WATER_COLOR, GRAY_MID};
use renderer::{BaseColoring, Color, ColorRamp, RenderError, RenderOptions, Renderer};
use test_utils::{
    asc_document, basin_ring_asc, create_terrain_heights, ramp_asc, NODATA, SMALL_ASC,
};

fn basin() -> Grid {
    Grid::parse(&basin_ring_asc()).unwrap()
}

fn count_color(buffer: &renderer::PixelBuffer, color: Color) -> usize {
    buffer
        .as_bytes()
        .chunks_exact(4)
        .filter(|px| *px == color.to_rgba())
        .count()
}

// ============================================================================
// Grayscale
// ============================================================================

#[test]
fn test_grayscale_extremes() {
    let grid = Grid::parse(SMALL_ASC).unwrap();
    let image = Renderer::new(&grid).draw_grayscale();

    assert_eq!(image.width(), 4);
    assert_eq!(image.height(), 3);
    assert_eq!(image.as_bytes().len(), 4 * 3 * 4);
    // min 1 at the top-left, max 12 at the bottom-right
    assert_eq!(image.pixel(0, 0), Some(Color::gray(0)));
    assert_eq!(image.pixel(3, 2), Some(Color::gray(255)));
}

#[test]
fn test_grayscale_flat_grid_is_mid_gray() {
    let text = asc_document(3, 2, 1.0, NODATA, &[7.0; 6]);
    let grid = Grid::parse(&text).unwrap();
    let image = Renderer::new(&grid).draw_grayscale();

    assert_eq!(count_color(&image, Color::gray(GRAY_MID)), 6);
}

#[test]
fn test_grayscale_is_monotonic() {
    let grid = Grid::parse(&ramp_asc(8, 8)).unwrap();
    let image = Renderer::new(&grid).draw_grayscale();

    let levels: Vec<u8> = image.as_bytes().chunks_exact(4).map(|px| px[0]).collect();
    assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(levels[0], 0);
    assert_eq!(levels[63], 255);
}

#[test]
fn test_extreme_height_range() {
    let text = asc_document(3, 1, 1.0, NODATA, &[-1e308, 0.0, 1e308]);
    let grid = Grid::parse(&text).unwrap();
    let renderer = Renderer::new(&grid);

    let gray = renderer.draw_grayscale();
    assert_eq!(gray.pixel(0, 0), Some(Color::gray(0)));
    assert_eq!(gray.pixel(1, 0), Some(Color::gray(128)));
    assert_eq!(gray.pixel(2, 0), Some(Color::gray(255)));

    let spectrum = renderer.draw_rgb_gradient();
    assert_eq!(spectrum.pixel(0, 0), Some(Color::BLUE));
    assert_eq!(spectrum.pixel(1, 0), Some(Color::GREEN));
    assert_eq!(spectrum.pixel(2, 0), Some(Color::RED));
}

// ============================================================================
// No-data
// ============================================================================

#[test]
fn test_no_data_is_transparent_by_default() {
    let grid = Grid::parse(SMALL_ASC).unwrap();
    let renderer = Renderer::new(&grid);

    for image in [
        renderer.draw_grayscale(),
        renderer.draw_rgb_gradient(),
        renderer.draw_realwater(100.0, &BaseColoring::Grayscale),
    ] {
        assert_eq!(image.pixel(1, 1), Some(Color::transparent()));
        assert_eq!(count_color(&image, Color::transparent()), 1);
    }
}

#[test]
fn test_no_data_colour_is_configurable() {
    let grid = Grid::parse(SMALL_ASC).unwrap();
    let options = RenderOptions {
        no_data_color: Color::rgb(255, 0, 255),
        ..RenderOptions::default()
    };
    let image = Renderer::with_options(&grid, options).draw_grayscale();
    assert_eq!(image.pixel(1, 1), Some(Color::rgb(255, 0, 255)));
}

#[test]
fn test_all_no_data_grid_renders() {
    let text = asc_document(2, 2, 1.0, NODATA, &[NODATA; 4]);
    let grid = Grid::parse(&text).unwrap();
    let image = Renderer::new(&grid).draw_rgb_gradient();
    assert_eq!(count_color(&image, Color::transparent()), 4);
}

// ============================================================================
// Spectrum and ramps
// ============================================================================

#[test]
fn test_spectrum_end_colours() {
    let grid = Grid::parse(SMALL_ASC).unwrap();
    let image = Renderer::new(&grid).draw_rgb_gradient();

    assert_eq!(image.pixel(0, 0), Some(Color::BLUE));
    assert_eq!(image.pixel(3, 2), Some(Color::RED));
}

#[test]
fn test_custom_ramp() {
    let grid = Grid::parse(SMALL_ASC).unwrap();
    let ramp = ColorRamp::from_pairs([(5.0, Color::BLACK), (10.0, Color::WHITE)]).unwrap();
    let image = Renderer::new(&grid).draw_ramp(&ramp);

    // values clamp to the end colours outside the ramp
    assert_eq!(image.pixel(0, 0), Some(Color::BLACK));
    assert_eq!(image.pixel(3, 2), Some(Color::WHITE));
    assert_eq!(image, Renderer::new(&grid).draw(&BaseColoring::Ramp(ramp)));
}

// ============================================================================
// Water overlays
// ============================================================================

#[test]
fn test_sealevel_floods_enclosed_basin() {
    let grid = basin();
    let image = Renderer::new(&grid).draw_sealevel(10.0, &BaseColoring::Grayscale);

    assert_eq!(image.pixel(2, 2), Some(DEFAULT_WATER_COLOR));
    assert_eq!(count_color(&image, DEFAULT_WATER_COLOR), 10);
}

#[test]
fn test_realwater_leaves_enclosed_basin_dry() {
    let grid = basin();
    let image = Renderer::new(&grid).draw_realwater(10.0, &BaseColoring::Grayscale);

    assert_eq!(image.pixel(0, 0), Some(DEFAULT_WATER_COLOR));
    assert_eq!(image.pixel(2, 2), Some(Color::gray(0)));
    assert_eq!(count_color(&image, DEFAULT_WATER_COLOR), 9);
}

#[test]
fn test_realwater_over_flat_land() {
    let grid = basin();
    let image = Renderer::new(&grid).draw_realwater(60.0, &BaseColoring::Flat(DEFAULT_LAND_COLOR));

    // sea plus the 50 m shelf, the ring and the basin behind it stay land
    assert_eq!(count_color(&image, DEFAULT_WATER_COLOR), 16);
    assert_eq!(count_color(&image, DEFAULT_LAND_COLOR), 9);
}

#[test]
fn test_realwater_never_exceeds_sealevel() {
    let text = asc_document(24, 24, 1.0, NODATA, &create_terrain_heights(24, 24));
    let grid = Grid::parse(&text).unwrap();
    let renderer = Renderer::new(&grid);
    let land = BaseColoring::Flat(DEFAULT_LAND_COLOR);

    for level in [20.0, 40.0, 50.0, 60.0, 80.0] {
        let real = count_color(&renderer.draw_realwater(level, &land), DEFAULT_WATER_COLOR);
        let naive = count_color(&renderer.draw_sealevel(level, &land), DEFAULT_WATER_COLOR);
        assert!(real <= naive, "level {}: {} > {}", level, real, naive);
    }
}

#[test]
fn test_draw_mask_checks_shape() {
    let grid = basin();
    let other = Grid::parse(SMALL_ASC).unwrap();
    let mask = flood_from_boundary(&other, 5.0);

    let result = Renderer::new(&grid).draw_mask(&mask, &BaseColoring::Grayscale);
    assert!(matches!(
        result,
        Err(RenderError::MaskMismatch { mask_rows: 3, mask_cols: 4, rows: 5, cols: 5 })
    ));

    let own = flood_from_boundary(&grid, 10.0);
    let image = Renderer::new(&grid)
        .draw_mask(&own, &BaseColoring::Grayscale)
        .unwrap();
    assert_eq!(image, Renderer::new(&grid).draw_realwater(10.0, &BaseColoring::Grayscale));
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_flip_vertical() {
    let grid = basin();
    let flipped = Renderer::with_options(
        &grid,
        RenderOptions {
            flip_vertical: true,
            ..RenderOptions::default()
        },
    )
    .draw_grayscale();
    let normal = Renderer::new(&grid).draw_grayscale();

    // bottom grid row is 0 50 50 50 50
    assert_eq!(flipped.pixel(1, 0), Some(Color::gray(128)));
    assert_eq!(normal.pixel(1, 0), Some(Color::gray(0)));
    for y in 0..5 {
        for x in 0..5 {
            assert_eq!(flipped.pixel(x, y), normal.pixel(x, 4 - y));
        }
    }
}
