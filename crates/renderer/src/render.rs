//! Colouring policies that turn an elevation grid into an RGBA image.
//!
//! Every policy maps one cell to one pixel. No-data cells always take
//! [`RenderOptions::no_data_color`]. Water overlays (sea level, connected
//! flood) paint their cells with [`RenderOptions::water_color`] and let every
//! other cell fall through to a [`BaseColoring`].

use std::borrow::Cow;

use dem_common::{below_level_mask, flood_from_boundary, normalize, FloodMask, Grid};
use rayon::prelude::*;
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::gradient::{Color, ColorRamp};

/// Gray used for every cell of a perfectly flat grid.
pub const GRAY_MID: u8 = 128;

pub const DEFAULT_WATER_COLOR: Color = Color::rgb(132, 194, 251);
pub const DEFAULT_LAND_COLOR: Color = Color::rgb(252, 255, 212);

/// An RGBA8 image, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Wrap existing RGBA bytes (4 per pixel).
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA bytes, 4 per pixel, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }
}

/// How cells that are neither no-data nor water are coloured.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseColoring {
    /// Linear gray from the grid minimum (black) to maximum (white).
    Grayscale,
    /// Blue-green-red spectrum spanning the grid's height range.
    Spectrum,
    /// A caller-supplied ramp in height units.
    Ramp(ColorRamp),
    /// One colour for all land.
    Flat(Color),
}

impl BaseColoring {
    fn name(&self) -> &'static str {
        match self {
            BaseColoring::Grayscale => "grayscale",
            BaseColoring::Spectrum => "spectrum",
            BaseColoring::Ramp(_) => "ramp",
            BaseColoring::Flat(_) => "flat",
        }
    }
}

/// Colours and orientation shared by all policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub no_data_color: Color,
    pub water_color: Color,
    /// Put the last grid row at the top of the image.
    pub flip_vertical: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            no_data_color: Color::transparent(),
            water_color: DEFAULT_WATER_COLOR,
            flip_vertical: false,
        }
    }
}

/// Map a height to a gray level given the grid's minimum and maximum.
///
/// A zero range yields [`GRAY_MID`].
pub fn grayscale_level(height: f64, min: f64, max: f64) -> u8 {
    if max <= min {
        return GRAY_MID;
    }
    (normalize(height, min, max) * 255.0).round() as u8
}

/// A base colouring with its grid-dependent parameters resolved.
enum Colorizer<'r> {
    Gray { min: f64, max: f64 },
    Ramp(Cow<'r, ColorRamp>),
    Flat(Color),
}

impl<'r> Colorizer<'r> {
    fn resolve(base: &'r BaseColoring, grid: &Grid, fallback: Color) -> Self {
        // Without measured cells only the no-data colour is ever used, so the
        // fallback never reaches a pixel.
        match base {
            BaseColoring::Grayscale => match grid.stats() {
                Ok(s) => Colorizer::Gray {
                    min: s.min,
                    max: s.max,
                },
                Err(_) => Colorizer::Flat(fallback),
            },
            BaseColoring::Spectrum => match grid.stats() {
                Ok(s) => Colorizer::Ramp(Cow::Owned(ColorRamp::spectrum(s.min, s.max))),
                Err(_) => Colorizer::Flat(fallback),
            },
            BaseColoring::Ramp(ramp) => Colorizer::Ramp(Cow::Borrowed(ramp)),
            BaseColoring::Flat(color) => Colorizer::Flat(*color),
        }
    }

    fn color(&self, height: f64) -> Color {
        match self {
            Colorizer::Gray { min, max } => Color::gray(grayscale_level(height, *min, *max)),
            Colorizer::Ramp(ramp) => ramp.evaluate(height),
            Colorizer::Flat(color) => *color,
        }
    }
}

/// Renders one grid under the configured options.
///
/// The renderer borrows the grid and returns a fresh [`PixelBuffer`] per
/// call; it performs no I/O.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    grid: &'a Grid,
    options: RenderOptions,
}

impl<'a> Renderer<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self::with_options(grid, RenderOptions::default())
    }

    pub fn with_options(grid: &'a Grid, options: RenderOptions) -> Self {
        Self { grid, options }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Grid minimum maps to 0, maximum to 255.
    pub fn draw_grayscale(&self) -> PixelBuffer {
        self.draw(&BaseColoring::Grayscale)
    }

    /// Blue-green-red spectrum over the grid's height range.
    pub fn draw_rgb_gradient(&self) -> PixelBuffer {
        self.draw(&BaseColoring::Spectrum)
    }

    /// Colour every cell through `ramp`.
    pub fn draw_ramp(&self, ramp: &ColorRamp) -> PixelBuffer {
        self.paint(Colorizer::Ramp(Cow::Borrowed(ramp)), "ramp", None)
    }

    /// Colour every cell with `base`, no water.
    pub fn draw(&self, base: &BaseColoring) -> PixelBuffer {
        self.paint_base(base, None)
    }

    /// Cells strictly below `level` are water, connected or not.
    pub fn draw_sealevel(&self, level: f64, base: &BaseColoring) -> PixelBuffer {
        let mask = below_level_mask(self.grid, level);
        self.paint_base(base, Some(&mask))
    }

    /// Only water reachable from the grid edge at `level` is drawn.
    pub fn draw_realwater(&self, level: f64, base: &BaseColoring) -> PixelBuffer {
        let mask = flood_from_boundary(self.grid, level);
        self.paint_base(base, Some(&mask))
    }

    /// Overlay an arbitrary flood mask.
    pub fn draw_mask(&self, mask: &FloodMask, base: &BaseColoring) -> Result<PixelBuffer> {
        if mask.rows() != self.grid.rows() || mask.cols() != self.grid.cols() {
            return Err(RenderError::MaskMismatch {
                mask_rows: mask.rows(),
                mask_cols: mask.cols(),
                rows: self.grid.rows(),
                cols: self.grid.cols(),
            });
        }
        Ok(self.paint_base(base, Some(mask)))
    }

    fn paint_base(&self, base: &BaseColoring, water: Option<&FloodMask>) -> PixelBuffer {
        let colorizer = Colorizer::resolve(base, self.grid, self.options.no_data_color);
        self.paint(colorizer, base.name(), water)
    }

    fn paint(
        &self,
        colorizer: Colorizer<'_>,
        base: &str,
        water: Option<&FloodMask>,
    ) -> PixelBuffer {
        let grid = self.grid;
        let width = grid.cols();
        let height = grid.rows();
        let options = self.options;

        let mut pixels = vec![0u8; width * height * 4];
        pixels
            .par_chunks_mut(width * 4)
            .enumerate()
            .for_each(|(out_row, line)| {
                let row = if options.flip_vertical {
                    height - 1 - out_row
                } else {
                    out_row
                };

                for (col, px) in line.chunks_exact_mut(4).enumerate() {
                    let color = match grid.value(row, col) {
                        None => options.no_data_color,
                        Some(_) if water.is_some_and(|m| m.is_flooded(row, col)) => {
                            options.water_color
                        }
                        Some(h) => colorizer.color(h),
                    };
                    px.copy_from_slice(&color.to_rgba());
                }
            });

        debug!(
            base,
            water = water.is_some(),
            width,
            height,
            "Rendered grid"
        );

        PixelBuffer {
            width,
            height,
            pixels,
        }
    }
}
