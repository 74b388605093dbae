//! Command handlers.
//!
//! Each handler loads its input grid, does the work and returns a short
//! human-readable summary for the binary to print.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use dem_common::{flood, FloodSource, Grid};
use mesh_export::generate_obj;
use renderer::animation::{level_steps, sealevel_series, write_gif, WaterModel};
use renderer::{write_png, BaseColoring, ColorRamp, PixelBuffer, Renderer, StyleDefinition};
use tracing::info;

use crate::cli::{BaseArg, Command};
use crate::config::CliConfig;

/// Upper bound on animation frames.
pub const MAX_FRAMES: usize = 1000;

/// Execute `command` and return its summary.
pub fn run(command: &Command, config: &CliConfig) -> Result<String> {
    match command {
        Command::Info { input, json } => info_cmd(input, *json),
        Command::Histogram { input, buckets } => histogram_cmd(input, *buckets),
        Command::Grayscale { input, output } => {
            let grid = load_grid(input)?;
            let renderer = Renderer::with_options(&grid, config.render_options()?);
            save_png(&renderer.draw_grayscale(), output)
        }
        Command::Gradient {
            input,
            output,
            style,
            min,
            max,
        } => gradient_cmd(input, output, style.as_deref(), *min, *max, config),
        Command::Sealevel {
            input,
            output,
            level,
            base,
        } => {
            let grid = load_grid(input)?;
            let (renderer, base) = water_renderer(&grid, *base, config)?;
            save_png(&renderer.draw_sealevel(*level, &base), output)
        }
        Command::Realwater {
            input,
            output,
            level,
            source,
            seed_no_data,
            base,
        } => {
            let grid = load_grid(input)?;
            let source = match (source, seed_no_data) {
                (Some((row, col)), _) => FloodSource::Cell {
                    row: *row,
                    col: *col,
                },
                (None, true) => FloodSource::BoundaryAndNoData,
                (None, false) => FloodSource::Boundary,
            };
            let mask = flood(&grid, *level, source)?;
            let (renderer, base) = water_renderer(&grid, *base, config)?;
            let image = renderer.draw_mask(&mask, &base)?;
            let summary = save_png(&image, output)?;
            Ok(format!(
                "{}; {} of {} cells flooded",
                summary,
                mask.flooded_count(),
                grid.len()
            ))
        }
        Command::Animate {
            input,
            output,
            from,
            to,
            step,
            real,
            delay_ms,
            base,
        } => {
            let grid = load_grid(input)?;
            let levels = animation_levels(*from, *to, *step)?;
            let model = if *real {
                WaterModel::Connected
            } else {
                WaterModel::Naive
            };
            let (renderer, base) = water_renderer(&grid, *base, config)?;
            let frames = sealevel_series(&renderer, &levels, &base, model);
            write_gif(&frames, output, delay_ms.unwrap_or(config.frame_delay_ms))?;
            Ok(format!(
                "wrote {} ({} frames, levels {} to {})",
                output.display(),
                frames.len(),
                levels[0],
                levels[levels.len() - 1]
            ))
        }
        Command::Obj {
            input,
            output,
            exaggeration,
            base_offset,
        } => {
            let grid = load_grid(input)?;
            let mesh = generate_obj(&grid, output, *exaggeration, *base_offset)?;
            Ok(format!(
                "wrote {} ({} vertices, {} faces)",
                output.display(),
                mesh.vertex_count(),
                mesh.face_count()
            ))
        }
        Command::Downsample {
            input,
            output,
            factor,
        } => {
            let grid = load_grid(input)?;
            let reduced = grid.downsample(*factor)?;
            reduced.write_ascii(output)?;
            Ok(format!("wrote {} ({})", output.display(), reduced))
        }
    }
}

fn load_grid(path: &Path) -> Result<Grid> {
    Grid::from_path(path).with_context(|| format!("Failed to load grid {:?}", path))
}

fn load_style(path: &Path) -> Result<StyleDefinition> {
    StyleDefinition::from_file(path).with_context(|| format!("Failed to load style {:?}", path))
}

fn save_png(image: &PixelBuffer, output: &Path) -> Result<String> {
    write_png(image, output).with_context(|| format!("Failed to write {:?}", output))?;
    Ok(format!(
        "wrote {} ({}x{})",
        output.display(),
        image.width(),
        image.height()
    ))
}

fn info_cmd(input: &Path, json: bool) -> Result<String> {
    let grid = load_grid(input)?;
    let header = grid.header();
    let stats = grid.stats().ok();

    if json {
        let value = serde_json::json!({
            "header": header,
            "stats": stats,
        });
        return Ok(serde_json::to_string_pretty(&value)?);
    }

    let kind = header.origin_kind();
    let mut out = String::new();
    writeln!(out, "{}", grid)?;
    writeln!(
        out,
        "origin: {} {}, {} {}",
        kind.x_key(),
        header.x_origin(),
        kind.y_key(),
        header.y_origin()
    )?;
    match stats {
        Some(s) => write!(out, "min {}, max {}, mean {:.3}", s.min, s.max, s.mean)?,
        None => write!(out, "no measured cells")?,
    }
    Ok(out)
}

fn histogram_cmd(input: &Path, buckets: usize) -> Result<String> {
    let grid = load_grid(input)?;
    let histogram = grid.histogram(buckets)?;

    let mut out = String::new();
    for (i, count) in histogram.counts.iter().enumerate() {
        let (lo, hi) = histogram.bucket_bounds(i);
        writeln!(out, "{:>12.3} .. {:<12.3} {}", lo, hi, count)?;
    }
    write!(out, "total {}", histogram.total())?;
    Ok(out)
}

fn gradient_cmd(
    input: &Path,
    output: &Path,
    style: Option<&Path>,
    min: Option<f64>,
    max: Option<f64>,
    config: &CliConfig,
) -> Result<String> {
    let grid = load_grid(input)?;
    let mut options = config.render_options()?;

    let image = match (min, max) {
        (Some(min), Some(max)) => {
            ensure!(min < max, "--min ({}) must be below --max ({})", min, max);
            let renderer = Renderer::with_options(&grid, options);
            renderer.draw_ramp(&ColorRamp::spectrum(min, max))
        }
        _ => match style.or(config.style.as_deref()) {
            Some(path) => {
                let style = load_style(path)?;
                options = style.apply_to(options)?;
                info!(style = %style.name, "Rendering with style");
                Renderer::with_options(&grid, options).draw_ramp(&style.to_ramp()?)
            }
            None => Renderer::with_options(&grid, options).draw_rgb_gradient(),
        },
    };

    save_png(&image, output)
}

/// Renderer and land colouring for the water commands.
fn water_renderer<'g>(
    grid: &'g Grid,
    base: BaseArg,
    config: &CliConfig,
) -> Result<(Renderer<'g>, BaseColoring)> {
    let mut options = config.render_options()?;
    let coloring = match base {
        BaseArg::Grayscale => BaseColoring::Grayscale,
        BaseArg::Spectrum => BaseColoring::Spectrum,
        BaseArg::Flat => BaseColoring::Flat(config.land_color()?),
        BaseArg::Style => {
            let Some(path) = config.style.as_deref() else {
                bail!("--base style needs a style file in the config or DEM_STYLE");
            };
            let style = load_style(path)?;
            options = style.apply_to(options)?;
            BaseColoring::Ramp(style.to_ramp()?)
        }
    };
    Ok((Renderer::with_options(grid, options), coloring))
}

/// Levels `from`, `from + step`, ... up to and including `to`.
pub fn animation_levels(from: f64, to: f64, step: f64) -> Result<Vec<f64>> {
    ensure!(
        from.is_finite() && to.is_finite() && step.is_finite(),
        "animation levels must be finite"
    );
    ensure!(step > 0.0, "--step must be positive, got {}", step);
    ensure!(to >= from, "--to ({}) must not be below --from ({})", to, from);

    // small tolerance so that e.g. 0..1 by 0.1 includes 1
    let intervals = ((to - from) / step + 1e-9).floor();
    ensure!(
        intervals < MAX_FRAMES as f64,
        "{} frames requested, at most {} allowed",
        intervals + 1.0,
        MAX_FRAMES
    );
    let count = intervals as usize + 1;
    let last = from + step * intervals;
    Ok(level_steps(from, last, count))
}
