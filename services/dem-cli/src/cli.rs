//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "dem-cli")]
#[command(version, about = "Render, flood and mesh Esri ASCII elevation grids")]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DEM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Colouring for land cells in water renders.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseArg {
    Grayscale,
    Spectrum,
    /// Configured land colour
    #[default]
    Flat,
    /// Ramp from the configured style file
    Style,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print header and height statistics
    Info {
        input: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a height histogram
    Histogram {
        input: PathBuf,
        #[arg(long, default_value_t = 10)]
        buckets: usize,
    },

    /// Render a grayscale PNG
    Grayscale { input: PathBuf, output: PathBuf },

    /// Render a colour PNG from a style file or the blue-green-red spectrum
    Gradient {
        input: PathBuf,
        output: PathBuf,
        /// JSON style file; defaults to the configured style
        #[arg(long)]
        style: Option<PathBuf>,
        /// Spectrum lower bound instead of the grid minimum
        #[arg(long, requires = "max", allow_negative_numbers = true)]
        min: Option<f64>,
        /// Spectrum upper bound instead of the grid maximum
        #[arg(long, requires = "min", allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Mark every cell below the level as water
    Sealevel {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        level: f64,
        #[arg(long, value_enum, default_value_t)]
        base: BaseArg,
    },

    /// Flood only the water connected to the grid edge (or a source cell)
    Realwater {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        level: f64,
        /// Flood from this cell instead of the edge, as ROW,COL
        #[arg(long, value_parser = parse_cell, conflicts_with = "seed_no_data")]
        source: Option<(usize, usize)>,
        /// Also let water enter from no-data areas
        #[arg(long)]
        seed_no_data: bool,
        #[arg(long, value_enum, default_value_t)]
        base: BaseArg,
    },

    /// Write an animated GIF of rising water
    Animate {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        #[arg(long)]
        step: f64,
        /// Connected water instead of the plain threshold
        #[arg(long)]
        real: bool,
        /// Frame delay; defaults to the configured delay
        #[arg(long)]
        delay_ms: Option<u32>,
        #[arg(long, value_enum, default_value_t)]
        base: BaseArg,
    },

    /// Export a Wavefront OBJ terrain mesh
    Obj {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 1.0)]
        exaggeration: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        base_offset: f64,
    },

    /// Keep every n-th row and column and write a new ASCII grid
    Downsample {
        input: PathBuf,
        output: PathBuf,
        #[arg(long)]
        factor: usize,
    },
}

/// Parse `ROW,COL`.
pub fn parse_cell(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid cell index '{}': {}", v.trim(), e))
    };
    Ok((parse(row)?, parse(col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell("3,4"), Ok((3, 4)));
        assert_eq!(parse_cell(" 0 , 12 "), Ok((0, 12)));
        assert!(parse_cell("3").is_err());
        assert!(parse_cell("-1,2").is_err());
    }

    #[test]
    fn test_negative_level_accepted() {
        let cli = Cli::try_parse_from([
            "dem-cli", "sealevel", "in.asc", "out.png", "--level", "-2.5",
        ])
        .unwrap();
        match cli.command {
            Command::Sealevel { level, base, .. } => {
                assert_eq!(level, -2.5);
                assert_eq!(base, BaseArg::Flat);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_source_conflicts_with_seed_no_data() {
        let result = Cli::try_parse_from([
            "dem-cli",
            "realwater",
            "in.asc",
            "out.png",
            "--level",
            "3",
            "--source",
            "1,1",
            "--seed-no-data",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_gradient_bounds_come_in_pairs() {
        assert!(
            Cli::try_parse_from(["dem-cli", "gradient", "a.asc", "b.png", "--min", "0"]).is_err()
        );
        assert!(Cli::try_parse_from([
            "dem-cli", "gradient", "a.asc", "b.png", "--min", "0", "--max", "9"
        ])
        .is_ok());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
