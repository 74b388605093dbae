//! Elevation grid toolkit.
//!
//! Renders Esri ASCII grids to PNG, simulates connected flooding, writes
//! rising-water GIFs and exports OBJ terrain meshes.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;

use dem_cli::config::parse_level;
use dem_cli::{run, Cli, CliConfig};

fn main() -> Result<()> {
    let args = Cli::parse();

    let config = CliConfig::load(args.config.as_deref())?;

    // Initialize tracing; stdout is reserved for command output
    let level = parse_level(args.log_level.as_deref().unwrap_or(&config.log_level))?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!(config = ?config, "Loaded configuration");
    info!(command = ?args.command, "Running");

    let summary = run(&args.command, &config)?;
    println!("{}", summary);

    Ok(())
}
