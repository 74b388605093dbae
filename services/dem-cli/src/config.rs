//! CLI configuration.
//!
//! Loaded from an optional YAML file; every field has a default, so an empty
//! file (or no file) is valid. `DEM_LOG_LEVEL` and `DEM_STYLE` override the
//! file.
//!
//! ```yaml
//! log_level: debug
//! water_color: "#84c2fb"
//! land_color: "#fcffd4"
//! no_data_color: "#00000000"
//! style: styles/terrain.json
//! flip_vertical: false
//! frame_delay_ms: 100
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use renderer::animation::DEFAULT_FRAME_DELAY_MS;
use renderer::render::{DEFAULT_LAND_COLOR, DEFAULT_WATER_COLOR};
use renderer::{Color, RenderOptions};
use serde::{Deserialize, Serialize};
use tracing::Level;

pub const ENV_LOG_LEVEL: &str = "DEM_LOG_LEVEL";
pub const ENV_STYLE: &str = "DEM_STYLE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log_level: String,
    pub water_color: String,
    pub land_color: String,
    pub no_data_color: String,
    /// JSON style used by `gradient` and `--base style`.
    pub style: Option<PathBuf>,
    pub flip_vertical: bool,
    pub frame_delay_ms: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            water_color: DEFAULT_WATER_COLOR.to_hex(),
            land_color: DEFAULT_LAND_COLOR.to_hex(),
            no_data_color: Color::transparent().to_hex(),
            style: None,
            flip_vertical: false,
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        }
    }
}

impl CliConfig {
    /// Read `path` if given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as null rather than an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
        if let Some(style) = lookup(ENV_STYLE).filter(|v| !v.is_empty()) {
            self.style = Some(PathBuf::from(style));
        }
    }

    /// Check colours, log level and frame delay.
    pub fn validate(&self) -> Result<()> {
        parse_level(&self.log_level)?;
        self.render_options()?;
        self.land_color()?;
        if self.frame_delay_ms == 0 {
            bail!("frame_delay_ms must be positive");
        }
        Ok(())
    }

    /// Renderer options from the configured colours.
    pub fn render_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            no_data_color: parse_color("no_data_color", &self.no_data_color)?,
            water_color: parse_color("water_color", &self.water_color)?,
            flip_vertical: self.flip_vertical,
        })
    }

    pub fn land_color(&self) -> Result<Color> {
        parse_color("land_color", &self.land_color)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color> {
    Color::from_hex(value).ok_or_else(|| anyhow!("{} is not a hex colour: '{}'", field, value))
}

/// Map a level name to a tracing level.
pub fn parse_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => bail!("unknown log level '{}'", other),
    }
}
