//! Colour styles loaded from JSON.
//!
//! ```json
//! {
//!   "name": "terrain",
//!   "description": "Lowland green to alpine white",
//!   "stops": [
//!     { "value": 0,    "color": "#2e7d32" },
//!     { "value": 800,  "color": "#c8b273" },
//!     { "value": 2000, "color": "#ffffff" }
//!   ],
//!   "water_color": "#84c2fb",
//!   "no_data_color": "#00000000"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gradient::{Color, ColorRamp, ColorStop, RampError};
use crate::render::RenderOptions;

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("failed to read style file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid style JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid colour '{value}' in {field}")]
    InvalidColor { field: String, value: String },

    #[error("invalid colour ramp: {0}")]
    Ramp(#[from] RampError),
}

/// A single style definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stops: Vec<StyleStop>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_data_color: Option<String>,
}

/// Height threshold with a hex colour.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StyleStop {
    pub value: f64,
    pub color: String,
}

impl StyleDefinition {
    pub fn from_json(json_str: &str) -> Result<Self, StyleError> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Build the colour ramp described by the stops.
    pub fn to_ramp(&self) -> Result<ColorRamp, StyleError> {
        let stops = self
            .stops
            .iter()
            .enumerate()
            .map(|(i, stop)| {
                let color = parse_color(&format!("stops[{}].color", i), &stop.color)?;
                Ok(ColorStop::new(stop.value, color))
            })
            .collect::<Result<Vec<_>, StyleError>>()?;

        Ok(ColorRamp::new(stops)?)
    }

    /// Default options with this style's water and no-data colours applied.
    pub fn render_options(&self) -> Result<RenderOptions, StyleError> {
        self.apply_to(RenderOptions::default())
    }

    /// Override the colours of `options` that this style sets.
    pub fn apply_to(&self, mut options: RenderOptions) -> Result<RenderOptions, StyleError> {
        if let Some(hex) = &self.water_color {
            options.water_color = parse_color("water_color", hex)?;
        }
        if let Some(hex) = &self.no_data_color {
            options.no_data_color = parse_color("no_data_color", hex)?;
        }
        Ok(options)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, StyleError> {
    Color::from_hex(value).ok_or_else(|| StyleError::InvalidColor {
        field: field.to_string(),
        value: value.to_string(),
    })
}
