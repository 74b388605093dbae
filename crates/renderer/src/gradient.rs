//! Colours and piecewise-linear colour ramps.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Opaque gray with all channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| (a as f64 * t_inv + b as f64 * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Reasons a list of stops cannot form a ramp.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RampError {
    #[error("colour ramp needs at least one stop")]
    Empty,

    #[error("stop {index} has non-finite value {value}")]
    NonFinite { index: usize, value: f64 },

    #[error("stop values must be strictly increasing: stop {index} ({value}) follows {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        value: f64,
    },
}

/// A threshold and the colour it maps to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub value: f64,
    pub color: Color,
}

impl ColorStop {
    pub fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }
}

/// Ordered colour stops with piecewise-linear interpolation between them.
///
/// Holds at least one stop, and stop values are finite and strictly
/// increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// Validate `stops` into a ramp.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, RampError> {
        if stops.is_empty() {
            return Err(RampError::Empty);
        }

        for (index, stop) in stops.iter().enumerate() {
            if !stop.value.is_finite() {
                return Err(RampError::NonFinite {
                    index,
                    value: stop.value,
                });
            }
            if index > 0 && stops[index - 1].value >= stop.value {
                return Err(RampError::NotIncreasing {
                    index,
                    previous: stops[index - 1].value,
                    value: stop.value,
                });
            }
        }

        Ok(Self { stops })
    }

    /// Ramp from `(value, colour)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, RampError>
    where
        I: IntoIterator<Item = (f64, Color)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, color)| ColorStop::new(value, color))
                .collect(),
        )
    }

    /// Blue at `min`, green half way, red at `max`.
    ///
    /// When the interval is empty or too narrow to split, every value maps to
    /// green.
    pub fn spectrum(min: f64, max: f64) -> Self {
        let mid = min / 2.0 + max / 2.0;
        Self::from_pairs([(min, Color::BLUE), (mid, Color::GREEN), (max, Color::RED)])
            .unwrap_or_else(|_| Self {
                stops: vec![ColorStop::new(if min.is_finite() { min } else { 0.0 }, Color::GREEN)],
            })
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Lowest stop value.
    pub fn min_value(&self) -> f64 {
        self.stops[0].value
    }

    /// Highest stop value.
    pub fn max_value(&self) -> f64 {
        self.stops[self.stops.len() - 1].value
    }

    /// Colour for `value`, clamped to the end colours outside the ramp.
    pub fn evaluate(&self, value: f64) -> Color {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];

        if value.is_nan() || value <= first.value {
            return first.color;
        }
        if value >= last.value {
            return last.color;
        }

        // first.value < value < last.value, so 1 <= upper < len
        let upper = self.stops.partition_point(|stop| stop.value <= value);
        let low = self.stops[upper - 1];
        let high = self.stops[upper];
        let t = (value - low.value) / (high.value - low.value);

        interpolate_color(low.color, high.color, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::GREEN));
        assert_eq!(Color::from_hex("#84c2fb80"), Some(Color::new(132, 194, 251, 128)));
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#+f+f+f"), None);
        assert_eq!(Color::from_hex("##ffffff"), None);
        assert_eq!(Color::new(1, 2, 3, 4).to_hex(), "#01020304");
        assert_eq!(Color::rgb(132, 194, 251).to_hex(), "#84c2fb");
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let a = Color::rgb(0, 100, 200);
        let b = Color::rgb(255, 0, 100);
        assert_eq!(interpolate_color(a, b, 0.0), a);
        assert_eq!(interpolate_color(a, b, 1.0), b);
        assert_eq!(interpolate_color(a, b, 0.5), Color::rgb(128, 50, 150));
        assert_eq!(interpolate_color(a, b, 2.0), b);
    }

    #[test]
    fn test_ramp_validation() {
        assert_eq!(ColorRamp::new(vec![]), Err(RampError::Empty));
        assert!(matches!(
            ColorRamp::from_pairs([(1.0, Color::RED), (1.0, Color::BLUE)]),
            Err(RampError::NotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            ColorRamp::from_pairs([(f64::NAN, Color::RED)]),
            Err(RampError::NonFinite { index: 0, .. })
        ));
    }

    #[test]
    fn test_single_stop_ramp() {
        let ramp = ColorRamp::from_pairs([(5.0, Color::RED)]).unwrap();
        assert_eq!(ramp.evaluate(-100.0), Color::RED);
        assert_eq!(ramp.evaluate(5.0), Color::RED);
        assert_eq!(ramp.evaluate(100.0), Color::RED);
    }

    #[test]
    fn test_spectrum_matches_blue_green_red() {
        let ramp = ColorRamp::spectrum(0.0, 100.0);
        assert_eq!(ramp.evaluate(0.0), Color::BLUE);
        assert_eq!(ramp.evaluate(50.0), Color::GREEN);
        assert_eq!(ramp.evaluate(100.0), Color::RED);
        assert_eq!(ramp.evaluate(25.0), Color::rgb(0, 128, 128));
    }

    #[test]
    fn test_spectrum_over_full_float_range() {
        let ramp = ColorRamp::spectrum(-f64::MAX, f64::MAX);
        assert_eq!(ramp.stops().len(), 3);
        assert_eq!(ramp.evaluate(-f64::MAX), Color::BLUE);
        assert_eq!(ramp.evaluate(0.0), Color::GREEN);
        assert_eq!(ramp.evaluate(f64::MAX), Color::RED);
    }

    #[test]
    fn test_degenerate_spectrum() {
        let ramp = ColorRamp::spectrum(7.0, 7.0);
        assert_eq!(ramp.stops().len(), 1);
        assert_eq!(ramp.evaluate(7.0), Color::GREEN);
    }
}
