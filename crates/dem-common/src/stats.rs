//! Read-only aggregate queries over an elevation grid.
//!
//! Every statistic skips no-data cells and fails with
//! [`DemError::EmptyData`] when no measured cell is left.

use serde::Serialize;
use tracing::warn;

use crate::error::{DemError, Result};
use crate::grid::Grid;

/// Summary of the measured cells of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub valid_count: usize,
    pub no_data_count: usize,
}

impl GridStats {
    /// Spread between the lowest and highest measured cell.
    ///
    /// Infinite when the heights span more than `f64::MAX`; use
    /// [`GridStats::fraction`] to position a height within the range.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Where `value` sits between `min` (0.0) and `max` (1.0).
    pub fn fraction(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }
}

/// Position of `value` within `[min, max]`, clamped to `[0, 1]`.
///
/// Returns 0.0 for an empty or inverted range. The operands are halved
/// first so heights near `±f64::MAX` never form an infinite difference.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max / 2.0 - min / 2.0;
    if !(span > 0.0) {
        return 0.0;
    }
    ((value / 2.0 - min / 2.0) / span).clamp(0.0, 1.0)
}

/// Equal-width height histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Width of one bucket in height units.
    pub fn bucket_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// Lower and upper bound of bucket `i`.
    pub fn bucket_bounds(&self, i: usize) -> (f64, f64) {
        let width = self.bucket_width();
        (self.min + width * i as f64, self.min + width * (i + 1) as f64)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Grid {
    /// Minimum, maximum and mean in a single pass.
    pub fn stats(&self) -> Result<GridStats> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut valid_count = 0usize;

        for v in self.valid_values() {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            valid_count += 1;
        }

        if valid_count == 0 {
            warn!(cells = self.len(), "Grid has no measured cells");
            return Err(DemError::EmptyData);
        }

        // Rounding in the running sum can land the mean just outside the
        // observed range (e.g. three cells of 0.1).
        let mean = (sum / valid_count as f64).clamp(min, max);

        Ok(GridStats {
            min,
            max,
            mean,
            valid_count,
            no_data_count: self.len() - valid_count,
        })
    }

    pub fn min_height(&self) -> Result<f64> {
        self.valid_values()
            .reduce(f64::min)
            .ok_or(DemError::EmptyData)
    }

    pub fn max_height(&self) -> Result<f64> {
        self.valid_values()
            .reduce(f64::max)
            .ok_or(DemError::EmptyData)
    }

    /// Mean height of all measured cells.
    pub fn avg_height(&self) -> Result<f64> {
        self.stats().map(|s| s.mean)
    }

    /// Count measured cells into `buckets` equal-width bins over [min, max].
    ///
    /// The maximum lands in the last bin. When every measured cell has the
    /// same height they all land in bin 0.
    pub fn histogram(&self, buckets: usize) -> Result<Histogram> {
        if buckets == 0 {
            return Err(DemError::invalid_argument("histogram needs at least one bucket"));
        }

        let stats = self.stats()?;
        let mut counts = vec![0usize; buckets];

        for v in self.valid_values() {
            let bucket = (stats.fraction(v) * buckets as f64) as usize;
            counts[bucket.min(buckets - 1)] += 1;
        }

        Ok(Histogram {
            min: stats.min,
            max: stats.max,
            counts,
        })
    }
}
