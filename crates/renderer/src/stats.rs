//! Summary statistics and histograms over the valid samples of a grid.

use serde::{Deserialize, Serialize};

use overlay_common::{Grid, LayerKind, OverlayError, OverlayResult};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 30;

/// Min, max and mean over the samples accepted by a layer's validity rule.
///
/// Invariant: `min <= mean <= max` and `valid_count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub valid_count: u64,
}

impl Statistics {
    /// Statistics of a slice of values, `None` when the slice is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let (mut min, mut max, mut sum) = (first, first, 0.0);
        for &v in values {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
            sum += v;
        }

        // Rounding in the sum can push the mean just past an extreme.
        let mean = (sum / values.len() as f64).clamp(min, max);

        Some(Self {
            min,
            max,
            mean,
            valid_count: values.len() as u64,
        })
    }

    /// Value range, 1.0 when every sample is equal.
    #[inline]
    pub fn range(&self) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            1.0
        } else {
            range
        }
    }

    /// Map a value into [0, 1] relative to min/max, clamping outliers.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        ((value - self.min) / self.range()).clamp(0.0, 1.0)
    }
}

/// Collect the samples the validity rule accepts, in grid order.
pub fn valid_values(grid: &Grid, kind: LayerKind) -> Vec<f64> {
    grid.values()
        .iter()
        .filter(|sample| kind.accepts(**sample))
        .filter_map(|sample| *sample)
        .collect()
}

/// Compute statistics over the valid samples of `grid`.
///
/// Returns `EmptyData` when no sample passes the layer's validity rule.
pub fn compute_stats(grid: &Grid, kind: LayerKind) -> OverlayResult<Statistics> {
    Statistics::from_values(&valid_values(grid, kind))
        .ok_or_else(|| OverlayError::empty_data(kind.as_str()))
}

/// Fixed-width histogram of valid samples between min and max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub min: f64,
    pub max: f64,
    pub counts: Vec<u32>,
}

impl Histogram {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Largest bin count, 0 for an empty histogram.
    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Lower edge of each bin.
    pub fn bin_edges(&self) -> Vec<f64> {
        let range = if self.max == self.min { 1.0 } else { self.max - self.min };
        let width = range / self.bins() as f64;
        (0..self.bins())
            .map(|i| self.min + i as f64 * width)
            .collect()
    }

    /// Bar heights scaled so the fullest bin spans `height`.
    pub fn bar_heights(&self, height: f64) -> Vec<f64> {
        let max_count = self.max_count();
        if max_count == 0 {
            return vec![0.0; self.bins()];
        }
        self.counts
            .iter()
            .map(|&c| f64::from(c) / f64::from(max_count) * height)
            .collect()
    }
}

/// Bin `values` into `bins` equal-width buckets spanning [min, max].
///
/// Bin index is `floor((v - min) / (max - min) * bins)` clamped to
/// `[0, bins - 1]`, so `max` itself lands in the last bin. When
/// `max == min` the range is taken as 1 and every value falls in bin 0.
/// A `bins` of 0 is treated as 1.
pub fn compute_histogram(values: &[f64], min: f64, max: f64, bins: usize) -> Histogram {
    let bins = bins.max(1);
    let range = if max == min { 1.0 } else { max - min };
    let last = (bins - 1) as f64;
    let mut counts = vec![0u32; bins];

    for &v in values {
        let idx = ((v - min) / range * bins as f64).floor().clamp(0.0, last);
        counts[idx as usize] += 1;
    }

    Histogram { min, max, counts }
}
