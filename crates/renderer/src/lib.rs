//! Raster visualization for gridded measurements.
//!
//! Turns a [`Grid`](overlay_common::Grid) into display products:
//! - Hue ramp colors and CSS legends
//! - Summary statistics and histograms
//! - RGBA composites with no-data transparency
//! - PNG encoding (indexed when the palette fits)

pub mod composite;
pub mod legend;
pub mod png;
pub mod ramp;
pub mod stats;

pub use composite::{composite, RasterImage};
pub use legend::{legend_gradient, Legend, LegendScale, LegendStop, DEFAULT_LEGEND_STEP};
pub use ramp::{Color, ColorRamp, HueRamp};
pub use stats::{
    compute_histogram, compute_stats, valid_values, Histogram, Statistics, DEFAULT_BINS,
};
