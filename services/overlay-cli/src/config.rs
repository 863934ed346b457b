//! Runtime settings for the overlay CLI.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use overlay_common::LayerCatalog;
use overlay_engine::SessionOptions;
use renderer::{DEFAULT_BINS, DEFAULT_LEGEND_STEP};

/// Default location of the layer catalog, relative to the working directory.
pub const DEFAULT_LAYERS_CONFIG: &str = "config/layers.yaml";

/// Settings resolved from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySettings {
    /// Layer catalog path (`OVERLAY_LAYERS_CONFIG`)
    pub layers_config: PathBuf,

    /// Histogram bin count (`OVERLAY_HISTOGRAM_BINS`)
    pub histogram_bins: usize,

    /// Legend sampling step in percent (`OVERLAY_LEGEND_STEP`)
    pub legend_step: u8,

    /// Where rendered files go (`OVERLAY_OUTPUT_DIR`)
    pub output_dir: PathBuf,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            layers_config: PathBuf::from(DEFAULT_LAYERS_CONFIG),
            histogram_bins: DEFAULT_BINS,
            legend_step: DEFAULT_LEGEND_STEP,
            output_dir: PathBuf::from("."),
        }
    }
}

impl OverlaySettings {
    /// Load settings from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings from an arbitrary variable source; unset variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = lookup("OVERLAY_LAYERS_CONFIG") {
            settings.layers_config = PathBuf::from(path);
        }
        if let Some(bins) = lookup("OVERLAY_HISTOGRAM_BINS") {
            settings.histogram_bins = bins
                .trim()
                .parse()
                .with_context(|| format!("OVERLAY_HISTOGRAM_BINS is not a count: {:?}", bins))?;
        }
        if let Some(step) = lookup("OVERLAY_LEGEND_STEP") {
            settings.legend_step = step
                .trim()
                .parse()
                .with_context(|| format!("OVERLAY_LEGEND_STEP is not a percent: {:?}", step))?;
        }
        if let Some(dir) = lookup("OVERLAY_OUTPUT_DIR") {
            settings.output_dir = PathBuf::from(dir);
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        if self.legend_step == 0 || self.legend_step > 100 {
            bail!("legend_step must be within 1-100, got {}", self.legend_step);
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            histogram_bins: self.histogram_bins,
            legend_step: self.legend_step,
        }
    }

    /// Read and validate the layer catalog.
    pub fn load_catalog(&self) -> Result<LayerCatalog> {
        LayerCatalog::from_file(&self.layers_config).with_context(|| {
            format!(
                "Failed to load layer catalog from {}",
                self.layers_config.display()
            )
        })
    }
}
