//! The display session: at most one active overlay at a time.
//!
//! A load computes every derived product (statistics, histogram, image,
//! placement, legend) before touching the session, then swaps the result in
//! as a whole. A failed load leaves the previous overlay in place.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use overlay_common::{
    GeoBounds, Grid, LayerConfig, LonLat, OverlayError, OverlayResult, RasterResponse,
};
use renderer::{
    composite, compute_histogram, valid_values, Histogram, HueRamp, Legend, RasterImage,
    Statistics, DEFAULT_BINS, DEFAULT_LEGEND_STEP,
};

use crate::bounds::layer_geo_bounds;
use crate::feature_info::PixelReading;
use crate::query::{query_value, QueryOutcome};

/// Tunables applied to every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub histogram_bins: usize,
    /// Legend gradient sampling step, in percent
    pub legend_step: u8,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_BINS,
            legend_step: DEFAULT_LEGEND_STEP,
        }
    }
}

/// A loaded layer with all of its display products.
#[derive(Debug, Clone)]
pub struct ActiveOverlay {
    pub layer: LayerConfig,
    pub grid: Grid,
    pub stats: Statistics,
    pub histogram: Histogram,
    pub image: RasterImage,
    pub geo_bounds: GeoBounds,
    pub legend: Legend,
}

impl ActiveOverlay {
    /// Derive every display product for `grid` under `layer`'s rules.
    pub fn build(
        layer: &LayerConfig,
        grid: Grid,
        options: &SessionOptions,
    ) -> OverlayResult<Self> {
        let values = valid_values(&grid, layer.kind);
        let stats = Statistics::from_values(&values)
            .ok_or_else(|| OverlayError::empty_data(layer.kind.as_str()))?;
        let histogram = compute_histogram(&values, stats.min, stats.max, options.histogram_bins);
        let image = composite(&grid, &stats, layer.kind, &HueRamp);
        let geo_bounds = layer_geo_bounds(layer)?;
        let legend = Legend::new(
            layer.title.clone(),
            layer.unit.clone(),
            &HueRamp,
            options.legend_step,
            stats.min,
            stats.max,
        );

        Ok(Self {
            layer: layer.clone(),
            grid,
            stats,
            histogram,
            image,
            geo_bounds,
            legend,
        })
    }

    /// Raw value under a geographic click.
    pub fn query(&self, click: LonLat) -> OverlayResult<QueryOutcome> {
        query_value(&self.grid, &self.layer.bounds, self.layer.crs, click)
    }

    pub fn metadata(&self) -> OverlayMetadata {
        OverlayMetadata {
            layer: self.layer.id.clone(),
            title: self.layer.title.clone(),
            unit: self.layer.unit.clone(),
            width: self.grid.width(),
            height: self.grid.height(),
            opacity: self.layer.opacity,
            bounds: self.geo_bounds,
            lat_lng_bounds: self.geo_bounds.to_lat_lng_pairs(),
            stats: self.stats,
            histogram: self.histogram.clone(),
            legend_css: self.legend.css_linear_gradient(),
            legend: self.legend.clone(),
        }
    }
}

/// Everything a display collaborator needs besides the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayMetadata {
    pub layer: String,
    pub title: String,
    pub unit: String,
    pub width: u32,
    pub height: u32,
    pub opacity: f32,
    pub bounds: GeoBounds,
    /// `[[south, west], [north, east]]`
    pub lat_lng_bounds: [[f64; 2]; 2],
    pub stats: Statistics,
    pub histogram: Histogram,
    pub legend: Legend,
    pub legend_css: String,
}

/// Owner of the active overlay.
#[derive(Debug, Default)]
pub struct OverlaySession {
    options: SessionOptions,
    active: Option<Arc<ActiveOverlay>>,
}

impl OverlaySession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            active: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Currently displayed overlay, if any.
    pub fn active(&self) -> Option<Arc<ActiveOverlay>> {
        self.active.clone()
    }

    /// Load a raster response for `layer`, replacing the active overlay.
    pub fn load(
        &mut self,
        layer: &LayerConfig,
        response: RasterResponse,
    ) -> OverlayResult<Arc<ActiveOverlay>> {
        self.load_grid(layer, Grid::try_from(response)?)
    }

    /// Load an already-built grid for `layer`, replacing the active overlay.
    pub fn load_grid(
        &mut self,
        layer: &LayerConfig,
        grid: Grid,
    ) -> OverlayResult<Arc<ActiveOverlay>> {
        let overlay = Arc::new(ActiveOverlay::build(layer, grid, &self.options)?);

        debug!(
            layer = %overlay.layer.id,
            width = overlay.grid.width(),
            height = overlay.grid.height(),
            valid = overlay.stats.valid_count,
            min = overlay.stats.min,
            max = overlay.stats.max,
            mean = overlay.stats.mean,
            "Loaded overlay"
        );

        if let Some(previous) = self.active.replace(Arc::clone(&overlay)) {
            debug!(layer = %previous.layer.id, "Replaced overlay");
        }
        Ok(overlay)
    }

    /// Reading under a click. `None` when nothing is loaded or the click
    /// falls outside the raster.
    pub fn query(&self, click: LonLat) -> OverlayResult<Option<PixelReading>> {
        let Some(overlay) = self.active.as_ref() else {
            return Ok(None);
        };
        let outcome = overlay.query(click)?;
        Ok(PixelReading::new(&overlay.layer, click, outcome))
    }

    /// Discard the active overlay, returning it.
    pub fn clear(&mut self) -> Option<Arc<ActiveOverlay>> {
        let previous = self.active.take();
        if let Some(ref overlay) = previous {
            debug!(layer = %overlay.layer.id, "Cleared overlay");
        }
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_common::LayerCatalog;

    fn catalog() -> LayerCatalog {
        LayerCatalog::from_yaml_str(
            r#"
layers:
  - id: temp
    title: "Temperatura media (°C)"
    unit: "°C"
    type: temperature
    bounds:
      min: [-1000.0, -1000.0]
      max: [1000.0, 1000.0]
  - id: rain
    title: "Precipitación (l/m²)"
    unit: "l/m²"
    type: precipitation
    bounds:
      min: [-1000.0, -1000.0]
      max: [1000.0, 1000.0]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_failed_load_keeps_previous() {
        let catalog = catalog();
        let mut session = OverlaySession::default();

        let grid = Grid::from_values(2, 2, &[0.0, 5.0, 0.0, 3.0]).unwrap();
        session.load_grid(catalog.get("temp").unwrap(), grid).unwrap();

        let dry = Grid::from_values(2, 1, &[0.2, 0.9]).unwrap();
        let err = session.load_grid(catalog.get("rain").unwrap(), dry).unwrap_err();
        assert_eq!(err.code(), "EmptyData");

        let active = session.active().unwrap();
        assert_eq!(active.layer.id, "temp");
        assert_eq!(active.stats.max, 5.0);
    }

    #[test]
    fn test_histogram_covers_valid_samples() {
        let catalog = catalog();
        let grid = Grid::new(4, 1, vec![Some(0.5), Some(2.0), None, Some(9.0)]).unwrap();
        let overlay =
            ActiveOverlay::build(catalog.get("rain").unwrap(), grid, &SessionOptions::default())
                .unwrap();

        assert_eq!(overlay.stats.valid_count, 2);
        assert_eq!(overlay.histogram.total(), overlay.stats.valid_count);
        assert_eq!(overlay.histogram.counts[0], 1);
        assert_eq!(overlay.histogram.counts[29], 1);
    }

    #[test]
    fn test_clear() {
        let catalog = catalog();
        let mut session = OverlaySession::default();
        let grid = Grid::from_values(1, 1, &[4.0]).unwrap();
        session.load_grid(catalog.get("rain").unwrap(), grid).unwrap();

        assert!(session.clear().is_some());
        assert!(session.active().is_none());
        assert!(session.query(LonLat::new(0.0, 0.0)).unwrap().is_none());
    }

    #[test]
    fn test_previous_overlay_outlives_replacement() {
        let catalog = catalog();
        let mut session = OverlaySession::default();
        let first = session
            .load_grid(catalog.get("rain").unwrap(), Grid::from_values(1, 1, &[4.0]).unwrap())
            .unwrap();
        session
            .load_grid(catalog.get("temp").unwrap(), Grid::from_values(1, 1, &[9.0]).unwrap())
            .unwrap();

        assert_eq!(first.layer.id, "rain");
        assert_eq!(first.image.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(session.active().unwrap().layer.id, "temp");
    }
}
