//! Layer configuration: display labels, validity rules and raster extents.
//!
//! The catalog is loaded from YAML supplied by the caller:
//!
//! ```yaml
//! layers:
//!   - id: 20230514_precipitation_comvalenciana
//!     title: "Precipitación (l/m²)"
//!     unit: "l/m²"
//!     type: precipitation
//!     bounds:
//!       min: [-170029.5724387232, 4557921.9614732563]
//!       max: [76681.0429848633, 4980761.9401388783]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::bbox::ProjectedBounds;
use crate::crs::CrsCode;
use crate::error::{OverlayError, OverlayResult};

/// Kind of measurement a layer holds. Selects the sample validity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Exactly zero is the no-data sentinel.
    Temperature,
    /// Values at or below 1 are treated as noise.
    Precipitation,
}

impl LayerKind {
    /// Whether a raw sample counts toward statistics and rendering.
    ///
    /// Missing and NaN samples are never valid.
    #[inline]
    pub fn accepts(&self, sample: Option<f64>) -> bool {
        match sample {
            Some(v) if !v.is_nan() => match self {
                LayerKind::Temperature => v != 0.0,
                LayerKind::Precipitation => v > 1.0,
            },
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Temperature => "temperature",
            LayerKind::Precipitation => "precipitation",
        }
    }
}

fn default_crs() -> CrsCode {
    CrsCode::Epsg3857
}

fn default_opacity() -> f32 {
    0.8
}

/// Configuration of a single raster layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer ID (the source table name)
    pub id: String,
    /// Human-readable title, also used as the legend heading
    pub title: String,
    /// Display unit (e.g. "°C")
    pub unit: String,
    /// Measurement kind
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Projected CRS of `bounds`
    #[serde(default = "default_crs")]
    pub crs: CrsCode,
    /// Raster extent in `crs` units
    pub bounds: ProjectedBounds,
    /// Overlay opacity hint for the display layer
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

/// All layers available to the overlay engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerCatalog {
    pub layers: Vec<LayerConfig>,
}

impl LayerCatalog {
    /// Parse and validate a YAML catalog.
    pub fn from_yaml_str(yaml: &str) -> OverlayResult<Self> {
        let catalog: LayerCatalog = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            OverlayError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Find a layer by ID (exact match).
    pub fn get(&self, id: &str) -> OverlayResult<&LayerConfig> {
        self.layers
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| OverlayError::LayerNotFound(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.id.as_str())
    }

    /// Validate the catalog.
    pub fn validate(&self) -> OverlayResult<()> {
        let mut seen = HashSet::new();
        for layer in &self.layers {
            if !seen.insert(layer.id.as_str()) {
                return Err(OverlayError::config(format!(
                    "duplicate layer id '{}'",
                    layer.id
                )));
            }
            if layer.crs.is_geographic() {
                return Err(OverlayError::config(format!(
                    "layer '{}' bounds must be in a projected CRS, got {}",
                    layer.id, layer.crs
                )));
            }
            if !(0.0..=1.0).contains(&layer.opacity) {
                return Err(OverlayError::config(format!(
                    "layer '{}' opacity must be within 0-1, got {}",
                    layer.id, layer.opacity
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_validity() {
        let kind = LayerKind::Temperature;
        assert!(kind.accepts(Some(12.5)));
        assert!(kind.accepts(Some(-3.0)));
        assert!(kind.accepts(Some(0.5)));
        assert!(!kind.accepts(Some(0.0)));
        assert!(!kind.accepts(Some(f64::NAN)));
        assert!(!kind.accepts(None));
    }

    #[test]
    fn test_precipitation_validity() {
        let kind = LayerKind::Precipitation;
        assert!(kind.accepts(Some(1.01)));
        assert!(kind.accepts(Some(40.0)));
        assert!(!kind.accepts(Some(1.0)));
        assert!(!kind.accepts(Some(0.3)));
        assert!(!kind.accepts(Some(f64::NAN)));
        assert!(!kind.accepts(None));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let yaml = r#"
layers:
  - id: wind
    title: Wind
    unit: m/s
    type: wind
    bounds: { min: [0.0, 0.0], max: [1.0, 1.0] }
"#;
        assert!(LayerCatalog::from_yaml_str(yaml).is_err());
    }
}
