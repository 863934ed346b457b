//! Presentation of pixel query results.

use serde::{Deserialize, Serialize};

use overlay_common::{LayerConfig, LonLat};

use crate::query::QueryOutcome;

/// Text shown when the clicked cell has no measurement.
pub const NO_DATA_TEXT: &str = "No data";

/// What a click on the active overlay reveals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelReading {
    /// Layer ID
    pub layer: String,
    /// Layer title (e.g., "Temperatura media (°C)")
    pub title: String,
    /// Display unit (e.g., "°C")
    pub unit: String,
    /// Clicked position
    pub location: LonLat,
    pub outcome: QueryOutcome,
}

impl PixelReading {
    /// Build a reading for a click. Clicks outside the raster yield `None`:
    /// there is nothing to display.
    pub fn new(layer: &LayerConfig, location: LonLat, outcome: QueryOutcome) -> Option<Self> {
        if outcome.is_out_of_bounds() {
            return None;
        }
        Some(Self {
            layer: layer.id.clone(),
            title: layer.title.clone(),
            unit: layer.unit.clone(),
            location,
            outcome,
        })
    }

    /// Value with two decimals and the unit, or the no-data text.
    pub fn display_text(&self) -> String {
        match self.outcome.value() {
            Some(v) => format!("{:.2} {}", v, self.unit),
            None => NO_DATA_TEXT.to_string(),
        }
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as plain text
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!("Layer: {}\n", self.layer));
        text.push_str(&format!("Title: {}\n", self.title));
        text.push_str(&format!("Value: {}\n", self.display_text()));
        text.push_str(&format!(
            "Location: {:.3}°N, {:.3}°E\n",
            self.location.lat, self.location.lon
        ));
        text
    }
}
