//! Point features from tabular rows, as GeoJSON.
//!
//! Each row carries its location in a `geom` column holding a GeoJSON
//! point in a projected CRS. Every other column becomes a feature property.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use overlay_common::{CrsCode, OverlayError, OverlayResult, PointGeometry};
use projection::to_geographic;

/// Name of the geometry column in point rows.
pub const GEOMETRY_COLUMN: &str = "geom";

/// GeoJSON point feature in lon/lat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct PointFeature {
    pub geometry: PointGeometry,
    pub properties: Map<String, Value>,
}

impl PointFeature {
    /// Build a feature from one row, reprojecting `geom` from `source_crs`.
    pub fn from_row(row: &Value, source_crs: CrsCode) -> OverlayResult<Self> {
        let Value::Object(columns) = row else {
            return Err(OverlayError::InvalidFeature(format!(
                "expected an object row, got {}",
                row
            )));
        };

        let mut properties = columns.clone();
        let geom = properties.remove(GEOMETRY_COLUMN).ok_or_else(|| {
            OverlayError::InvalidFeature(format!("row has no '{}' column", GEOMETRY_COLUMN))
        })?;
        let point: PointGeometry = serde_json::from_value(geom).map_err(|e| {
            OverlayError::InvalidFeature(format!("bad '{}': {}", GEOMETRY_COLUMN, e))
        })?;

        let [x, y] = point.coordinates;
        let (lon, lat) = to_geographic(x, y, source_crs)?;

        Ok(Self {
            geometry: PointGeometry::new(lon, lat),
            properties,
        })
    }

    pub fn lon_lat(&self) -> (f64, f64) {
        (self.geometry.coordinates[0], self.geometry.coordinates[1])
    }

    /// `key: value` lines for a popup, strings unquoted.
    pub fn popup_lines(&self) -> Vec<String> {
        self.properties
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}: {}", k, s),
                other => format!("{}: {}", k, other),
            })
            .collect()
    }
}

/// GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<PointFeature>,
}

impl FeatureCollection {
    /// Convert every row of a point table. An empty table is `EmptyData`.
    pub fn from_rows(table: &str, rows: &[Value], source_crs: CrsCode) -> OverlayResult<Self> {
        if rows.is_empty() {
            return Err(OverlayError::empty_data(table));
        }
        let features = rows
            .iter()
            .map(|row| PointFeature::from_row(row, source_crs))
            .collect::<OverlayResult<Vec<_>>>()?;
        Ok(Self { features })
    }

    /// Parse a JSON array of rows and convert it.
    pub fn from_json(table: &str, json: &str, source_crs: CrsCode) -> OverlayResult<Self> {
        let rows: Vec<Value> = serde_json::from_str(json)?;
        Self::from_rows(table, &rows, source_crs)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Format as GeoJSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
