//! Raw measurement grids and the records they arrive in.

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// A row-major grid of optional samples.
///
/// Row 0 is the northernmost row (image top). `None` marks a missing sample;
/// NaN values are kept as-is and treated as missing by every consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    width: u32,
    height: u32,
    values: Vec<Option<f64>>,
}

impl Grid {
    /// Create a grid, checking `values.len() == width * height`.
    pub fn new(width: u32, height: u32, values: Vec<Option<f64>>) -> OverlayResult<Self> {
        let expected = width as usize * height as usize;
        if values.len() != expected {
            return Err(OverlayError::InvalidGrid {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Create a grid where every value is present.
    pub fn from_values(width: u32, height: u32, values: &[f64]) -> OverlayResult<Self> {
        Self::new(width, height, values.iter().copied().map(Some).collect())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Get the 1D array index for a (column, row) position.
    pub fn flat_index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Sample at (column, row), `None` when out of range or missing.
    pub fn get(&self, col: u32, row: u32) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values[self.flat_index(col, row)]
    }
}

impl TryFrom<RasterResponse> for Grid {
    type Error = OverlayError;

    fn try_from(response: RasterResponse) -> Result<Self, Self::Error> {
        Grid::new(response.width, response.height, response.data)
    }
}

/// Raster payload as delivered by the data-fetch collaborator.
///
/// `data` uses JSON `null` for missing samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterResponse {
    pub width: u32,
    pub height: u32,
    pub data: Vec<Option<f64>>,
}

impl RasterResponse {
    /// Parse a response body. Accepts either a bare object or the
    /// single-element array returned by RPC-style endpoints.
    pub fn from_json(json: &str) -> OverlayResult<Self> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Body {
            One(RasterResponse),
            Many(Vec<RasterResponse>),
        }

        match serde_json::from_str::<Body>(json)? {
            Body::One(response) => Ok(response),
            Body::Many(mut rows) => {
                if rows.is_empty() {
                    return Err(OverlayError::empty_data("raster response"));
                }
                Ok(rows.swap_remove(0))
            }
        }
    }
}

/// GeoJSON geometry types accepted as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
}

/// GeoJSON point geometry. Any `type` other than `"Point"` is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            kind: GeometryType::Point,
            coordinates: [x, y],
        }
    }
}
