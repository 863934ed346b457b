//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{OverlayError, OverlayResult};

/// An axis-aligned box in arbitrary planar or angular units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Whether min < max on both axes.
    pub fn is_ordered(&self) -> bool {
        self.min_x < self.max_x && self.min_y < self.max_y
    }
}

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Raster extent in projected planar units.
///
/// `min` is the south-west corner and `max` the north-east corner. The
/// ordering `min < max` on both axes is checked on construction and on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProjectedBounds")]
pub struct ProjectedBounds {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

#[derive(Deserialize)]
struct RawProjectedBounds {
    min: (f64, f64),
    max: (f64, f64),
}

impl TryFrom<RawProjectedBounds> for ProjectedBounds {
    type Error = OverlayError;

    fn try_from(raw: RawProjectedBounds) -> Result<Self, Self::Error> {
        ProjectedBounds::new(raw.min, raw.max)
    }
}

impl ProjectedBounds {
    /// Create projected bounds, rejecting unordered or non-finite corners.
    pub fn new(min: (f64, f64), max: (f64, f64)) -> OverlayResult<Self> {
        let finite = [min.0, min.1, max.0, max.1].iter().all(|v| v.is_finite());
        if !finite || min.0 >= max.0 || min.1 >= max.1 {
            return Err(OverlayError::InvalidBounds(format!(
                "expected min < max, got min={:?} max={:?}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn as_bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min.0, self.min.1, self.max.0, self.max.1)
    }

    /// Check if a projected point is inside the extent (edges inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.as_bbox().contains_point(x, y)
    }

    /// Position of a point relative to the extent, (0,0) at `min`, (1,1) at `max`.
    pub fn relative_position(&self, x: f64, y: f64) -> (f64, f64) {
        let bbox = self.as_bbox();
        (
            (x - bbox.min_x) / bbox.width(),
            (y - bbox.min_y) / bbox.height(),
        )
    }
}

/// Geographic placement of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: LonLat,
    pub north_east: LonLat,
}

impl GeoBounds {
    /// Create geographic bounds, rejecting swapped corners.
    pub fn new(south_west: LonLat, north_east: LonLat) -> OverlayResult<Self> {
        if !(south_west.lon < north_east.lon && south_west.lat < north_east.lat) {
            return Err(OverlayError::InvalidBounds(format!(
                "south-west {:?} is not below/left of north-east {:?}",
                south_west, north_east
            )));
        }
        Ok(Self {
            south_west,
            north_east,
        })
    }

    /// Corners in `[[lat, lon], [lat, lon]]` order, as web map overlays expect.
    pub fn to_lat_lng_pairs(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lon],
            [self.north_east.lat, self.north_east.lon],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_bounds_rejects_unordered() {
        assert!(ProjectedBounds::new((0.0, 0.0), (10.0, 10.0)).is_ok());
        assert!(ProjectedBounds::new((10.0, 0.0), (0.0, 10.0)).is_err());
        assert!(ProjectedBounds::new((0.0, 5.0), (10.0, 5.0)).is_err());
        assert!(ProjectedBounds::new((0.0, f64::NAN), (10.0, 5.0)).is_err());
    }

    #[test]
    fn test_relative_position() {
        let bounds = ProjectedBounds::new((100.0, 200.0), (300.0, 600.0)).unwrap();
        assert_eq!(bounds.relative_position(100.0, 200.0), (0.0, 0.0));
        assert_eq!(bounds.relative_position(300.0, 600.0), (1.0, 1.0));
        assert_eq!(bounds.relative_position(200.0, 300.0), (0.5, 0.25));
    }

    #[test]
    fn test_contains_edges_inclusive() {
        let bounds = ProjectedBounds::new((0.0, 0.0), (10.0, 10.0)).unwrap();
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(10.0, 10.0));
        assert!(!bounds.contains(10.0001, 5.0));
        assert!(!bounds.contains(5.0, -0.0001));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<ProjectedBounds, _> =
            serde_json::from_str(r#"{"min": [1.0, 2.0], "max": [3.0, 4.0]}"#);
        assert_eq!(ok.unwrap().max, (3.0, 4.0));

        let bad: Result<ProjectedBounds, _> =
            serde_json::from_str(r#"{"min": [3.0, 4.0], "max": [1.0, 2.0]}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_geo_bounds_lat_lng_pairs() {
        let bounds = GeoBounds::new(LonLat::new(-1.5, 37.8), LonLat::new(0.7, 40.8)).unwrap();
        assert_eq!(bounds.to_lat_lng_pairs(), [[37.8, -1.5], [40.8, 0.7]]);
        assert!(GeoBounds::new(LonLat::new(0.7, 40.8), LonLat::new(-1.5, 37.8)).is_err());
    }
}
