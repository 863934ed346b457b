//! Coordinate reference system transformations.
//!
//! Implements the map projections the overlay engine needs from scratch:
//! spherical Web Mercator for raster extents and ellipsoidal Transverse
//! Mercator (UTM) for vector point data.

pub mod measure;
pub mod mercator;
pub mod transform;
pub mod utm;

pub use measure::{format_distance, haversine_distance, map_scale_denominator};
pub use mercator::WebMercator;
pub use transform::{to_geographic, to_lon_lat, to_projected, transform};
pub use utm::TransverseMercator;

use overlay_common::{OverlayError, OverlayResult};

/// A planar map projection of geographic coordinates in degrees.
pub trait Projection {
    /// Geographic (lon, lat) in degrees to planar (x, y).
    fn project(&self, lon: f64, lat: f64) -> OverlayResult<(f64, f64)>;

    /// Planar (x, y) to geographic (lon, lat) in degrees.
    fn unproject(&self, x: f64, y: f64) -> OverlayResult<(f64, f64)>;
}

/// Reject latitudes at or beyond the poles and non-finite input.
pub(crate) fn check_latitude(lon: f64, lat: f64) -> OverlayResult<()> {
    if !lon.is_finite() || !lat.is_finite() || lat.abs() >= 90.0 {
        return Err(OverlayError::InvalidCoordinate { lon, lat });
    }
    Ok(())
}

pub(crate) fn check_finite(x: f64, y: f64) -> OverlayResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(OverlayError::InvalidCoordinate { lon: x, lat: y });
    }
    Ok(())
}
