//! Coordinate transforms between geographic lon/lat and projected CRSs.

use overlay_common::{CrsCode, LonLat, OverlayResult};

use crate::mercator::WebMercator;
use crate::utm::TransverseMercator;
use crate::{check_finite, check_latitude, Projection};

/// Project a geographic coordinate (degrees) into `dst`.
///
/// Projecting into EPSG:4326 returns the input unchanged after domain checks.
pub fn to_projected(lon: f64, lat: f64, dst: CrsCode) -> OverlayResult<(f64, f64)> {
    match dst {
        CrsCode::Epsg4326 => {
            check_latitude(lon, lat)?;
            Ok((lon, lat))
        }
        CrsCode::Epsg3857 => WebMercator.project(lon, lat),
        CrsCode::Epsg25830 => TransverseMercator::etrs89_utm30n().project(lon, lat),
    }
}

/// Convert a coordinate in `src` to geographic (lon, lat) degrees.
pub fn to_geographic(x: f64, y: f64, src: CrsCode) -> OverlayResult<(f64, f64)> {
    match src {
        CrsCode::Epsg4326 => {
            check_finite(x, y)?;
            Ok((x, y))
        }
        CrsCode::Epsg3857 => WebMercator.unproject(x, y),
        CrsCode::Epsg25830 => TransverseMercator::etrs89_utm30n().unproject(x, y),
    }
}

/// Same as [`to_geographic`], returning a [`LonLat`].
pub fn to_lon_lat(x: f64, y: f64, src: CrsCode) -> OverlayResult<LonLat> {
    let (lon, lat) = to_geographic(x, y, src)?;
    Ok(LonLat::new(lon, lat))
}

/// Transform a coordinate between any two supported CRSs via geographic.
pub fn transform(x: f64, y: f64, from: CrsCode, to: CrsCode) -> OverlayResult<(f64, f64)> {
    if from == to {
        check_finite(x, y)?;
        return Ok((x, y));
    }
    let (lon, lat) = to_geographic(x, y, from)?;
    to_projected(lon, lat, to)
}
