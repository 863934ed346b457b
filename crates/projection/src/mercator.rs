//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Maps longitude/latitude on a sphere of radius 6378137 m to planar meters:
//! - x = R * lon
//! - y = R * ln(tan(pi/4 + lat/2))
//!
//! The inverse is defined for every finite (x, y); the forward direction is
//! undefined at the poles.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use overlay_common::OverlayResult;

use crate::{check_finite, check_latitude, Projection};

/// Web Mercator sphere radius (meters)
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the projected width of the world (meters).
pub const MAX_EXTENT: f64 = std::f64::consts::PI * EARTH_RADIUS;

/// Spherical Web Mercator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebMercator;

impl Projection for WebMercator {
    fn project(&self, lon: f64, lat: f64) -> OverlayResult<(f64, f64)> {
        check_latitude(lon, lat)?;
        let x = EARTH_RADIUS * lon.to_radians();
        let y = EARTH_RADIUS * (FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
        Ok((x, y))
    }

    fn unproject(&self, x: f64, y: f64) -> OverlayResult<(f64, f64)> {
        check_finite(x, y)?;
        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
        Ok((lon, lat))
    }
}
