//! Great-circle distance and map scale helpers for the measurement tool.

use overlay_common::LonLat;

/// Mean Earth radius used for distance measurement (meters)
pub const MEAN_EARTH_RADIUS: f64 = 6371000.0;

/// Scale denominator of web map zoom level 0 at the equator.
const ZOOM0_SCALE: f64 = 591657600.0;

/// Haversine distance in meters between two geographic points.
pub fn haversine_distance(a: LonLat, b: LonLat) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    MEAN_EARTH_RADIUS * c
}

/// Human-readable distance: meters with one decimal below 1 km, otherwise
/// kilometers with two decimals.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{:.1} m", meters)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Numeric scale denominator for a zoom level, rounded to one significant digit.
pub fn map_scale_denominator(zoom: u8) -> f64 {
    let scale = ZOOM0_SCALE / 2f64.powi(i32::from(zoom));
    let magnitude = 10f64.powi(scale.log10().floor() as i32);
    (scale / magnitude).round() * magnitude
}
