//! Tests for geographic <-> projected transforms across supported CRSs.

use overlay_common::{CrsCode, OverlayError};
use projection::{to_geographic, to_projected, transform};
use test_utils::{assert_approx_eq, assert_rel_eq, bounds, points};

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_mercator_projected_roundtrip_over_valencia_extent() {
    let (min_x, min_y) = bounds::VALENCIA_3857_MIN;
    let (max_x, max_y) = bounds::VALENCIA_3857_MAX;

    for i in 0..=10 {
        for j in 0..=10 {
            let x = min_x + (max_x - min_x) * i as f64 / 10.0;
            let y = min_y + (max_y - min_y) * j as f64 / 10.0;

            let (lon, lat) = to_geographic(x, y, CrsCode::Epsg3857).unwrap();
            let (x2, y2) = to_projected(lon, lat, CrsCode::Epsg3857).unwrap();

            assert_rel_eq!(x2, x, 1e-6);
            assert_rel_eq!(y2, y, 1e-6);
        }
    }
}

#[test]
fn test_utm_projected_roundtrip() {
    for (x, y) in [
        points::VALENCIA_UTM30,
        (500000.0, 4427757.0),
        (250000.0, 4100000.0),
        (800000.0, 4700000.0),
    ] {
        let (lon, lat) = to_geographic(x, y, CrsCode::Epsg25830).unwrap();
        let (x2, y2) = to_projected(lon, lat, CrsCode::Epsg25830).unwrap();
        assert_rel_eq!(x2, x, 1e-6);
        assert_rel_eq!(y2, y, 1e-6);
    }
}

#[test]
fn test_mercator_high_latitude_roundtrip() {
    for lat in [-85.0, -60.0, 0.0, 60.0, 85.0] {
        let (x, y) = to_projected(10.0, lat, CrsCode::Epsg3857).unwrap();
        let (lon2, lat2) = to_geographic(x, y, CrsCode::Epsg3857).unwrap();
        assert_approx_eq!(lon2, 10.0, 1e-9);
        assert_approx_eq!(lat2, lat, 1e-9);
    }
}

// ============================================================================
// Known points
// ============================================================================

#[test]
fn test_valencia_extent_corners_geographic() {
    let (min_x, min_y) = bounds::VALENCIA_3857_MIN;
    let (max_x, max_y) = bounds::VALENCIA_3857_MAX;

    let (west, south) = to_geographic(min_x, min_y, CrsCode::Epsg3857).unwrap();
    let (east, north) = to_geographic(max_x, max_y, CrsCode::Epsg3857).unwrap();

    assert_approx_eq!(west, -1.5274, 1e-3);
    assert_approx_eq!(east, 0.6888, 1e-3);
    assert!(south > 37.0 && south < 38.0, "south = {}", south);
    assert!(north > 40.0 && north < 41.0, "north = {}", north);
}

#[test]
fn test_utm_point_to_geographic() {
    let (x, y) = points::VALENCIA_UTM30;
    let (lon, lat) = to_geographic(x, y, CrsCode::Epsg25830).unwrap();
    let (exp_lon, exp_lat) = points::VALENCIA;
    assert_approx_eq!(lon, exp_lon, 1e-6);
    assert_approx_eq!(lat, exp_lat, 1e-6);
}

#[test]
fn test_transform_same_crs_is_identity() {
    let (x, y) = transform(123.0, 456.0, CrsCode::Epsg3857, CrsCode::Epsg3857).unwrap();
    assert_eq!((x, y), (123.0, 456.0));
}

// ============================================================================
// Domain errors
// ============================================================================

#[test]
fn test_pole_latitude_is_invalid_coordinate() {
    for crs in [CrsCode::Epsg4326, CrsCode::Epsg3857, CrsCode::Epsg25830] {
        for lat in [90.0, -90.0, 91.0, -120.0] {
            match to_projected(0.0, lat, crs) {
                Err(OverlayError::InvalidCoordinate { lat: got, .. }) => assert_eq!(got, lat),
                other => panic!("{crs}: expected InvalidCoordinate for lat {lat}, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_non_finite_input_is_invalid_coordinate() {
    assert!(to_projected(f64::NAN, 10.0, CrsCode::Epsg3857).is_err());
    assert!(to_geographic(f64::INFINITY, 0.0, CrsCode::Epsg3857).is_err());
    assert!(to_geographic(0.0, f64::NAN, CrsCode::Epsg25830).is_err());
}
