//! Geographic placement of projected raster extents.

use overlay_common::{CrsCode, GeoBounds, LayerConfig, OverlayResult, ProjectedBounds};
use projection::to_lon_lat;

/// Unproject both corners of a raster extent.
///
/// `min` becomes the south-west corner and `max` the north-east corner.
/// Swapping them would flip the image vertically once placed.
pub fn to_geo_bounds(bounds: &ProjectedBounds, crs: CrsCode) -> OverlayResult<GeoBounds> {
    let south_west = to_lon_lat(bounds.min.0, bounds.min.1, crs)?;
    let north_east = to_lon_lat(bounds.max.0, bounds.max.1, crs)?;
    GeoBounds::new(south_west, north_east)
}

/// Placement bounds of a configured layer.
pub fn layer_geo_bounds(layer: &LayerConfig) -> OverlayResult<GeoBounds> {
    to_geo_bounds(&layer.bounds, layer.crs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_identity() {
        let bounds = ProjectedBounds::new((-100_000.0, 4_500_000.0), (50_000.0, 4_900_000.0)).unwrap();
        let geo = to_geo_bounds(&bounds, CrsCode::Epsg3857).unwrap();

        assert!(geo.south_west.lon < geo.north_east.lon);
        assert!(geo.south_west.lat < geo.north_east.lat);
        assert!(geo.south_west.lon < 0.0 && geo.north_east.lon > 0.0);
    }

    #[test]
    fn test_origin_square() {
        let bounds = ProjectedBounds::new((-1000.0, -1000.0), (1000.0, 1000.0)).unwrap();
        let geo = to_geo_bounds(&bounds, CrsCode::Epsg3857).unwrap();

        assert!((geo.south_west.lon + geo.north_east.lon).abs() < 1e-12);
        assert!((geo.south_west.lat + geo.north_east.lat).abs() < 1e-12);
    }
}
