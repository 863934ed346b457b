//! Pixel queries: which raw grid value lies under a clicked position.

use serde::{Deserialize, Serialize};

use overlay_common::{CrsCode, Grid, LonLat, OverlayResult, ProjectedBounds};
use projection::to_projected;

/// Fraction of the larger extent side within which a point is snapped onto
/// the raster edge. Absorbs rounding from the geographic round trip.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Result of querying a raster at a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// Raw sample, neither normalized nor color-mapped.
    Value(f64),
    /// Inside the raster but the cell is missing or NaN.
    NoData,
    /// Outside the raster extent.
    OutOfBounds,
}

impl QueryOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            QueryOutcome::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, QueryOutcome::OutOfBounds)
    }
}

/// Resolve a geographic click against a raster with projected `bounds` in `crs`.
///
/// Fails only when the click cannot be projected (e.g. at a pole).
pub fn query_value(
    grid: &Grid,
    bounds: &ProjectedBounds,
    crs: CrsCode,
    click: LonLat,
) -> OverlayResult<QueryOutcome> {
    let (x, y) = to_projected(click.lon, click.lat, crs)?;
    Ok(query_projected(grid, bounds, x, y))
}

/// Resolve a point already in the raster's projected CRS.
///
/// Row 0 is the north edge, so the vertical position is flipped before
/// indexing. The east and north edges belong to the last column and the
/// first row respectively.
pub fn query_projected(grid: &Grid, bounds: &ProjectedBounds, x: f64, y: f64) -> QueryOutcome {
    let bbox = bounds.as_bbox();
    let tolerance = EDGE_TOLERANCE * bbox.width().max(bbox.height());
    let x = snap_to_edge(x, bounds.min.0, bounds.max.0, tolerance);
    let y = snap_to_edge(y, bounds.min.1, bounds.max.1, tolerance);

    if !bounds.contains(x, y) {
        return QueryOutcome::OutOfBounds;
    }

    let (rel_x, rel_y) = bounds.relative_position(x, y);
    let (Some(col), Some(row)) = (
        cell_index(rel_x, grid.width()),
        cell_index(1.0 - rel_y, grid.height()),
    ) else {
        return QueryOutcome::OutOfBounds;
    };

    match grid.get(col, row) {
        Some(v) if !v.is_nan() => QueryOutcome::Value(v),
        _ => QueryOutcome::NoData,
    }
}

#[inline]
fn snap_to_edge(v: f64, min: f64, max: f64, tolerance: f64) -> f64 {
    if (v - min).abs() <= tolerance {
        min
    } else if (v - max).abs() <= tolerance {
        max
    } else {
        v
    }
}

/// `floor(rel * size)`, with `rel == 1` mapped to the last cell.
#[inline]
fn cell_index(rel: f64, size: u32) -> Option<u32> {
    let size = f64::from(size);
    let mut idx = (rel * size).floor();
    if idx == size {
        idx -= 1.0;
    }
    if idx < 0.0 || idx >= size {
        None
    } else {
        Some(idx as u32)
    }
}
