//! Common types and utilities shared across the raster overlay crates.

pub mod bbox;
pub mod crs;
pub mod error;
pub mod grid;
pub mod layer;

pub use bbox::{BoundingBox, GeoBounds, LonLat, ProjectedBounds};
pub use crs::CrsCode;
pub use error::{OverlayError, OverlayResult};
pub use grid::{GeometryType, Grid, PointGeometry, RasterResponse};
pub use layer::{LayerCatalog, LayerConfig, LayerKind};
