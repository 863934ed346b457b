//! Raster overlay engine: placement, pixel queries and the display session.
//!
//! Ties the pure building blocks together:
//! - [`bounds`]: projected raster extents to geographic placement bounds
//! - [`query`]: click position to raw grid value
//! - [`feature_info`]: presentation of a query result
//! - [`vector`]: point rows to GeoJSON features
//! - [`session`]: the single active overlay and its derived products

pub mod bounds;
pub mod feature_info;
pub mod query;
pub mod session;
pub mod vector;

pub use bounds::{layer_geo_bounds, to_geo_bounds};
pub use feature_info::PixelReading;
pub use query::{query_projected, query_value, QueryOutcome};
pub use session::{ActiveOverlay, OverlayMetadata, OverlaySession, SessionOptions};
pub use vector::{FeatureCollection, PointFeature};
