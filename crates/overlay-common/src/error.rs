//! Error types for raster overlay operations.

use thiserror::Error;

/// Result type alias using OverlayError.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Primary error type for overlay operations.
///
/// Per-pixel conditions (`NoData`, `OutOfBounds`) are not errors; they are
/// reported as query outcomes by the engine.
#[derive(Debug, Error)]
pub enum OverlayError {
    // === Geometry Errors ===
    #[error("Invalid coordinate: lon={lon}, lat={lat} is outside the projection domain")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    // === Data Errors ===
    #[error("No valid samples in layer '{layer}'")]
    EmptyData { layer: String },

    #[error("Grid has {actual} values, expected {expected} (width * height)")]
    InvalidGrid { expected: usize, actual: usize },

    #[error("Invalid feature: {0}")]
    InvalidFeature(String),

    // === Configuration Errors ===
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Output Errors ===
    #[error("Image encoding failed: {0}")]
    Encode(String),
}

impl OverlayError {
    /// Create an EmptyData error for a layer.
    pub fn empty_data(layer: impl Into<String>) -> Self {
        Self::EmptyData {
            layer: layer.into(),
        }
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short machine-readable code for this error, used in CLI JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            OverlayError::InvalidCoordinate { .. } => "InvalidCoordinate",
            OverlayError::InvalidBounds(_) => "InvalidBounds",
            OverlayError::UnsupportedCrs(_) => "UnsupportedCrs",
            OverlayError::EmptyData { .. } => "EmptyData",
            OverlayError::InvalidGrid { .. } => "InvalidGrid",
            OverlayError::InvalidFeature(_) => "InvalidFeature",
            OverlayError::LayerNotFound(_) => "LayerNotFound",
            OverlayError::Config(_) => "ConfigError",
            OverlayError::Encode(_) => "EncodeError",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for OverlayError {
    fn from(err: std::io::Error) -> Self {
        OverlayError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(err: serde_json::Error) -> Self {
        OverlayError::Config(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for OverlayError {
    fn from(err: serde_yaml::Error) -> Self {
        OverlayError::Config(format!("YAML error: {}", err))
    }
}
