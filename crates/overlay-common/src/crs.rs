//! Coordinate Reference System codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OverlayError;

/// Well-known CRS codes understood by the overlay engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CrsCode {
    /// WGS84 Geographic (lon/lat in degrees)
    Epsg4326,
    /// Web Mercator on a sphere of radius 6378137 m (meters)
    Epsg3857,
    /// ETRS89 / UTM zone 30N on the GRS80 ellipsoid (meters)
    Epsg25830,
}

impl CrsCode {
    /// Check if this is a geographic (lon/lat) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CrsCode::Epsg4326)
    }

    /// Numeric EPSG code.
    pub fn epsg(&self) -> u32 {
        match self {
            CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg3857 => 3857,
            CrsCode::Epsg25830 => 25830,
        }
    }
}

impl FromStr for CrsCode {
    type Err = OverlayError;

    /// Accepts "EPSG:3857", "epsg:3857", "3857" and the common aliases
    /// "CRS:84" and "EPSG:900913".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let code = normalized.strip_prefix("EPSG:").unwrap_or(&normalized);

        match code {
            "4326" | "CRS:84" => Ok(CrsCode::Epsg4326),
            "3857" | "900913" => Ok(CrsCode::Epsg3857),
            "25830" => Ok(CrsCode::Epsg25830),
            _ => Err(OverlayError::UnsupportedCrs(s.to_string())),
        }
    }
}

impl TryFrom<String> for CrsCode {
    type Error = OverlayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CrsCode> for String {
    fn from(code: CrsCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!("EPSG:4326".parse::<CrsCode>().unwrap(), CrsCode::Epsg4326);
        assert_eq!("epsg:3857".parse::<CrsCode>().unwrap(), CrsCode::Epsg3857);
        assert_eq!("CRS:84".parse::<CrsCode>().unwrap(), CrsCode::Epsg4326);
        assert_eq!("25830".parse::<CrsCode>().unwrap(), CrsCode::Epsg25830);
        assert!("EPSG:99999".parse::<CrsCode>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for code in [CrsCode::Epsg4326, CrsCode::Epsg3857, CrsCode::Epsg25830] {
            assert_eq!(code.to_string().parse::<CrsCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&CrsCode::Epsg25830).unwrap();
        assert_eq!(json, "\"EPSG:25830\"");
        let parsed: CrsCode = serde_json::from_str("\"EPSG:3857\"").unwrap();
        assert_eq!(parsed, CrsCode::Epsg3857);
    }
}
