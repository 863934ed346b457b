//! Common test fixtures for overlay tests.

/// Raster extents.
pub mod bounds {
    /// Comunitat Valenciana raster extent in EPSG:3857, south-west corner.
    pub const VALENCIA_3857_MIN: (f64, f64) = (-170029.5724387232, 4557921.961473256);

    /// Comunitat Valenciana raster extent in EPSG:3857, north-east corner.
    pub const VALENCIA_3857_MAX: (f64, f64) = (76681.0429848633, 4980761.940138878);

    /// A small square extent around the Web Mercator origin (meters).
    pub const ORIGIN_SQUARE_MIN: (f64, f64) = (-1000.0, -1000.0);
    pub const ORIGIN_SQUARE_MAX: (f64, f64) = (1000.0, 1000.0);
}

/// Sample geographic points as (lon, lat).
pub mod points {
    /// Valencia city centre
    pub const VALENCIA: (f64, f64) = (-0.3763, 39.4699);

    /// Alicante
    pub const ALICANTE: (f64, f64) = (-0.4815, 38.3452);

    /// Castellón de la Plana
    pub const CASTELLON: (f64, f64) = (-0.0513, 39.9864);

    /// Madrid, outside the Valencian extent
    pub const MADRID: (f64, f64) = (-3.7038, 40.4168);

    /// Valencia city centre in EPSG:25830 (easting, northing)
    pub const VALENCIA_UTM30: (f64, f64) = (725695.71, 4372210.14);
}

/// Layer catalog documents.
pub mod catalogs {
    /// Two-layer catalog mirroring the shipped `config/layers.yaml`.
    pub const VALENCIA_LAYERS_YAML: &str = r#"
layers:
  - id: 20230514_meantemperature_comvalenciana
    title: "Temperatura (°C)"
    unit: "°C"
    type: temperature
    bounds:
      min: [-170029.5724387232, 4557921.9614732563]
      max: [76681.0429848633, 4980761.9401388783]
  - id: 20230514_precipitation_comvalenciana
    title: "Precipitación (l/m²)"
    unit: "l/m²"
    type: precipitation
    bounds:
      min: [-170029.5724387232, 4557921.9614732563]
      max: [76681.0429848633, 4980761.9401388783]
"#;

    pub const TEMPERATURE_LAYER: &str = "20230514_meantemperature_comvalenciana";
    pub const PRECIPITATION_LAYER: &str = "20230514_precipitation_comvalenciana";
}
