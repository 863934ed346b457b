//! Subcommand implementations. Each returns its result instead of printing
//! so the binary decides on presentation.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use overlay_common::{CrsCode, LayerCatalog, LonLat, RasterResponse};
use overlay_engine::{FeatureCollection, OverlayMetadata, OverlaySession, PixelReading};
use projection::{format_distance, haversine_distance, map_scale_denominator};
use renderer::{HueRamp, Legend};

use crate::config::OverlaySettings;

/// Files written by `render`.
#[derive(Debug, Clone, Serialize)]
pub struct RenderOutput {
    pub png_path: PathBuf,
    pub metadata_path: PathBuf,
    pub metadata: OverlayMetadata,
}

fn read_raster(input: &Path) -> Result<RasterResponse> {
    let body = fs::read_to_string(input)
        .with_context(|| format!("Failed to read raster payload {}", input.display()))?;
    RasterResponse::from_json(&body)
        .with_context(|| format!("Invalid raster payload {}", input.display()))
}

fn load_session(
    settings: &OverlaySettings,
    catalog: &LayerCatalog,
    layer_id: &str,
    input: &Path,
) -> Result<OverlaySession> {
    let layer = catalog.get(layer_id)?;
    let response = read_raster(input)?;
    let mut session = OverlaySession::new(settings.session_options());
    session
        .load(layer, response)
        .with_context(|| format!("Failed to load layer {}", layer_id))?;
    Ok(session)
}

/// Render a layer to `<out_dir>/<layer>.png` plus `<layer>.json` metadata.
pub fn render(
    settings: &OverlaySettings,
    catalog: &LayerCatalog,
    layer_id: &str,
    input: &Path,
    out_dir: &Path,
) -> Result<RenderOutput> {
    let session = load_session(settings, catalog, layer_id, input)?;
    let Some(overlay) = session.active() else {
        bail!("No overlay loaded for {}", layer_id);
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let png = overlay.image.to_png()?;
    let png_path = out_dir.join(format!("{}.png", layer_id));
    fs::write(&png_path, &png)
        .with_context(|| format!("Failed to write {}", png_path.display()))?;

    let metadata = overlay.metadata();
    let metadata_path = out_dir.join(format!("{}.json", layer_id));
    fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

    info!(
        layer = %layer_id,
        png = %png_path.display(),
        bytes = png.len(),
        "Rendered overlay"
    );

    Ok(RenderOutput {
        png_path,
        metadata_path,
        metadata,
    })
}

/// Reading at a clicked position. `None` when the click misses the raster.
pub fn query(
    settings: &OverlaySettings,
    catalog: &LayerCatalog,
    layer_id: &str,
    input: &Path,
    click: LonLat,
) -> Result<Option<PixelReading>> {
    let session = load_session(settings, catalog, layer_id, input)?;
    Ok(session.query(click)?)
}

/// Legend for a value range under the hue ramp.
pub fn legend(settings: &OverlaySettings, min: f64, max: f64) -> Result<Legend> {
    if !(min.is_finite() && max.is_finite()) || min > max {
        bail!("Invalid legend range: {} to {}", min, max);
    }
    Ok(Legend::new("", "", &HueRamp, settings.legend_step, min, max))
}

/// Point rows (JSON array) to a GeoJSON feature collection in lon/lat.
pub fn points(input: &Path, source_crs: CrsCode) -> Result<FeatureCollection> {
    let body = fs::read_to_string(input)
        .with_context(|| format!("Failed to read point rows {}", input.display()))?;
    let table = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("points");
    let collection = FeatureCollection::from_json(table, &body, source_crs)?;
    info!(table = %table, features = collection.len(), "Converted point rows");
    Ok(collection)
}

/// Great-circle distance between two points, in meters and formatted.
pub fn distance(from: LonLat, to: LonLat) -> (f64, String) {
    let meters = haversine_distance(from, to);
    (meters, format_distance(meters))
}

/// Numeric scale denominator for a zoom level, e.g. `1:5.000.000`.
pub fn scale(zoom: u8) -> String {
    format!("1:{}", group_thousands(map_scale_denominator(zoom)))
}

/// Spanish digit grouping: `.` between thousands, none below five digits.
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value);
    if digits.len() <= 4 {
        return digits;
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Parse `LON,LAT` in degrees.
pub fn parse_lon_lat(text: &str) -> Result<LonLat> {
    let Some((lon, lat)) = text.split_once(',') else {
        bail!("Expected LON,LAT, got {:?}", text);
    };
    let lon: f64 = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude in {:?}", text))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude in {:?}", text))?;
    Ok(LonLat::new(lon, lat))
}
