//! Raster compositing: grid samples to an RGBA image.

use rayon::prelude::*;
use serde::Serialize;

use overlay_common::{Grid, LayerKind, OverlayResult};

use crate::ramp::ColorRamp;
use crate::stats::Statistics;

/// Minimum cell count before compositing is spread across threads
const PARALLEL_THRESHOLD: usize = 4096; // 64x64 or larger

/// RGBA image, 4 bytes per pixel, in the grid's row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Fully transparent image.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// RGBA bytes of the pixel at (column, row).
    pub fn pixel(&self, col: u32, row: u32) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let offset = (row as usize * self.width as usize + col as usize) * 4;
        let px = &self.rgba[offset..offset + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.rgba.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Encode as PNG, choosing indexed color when the palette allows.
    pub fn to_png(&self) -> OverlayResult<Vec<u8>> {
        crate::png::encode_png_auto(&self.rgba, self.width as usize, self.height as usize)
    }
}

#[inline]
fn paint<R: ColorRamp + ?Sized>(
    px: &mut [u8],
    sample: Option<f64>,
    stats: &Statistics,
    kind: LayerKind,
    ramp: &R,
) {
    match sample {
        Some(value) if kind.accepts(sample) => {
            let color = ramp.color_for(stats.normalize(value));
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
        // "No data" is transparency, not a color.
        _ => px.fill(0),
    }
}

/// Render `grid` into an RGBA image.
///
/// Samples accepted by `kind` are normalized against `stats` (clamped to
/// [0, 1]), colored with `ramp` and made fully opaque; every other pixel is
/// fully transparent. No vertical flip is applied.
pub fn composite<R: ColorRamp + ?Sized>(
    grid: &Grid,
    stats: &Statistics,
    kind: LayerKind,
    ramp: &R,
) -> RasterImage {
    let mut image = RasterImage::transparent(grid.width(), grid.height());
    let values = grid.values();

    if values.len() >= PARALLEL_THRESHOLD {
        image
            .rgba
            .par_chunks_exact_mut(4)
            .zip(values.par_iter())
            .for_each(|(px, sample)| paint(px, *sample, stats, kind, ramp));
    } else {
        image
            .rgba
            .chunks_exact_mut(4)
            .zip(values.iter())
            .for_each(|(px, sample)| paint(px, *sample, stats, kind, ramp));
    }

    image
}
