//! Integration tests for compositing grids into RGBA images.

use overlay_common::{Grid, LayerKind};
use renderer::{composite, compute_stats, Color, ColorRamp, HueRamp};
use test_utils::{
    create_constant_grid, create_grid_with_gaps, create_precipitation_grid,
    create_temperature_grid,
};

fn render(grid: &Grid, kind: LayerKind) -> renderer::RasterImage {
    let stats = compute_stats(grid, kind).unwrap();
    composite(grid, &stats, kind, &HueRamp)
}

#[test]
fn test_temperature_zeros_are_transparent() {
    let grid = Grid::from_values(2, 2, &[0.0, 5.0, 0.0, 3.0]).unwrap();
    let image = render(&grid, LayerKind::Temperature);

    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(image.pixel(0, 1), Some([0, 0, 0, 0]));
    // 5 is the max, 3 the min
    assert_eq!(image.pixel(1, 0), Some([255, 0, 0, 255]));
    assert_eq!(image.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(image.opaque_pixel_count(), 2);
}

#[test]
fn test_precipitation_noise_is_transparent() {
    let grid = Grid::from_values(4, 1, &[0.5, 1.0, 1.5, 11.5]).unwrap();
    let image = render(&grid, LayerKind::Precipitation);

    assert_eq!(image.pixel(0, 0).unwrap()[3], 0);
    assert_eq!(image.pixel(1, 0).unwrap()[3], 0);
    assert_eq!(image.pixel(2, 0), Some([0, 0, 255, 255]));
    assert_eq!(image.pixel(3, 0), Some([255, 0, 0, 255]));
}

#[test]
fn test_alpha_follows_validity_rule() {
    let data = create_grid_with_gaps(&create_temperature_grid(40, 30), 7);
    let grid = Grid::new(40, 30, data).unwrap();
    let image = render(&grid, LayerKind::Temperature);

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let sample = grid.values()[grid.flat_index(col, row)];
            let alpha = image.pixel(col, row).unwrap()[3];
            let expected = if LayerKind::Temperature.accepts(sample) { 255 } else { 0 };
            assert_eq!(alpha, expected, "pixel ({}, {})", col, row);
        }
    }
}

#[test]
fn test_parallel_matches_sequential_rows() {
    // Large enough to take the parallel path; each row rendered alone
    // stays below the threshold and goes through the sequential path.
    let (width, height) = (128u32, 64u32);
    let data = create_precipitation_grid(width as usize, height as usize);
    let grid = Grid::new(width, height, data.clone()).unwrap();
    let stats = compute_stats(&grid, LayerKind::Precipitation).unwrap();
    let image = composite(&grid, &stats, LayerKind::Precipitation, &HueRamp);

    for row in 0..height {
        let start = (row * width) as usize;
        let row_grid = Grid::new(width, 1, data[start..start + width as usize].to_vec()).unwrap();
        let row_image = composite(&row_grid, &stats, LayerKind::Precipitation, &HueRamp);
        let offset = start * 4;
        assert_eq!(
            &image.rgba[offset..offset + width as usize * 4],
            &row_image.rgba[..],
            "row {}",
            row
        );
    }
}

#[test]
fn test_single_value_layer_renders_blue() {
    let grid = Grid::new(3, 3, create_constant_grid(3, 3, 21.5)).unwrap();
    let image = render(&grid, LayerKind::Temperature);

    assert_eq!(image.opaque_pixel_count(), 9);
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(image.pixel(col, row), Some([0, 0, 255, 255]));
        }
    }
}

#[test]
fn test_custom_ramp() {
    let grey = |v: f64| {
        let c = (v * 255.0).round() as u8;
        Color::opaque(c, c, c)
    };
    assert_eq!(grey.color_for(1.0), Color::opaque(255, 255, 255));

    let grid = Grid::from_values(2, 1, &[10.0, 20.0]).unwrap();
    let stats = compute_stats(&grid, LayerKind::Temperature).unwrap();
    let image = composite(&grid, &stats, LayerKind::Temperature, &grey);

    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(image.pixel(1, 0), Some([255, 255, 255, 255]));
}

#[test]
fn test_png_round_trip_header() {
    let grid = Grid::new(16, 8, create_temperature_grid(16, 8)).unwrap();
    let image = render(&grid, LayerKind::Temperature);
    let png = image.to_png().unwrap();

    assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(u32::from_be_bytes(png[16..20].try_into().unwrap()), 16);
    assert_eq!(u32::from_be_bytes(png[20..24].try_into().unwrap()), 8);
}
