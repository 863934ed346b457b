//! Integration tests for statistics, histograms and legends.

use overlay_common::{Grid, LayerKind};
use renderer::{
    compute_histogram, compute_stats, valid_values, HueRamp, Legend, DEFAULT_BINS,
    DEFAULT_LEGEND_STEP,
};
use test_utils::{create_grid_with_gaps, create_precipitation_grid, create_temperature_grid};

#[test]
fn test_all_zero_temperature_is_empty() {
    let grid = Grid::from_values(2, 2, &[0.0, 0.0, 0.0, 0.0]).unwrap();
    let err = compute_stats(&grid, LayerKind::Temperature).unwrap_err();
    assert_eq!(err.code(), "EmptyData");
}

#[test]
fn test_all_missing_is_empty() {
    let grid = Grid::new(2, 1, vec![None, Some(f64::NAN)]).unwrap();
    assert!(compute_stats(&grid, LayerKind::Precipitation).is_err());
    assert!(compute_stats(&grid, LayerKind::Temperature).is_err());
}

#[test]
fn test_mean_between_extremes() {
    for (width, height) in [(3, 3), (17, 11), (64, 48)] {
        let (w, h) = (width as usize, height as usize);
        let temp = Grid::new(width, height, create_temperature_grid(w, h)).unwrap();
        let stats = compute_stats(&temp, LayerKind::Temperature).unwrap();
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);

        let rain_data = create_grid_with_gaps(&create_precipitation_grid(w, h), 5);
        let rain = Grid::new(width, height, rain_data).unwrap();
        let stats = compute_stats(&rain, LayerKind::Precipitation).unwrap();
        assert!(stats.min > 1.0);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    }
}

#[test]
fn test_histogram_total_matches_valid_count() {
    let grid = Grid::new(50, 40, create_precipitation_grid(50, 40)).unwrap();
    let stats = compute_stats(&grid, LayerKind::Precipitation).unwrap();
    let values = valid_values(&grid, LayerKind::Precipitation);
    let hist = compute_histogram(&values, stats.min, stats.max, DEFAULT_BINS);

    assert_eq!(hist.bins(), 30);
    assert_eq!(hist.total(), stats.valid_count);
    assert!(hist.counts[29] >= 1);
}

#[test]
fn test_histogram_upper_edge_clamp() {
    let hist = compute_histogram(&[0.0, 10.0], 0.0, 10.0, 30);
    assert_eq!(hist.counts[0], 1);
    assert_eq!(hist.counts[29], 1);
    assert_eq!(hist.total(), 2);
}

#[test]
fn test_legend_for_layer_extent() {
    let grid = Grid::from_values(2, 2, &[12.0, 18.0, 0.0, 25.0]).unwrap();
    let stats = compute_stats(&grid, LayerKind::Temperature).unwrap();
    let legend = Legend::new(
        "Temperatura media (°C)",
        "°C",
        &HueRamp,
        DEFAULT_LEGEND_STEP,
        stats.min,
        stats.max,
    );

    assert_eq!(legend.stops.len(), 11);
    assert_eq!(legend.scale.labels(), ["12.0", "18.5", "25.0"].map(String::from));
    let css = legend.css_linear_gradient();
    assert!(css.starts_with("linear-gradient(to right, rgb(0,0,255) 0%"));
    assert!(css.ends_with("rgb(255,0,0) 100%)"));
}

#[test]
fn test_statistics_serialize() {
    let grid = Grid::from_values(1, 3, &[2.0, 4.0, 6.0]).unwrap();
    let stats = compute_stats(&grid, LayerKind::Precipitation).unwrap();
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["min"], 2.0);
    assert_eq!(json["max"], 6.0);
    assert_eq!(json["mean"], 4.0);
    assert_eq!(json["valid_count"], 3);
}
