//! Generators for synthetic measurement grids.
//!
//! Grids are row-major with row 0 at the north edge and use `None` for
//! missing samples, matching the raster payload delivered to the engine.

/// Grid where each cell encodes its position as `col * 1000 + row`.
///
/// ```
/// use test_utils::create_index_grid;
///
/// let grid = create_index_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[1], Some(1000.0)); // col=1, row=0
/// assert_eq!(grid[10], Some(1.0));   // col=0, row=1
/// ```
pub fn create_index_grid(width: usize, height: usize) -> Vec<Option<f64>> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push(Some((col * 1000 + row) as f64));
        }
    }
    data
}

/// Temperature-like grid in °C with a zero no-data frame one cell wide.
///
/// Interior values run from about 8°C (north-west) to 26°C (south-east).
pub fn create_temperature_grid(width: usize, height: usize) -> Vec<Option<f64>> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let edge = row == 0 || col == 0 || row + 1 == height || col + 1 == width;
            if edge {
                data.push(Some(0.0));
                continue;
            }
            let x_factor = col as f64 / width.max(1) as f64;
            let y_factor = row as f64 / height.max(1) as f64;
            data.push(Some(8.0 + x_factor * 9.0 + y_factor * 9.0));
        }
    }
    data
}

/// Precipitation-like grid in l/m²: a single storm cell centred in the grid,
/// falling to near-zero drizzle at the edges.
pub fn create_precipitation_grid(width: usize, height: usize) -> Vec<Option<f64>> {
    let mut data = Vec::with_capacity(width * height);
    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = cx.min(cy).max(1.0);

    for row in 0..height {
        for col in 0..width {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let dist = (dx * dx + dy * dy).sqrt() / radius;
            data.push(Some((40.0 * (1.0 - dist)).max(0.2)));
        }
    }
    data
}

/// Grid with every value set to `value`.
pub fn create_constant_grid(width: usize, height: usize, value: f64) -> Vec<Option<f64>> {
    vec![Some(value); width * height]
}

/// Copy of `data` with every `interval`-th cell missing; NaN is used for
/// odd multiples and `None` for even ones so both paths are covered.
pub fn create_grid_with_gaps(data: &[Option<f64>], interval: usize) -> Vec<Option<f64>> {
    let interval = interval.max(1);
    data.iter()
        .enumerate()
        .map(|(i, v)| {
            if i % interval != 0 {
                *v
            } else if (i / interval) % 2 == 1 {
                Some(f64::NAN)
            } else {
                None
            }
        })
        .collect()
}
