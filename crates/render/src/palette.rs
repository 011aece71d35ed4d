//! Colour binning for drawing a sampled two-parameter surface as a heat map.

use optiviz_core::Grid;

/// Anchor colours of a plasma-like map, from low to high.
const PLASMA: [[u8; 3]; 5] = [
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];

/// Returns the colour at `t ∈ [0, 1]`, clamping values outside the range.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn plasma(t: f64) -> [u8; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (PLASMA.len() - 1) as f64;
    let lower = (scaled.floor() as usize).min(PLASMA.len() - 2);
    let frac = scaled - lower as f64;

    let (a, b) = (PLASMA[lower], PLASMA[lower + 1]);
    std::array::from_fn(|i| {
        let (a, b) = (f64::from(a[i]), f64::from(b[i]));
        (a + (b - a) * frac).round() as u8
    })
}

/// Splits the grid's `[x, y]` sample positions into `levels` bins by value.
///
/// Bin 0 holds the lowest values. Non-finite samples are left out. A grid
/// with a single distinct value puts every sample in bin 0.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bin_grid(grid: &Grid, levels: usize) -> Vec<Vec<[f64; 2]>> {
    let mut bins = vec![Vec::new(); levels];
    let Some((lo, hi)) = grid.value_range() else {
        return bins;
    };
    if levels == 0 {
        return bins;
    }

    let span = hi - lo;
    for [x, y, value] in grid.points().filter(|p| p[2].is_finite()) {
        let t = if span > 0.0 { (value - lo) / span } else { 0.0 };
        let index = ((t * levels as f64) as usize).min(levels - 1);
        bins[index].push([x, y]);
    }
    bins
}

/// Returns the colour of bin `index` out of `levels`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn level_colour(index: usize, levels: usize) -> [u8; 3] {
    if levels <= 1 {
        return plasma(0.0);
    }
    plasma(index as f64 / (levels - 1) as f64)
}
