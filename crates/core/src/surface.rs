//! Precomputed samples of an objective over a bounded plot domain.
//!
//! The driver samples the surface once, on plain floats, before iterating;
//! renderers receive the samples and never call the objective themselves.

use crate::Objective;

/// Number of samples per axis.
pub const RESOLUTION: usize = 100;

/// A bounded interval along one axis: `centre ± half_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    centre: f64,
    half_width: f64,
}

impl Domain {
    /// Creates the domain of total `width` centred on `centre`.
    #[must_use]
    pub fn new(centre: f64, width: f64) -> Self {
        Self {
            centre,
            half_width: width / 2.0,
        }
    }

    #[must_use]
    pub fn centre(&self) -> f64 {
        self.centre
    }

    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.centre - self.half_width
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.centre + self.half_width
    }

    /// Returns `count` evenly spaced samples including both bounds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn samples(&self, count: usize) -> Vec<f64> {
        let (min, max) = (self.min(), self.max());
        match count {
            0 => Vec::new(),
            1 => vec![min],
            _ => {
                let last = count - 1;
                let step = (max - min) / last as f64;
                (0..count)
                    .map(|i| if i == last { max } else { min + step * i as f64 })
                    .collect()
            }
        }
    }
}

/// Samples of a one-parameter objective.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub domain: Domain,
    pub xs: Vec<f64>,
    pub values: Vec<f64>,
}

impl Curve {
    /// Samples `objective` at `resolution` points across `domain`.
    #[must_use]
    pub fn sample<O: Objective>(objective: &O, domain: Domain, resolution: usize) -> Self {
        let xs = domain.samples(resolution);
        let values = xs.iter().map(|&x| objective.evaluate(&[x])).collect();
        Self { domain, xs, values }
    }

    /// Iterates over `[x, value]` pairs.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.xs.iter().zip(&self.values).map(|(&x, &v)| [x, v])
    }
}

/// Samples of a two-parameter objective on a regular grid.
///
/// Values are stored row by row: `values[j * xs.len() + i]` is the objective
/// at `(xs[i], ys[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x_domain: Domain,
    pub y_domain: Domain,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub values: Vec<f64>,
}

impl Grid {
    /// Samples `objective` on a `resolution × resolution` grid.
    #[must_use]
    pub fn sample<O: Objective>(
        objective: &O,
        x_domain: Domain,
        y_domain: Domain,
        resolution: usize,
    ) -> Self {
        let xs = x_domain.samples(resolution);
        let ys = y_domain.samples(resolution);
        let values = ys
            .iter()
            .flat_map(|&y| xs.iter().map(move |&x| objective.evaluate(&[x, y])))
            .collect();
        Self {
            x_domain,
            y_domain,
            xs,
            ys,
            values,
        }
    }

    /// Returns the value at grid column `i` and row `j`.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.xs.len() + i]
    }

    /// Iterates over `[x, y, value]` triples, row by row.
    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.ys.iter().enumerate().flat_map(move |(j, &y)| {
            self.xs
                .iter()
                .enumerate()
                .map(move |(i, &x)| [x, y, self.value(i, j)])
        })
    }

    /// Returns the smallest and largest finite values, if any.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
