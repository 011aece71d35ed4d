//! Animated descent runs on small objectives.
//!
//! Each mode minimises a simple function and opens a window that draws the
//! objective surface and the path the update rule takes across it.
//!
//! # Usage
//!
//! ```text
//! cargo run --example visualise --features plot -- quadratic
//! cargo run --example visualise --features plot -- wavy
//! cargo run --example visualise --features plot -- bowl
//! cargo run --example visualise --features plot -- ols
//! ```
//!
//! Set `RUST_LOG=debug` to log every step.
//!
//! # Modes
//!
//! - **quadratic** — SGD on x² from x = 12.5. Each step shrinks x by a
//!   constant factor, so the markers slide down one side of the parabola.
//!
//! - **wavy** — Adam on x² + sin²(x). The ripples slow the path near the
//!   bottom without trapping it.
//!
//! - **bowl** — Adam on x² + y² + sin²(x) + sin²(y), drawn as a heat map.
//!
//! - **ols** — SGD with momentum fitting a line to noisy samples. The two
//!   parameters are slope and intercept; the minimum sits at the least-squares
//!   fit.

use std::error::Error;

use optiviz_core::{Objective, Scalar};
use optiviz_render::{LivePlot, ShowConfig};
use optiviz_solvers::{
    descent::{self, Config, Solution},
    update::{Adam, Sgd},
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "quadratic".into());
    let solution = match mode.as_str() {
        "quadratic" => quadratic()?,
        "wavy" => wavy()?,
        "bowl" => bowl()?,
        "ols" => ols()?,
        other => {
            eprintln!("Unknown mode: {other}");
            eprintln!("Usage: visualise [quadratic|wavy|bowl|ols]");
            std::process::exit(1);
        }
    };

    println!(
        "x = {:?}, objective = {:.6} after {} iterations",
        solution.x, solution.objective, solution.iters
    );
    Ok(())
}

// --- Quadratic ---------------------------------------------------------------

/// f(x) = x²
struct Quadratic;

impl Objective for Quadratic {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[0]
    }
}

fn quadratic() -> Result<Solution, Box<dyn Error>> {
    let config = Config::new(None, 30.0, 60)?;
    let sgd = Sgd::new(0.05)?;

    let solution = LivePlot::new(ShowConfig::new().title("SGD on x²").legend())
        .run(move |renderer| descent::optimise(&Quadratic, &[12.5], &config, &sgd, renderer))??;
    Ok(solution)
}

// --- Wavy --------------------------------------------------------------------

/// f(x) = x² + sin²(x)
struct Wavy;

impl Objective for Wavy {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[0] + x[0].sin().powi(2)
    }
}

fn wavy() -> Result<Solution, Box<dyn Error>> {
    let config = Config::new(None, 25.0, 150)?;
    let adam = Adam::new(0.3)?;

    let solution = LivePlot::new(ShowConfig::new().title("Adam on x² + sin²(x)").legend())
        .run(move |renderer| descent::optimise(&Wavy, &[10.0], &config, &adam, renderer))??;
    Ok(solution)
}

// --- Bowl --------------------------------------------------------------------

/// f(x, y) = x² + y² + sin²(x) + sin²(y)
struct WavyBowl;

impl Objective for WavyBowl {
    fn arity(&self) -> usize {
        2
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[0] + x[1] * x[1] + x[0].sin().powi(2) + x[1].sin().powi(2)
    }
}

fn bowl() -> Result<Solution, Box<dyn Error>> {
    let config = Config::new(None, 20.0, 150)?;
    let adam = Adam::new(0.25)?;

    let solution = LivePlot::new(ShowConfig::new().title("Adam on a wavy bowl"))
        .run(move |renderer| descent::optimise(&WavyBowl, &[8.0, -6.0], &config, &adam, renderer))??;
    Ok(solution)
}

// --- OLS ---------------------------------------------------------------------

/// Half the mean squared error of `w·x + b` over fixed samples.
struct LeastSquares {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LeastSquares {
    /// Samples of y = 2x − 1 with a fixed, zero-mean wobble.
    fn noisy_line() -> Self {
        let xs: Vec<f64> = (0..20).map(|i| f64::from(i) * 0.25).collect();
        let ys = xs
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let wobble = if i % 2 == 0 { 0.3 } else { -0.3 };
                2.0 * x - 1.0 + wobble
            })
            .collect();
        Self { xs, ys }
    }
}

impl Objective for LeastSquares {
    fn arity(&self) -> usize {
        2
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        let (w, b) = (x[0], x[1]);
        let sum: T = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(&xi, &yi)| (w * xi + b - yi).powi(2))
            .sum();
        sum / (2.0 * self.xs.len() as f64)
    }
}

fn ols() -> Result<Solution, Box<dyn Error>> {
    let config = Config::new(Some(vec![1.0, 0.0]), 8.0, 200)?;
    let sgd = Sgd::new(0.05)?.with_momentum(0.8)?;

    let solution = LivePlot::new(ShowConfig::new().title("Least squares: slope and intercept"))
        .run(move |renderer| {
            descent::optimise(&LeastSquares::noisy_line(), &[-2.0, 2.0], &config, &sgd, renderer)
        })??;
    Ok(solution)
}
