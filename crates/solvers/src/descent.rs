//! Visualised first-order descent over objectives of one or two parameters.
//!
//! # Algorithm
//!
//! The driver runs a fixed number of iterations. Each iteration, in order:
//!
//! 1. Evaluates the objective at the current parameters, tracking gradients.
//! 2. Marks the current point on the renderer.
//! 3. Clears accumulated gradients through the update rule.
//! 4. Accumulates the objective's gradient into the parameters.
//! 5. Steps the update rule.
//!
//! There is no convergence check: the loop always runs `iters` times and the
//! caller controls quality through `iters` and the update rule's settings.
//! Non-finite objective values are not intercepted; they flow through the
//! arithmetic into the returned solution.
//!
//! # Rendering
//!
//! Before the first iteration the objective is sampled on plain floats over
//! the plot domain (`plot_centre ± plot_boundary / 2` on each axis) and handed
//! to the renderer exactly once. Validation failures are reported before
//! anything is rendered.
//!
//! # Example
//!
//! ```
//! use optiviz_core::{Objective, Scalar};
//! use optiviz_solvers::{descent, update::Sgd};
//!
//! struct Parabola;
//!
//! impl Objective for Parabola {
//!     fn arity(&self) -> usize {
//!         1
//!     }
//!
//!     fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
//!         x[0] * x[0]
//!     }
//! }
//!
//! let config = descent::Config::new(None, 25.0, 100).unwrap();
//! let sgd = Sgd::new(0.1).unwrap();
//!
//! let solution = descent::optimise_unrendered(&Parabola, &[12.5], &config, &sgd).unwrap();
//! assert!(solution.x[0].abs() < 0.05);
//! ```

mod config;
mod error;
mod solution;
mod validate;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Point, Solution};
pub use validate::validate;

use optiviz_core::{
    Arity, Curve, Domain, Grid, Objective, Optimiser, Params, Renderer, UpdateRule,
    surface::RESOLUTION,
};
use tracing::{debug, info, warn};

use validate::{centre, fixed};

/// Minimises `objective` from `init_vector`, rendering every step.
///
/// The renderer receives the sampled surface once, then one marker per
/// iteration. Pass `&mut renderer` to keep access to it after the run.
///
/// # Errors
///
/// Returns an error before anything is rendered if the objective's arity is
/// not 1 or 2, or if `init_vector` or the configured plot centre has a
/// different length than the arity.
pub fn optimise<O, Opt, R>(
    objective: &O,
    init_vector: &[f64],
    config: &Config,
    optimiser: &Opt,
    mut renderer: R,
) -> Result<Solution, Error>
where
    O: Objective,
    Opt: Optimiser,
    R: Renderer,
{
    let arity = validate(objective, init_vector, config.plot_centre())?;
    info!(
        arity = arity.count(),
        iters = config.iters(),
        ?init_vector,
        "starting descent"
    );

    let solution = match arity {
        Arity::One => {
            let init = fixed::<1>("init_vector", init_vector)?;
            let [cx] = centre::<1>(config.plot_centre())?;

            let domain = Domain::new(cx, config.plot_boundary());
            renderer.draw_surface_1d(&Curve::sample(objective, domain, RESOLUTION));

            descend(objective, init, config.iters(), optimiser, |[x], value| {
                renderer.mark_point_1d(x, value);
            })
        }
        Arity::Two => {
            let init = fixed::<2>("init_vector", init_vector)?;
            let [cx, cy] = centre::<2>(config.plot_centre())?;

            let x_domain = Domain::new(cx, config.plot_boundary());
            let y_domain = Domain::new(cy, config.plot_boundary());
            renderer.draw_surface_2d(&Grid::sample(objective, x_domain, y_domain, RESOLUTION));

            descend(objective, init, config.iters(), optimiser, |[x, y], value| {
                renderer.mark_point_2d(x, y, value);
            })
        }
    };

    if solution.objective.is_finite() {
        info!(x = ?solution.x, objective = solution.objective, "descent finished");
    } else {
        warn!(x = ?solution.x, objective = solution.objective, "descent finished at a non-finite objective");
    }

    Ok(solution)
}

/// Minimises `objective` from `init_vector` without rendering.
///
/// This is a convenience wrapper around [`optimise`] that uses the no-op
/// renderer.
///
/// # Errors
///
/// Returns an error if the arity or argument lengths are invalid.
pub fn optimise_unrendered<O, Opt>(
    objective: &O,
    init_vector: &[f64],
    config: &Config,
    optimiser: &Opt,
) -> Result<Solution, Error>
where
    O: Objective,
    Opt: Optimiser,
{
    optimise(objective, init_vector, config, optimiser, ())
}

/// Runs the fixed-budget loop on `N` parameters.
fn descend<O, Opt, F, const N: usize>(
    objective: &O,
    init: [f64; N],
    iters: usize,
    optimiser: &Opt,
    mut mark: F,
) -> Solution
where
    O: Objective,
    Opt: Optimiser,
    F: FnMut([f64; N], f64),
{
    let mut params = Params::new(init);
    let mut rule = optimiser.build(params.as_slice());
    let mut visited: Vec<([f64; N], f64)> = Vec::new();

    for iter in 0..iters {
        let output = objective.evaluate(&params.seed());
        let x = params.values();

        mark(x, output.value);
        debug!(iter, ?x, objective = output.value, "step");
        visited.push((x, output.value));

        rule.zero_grad(params.as_mut_slice());
        params.backward(&output);
        rule.step(params.as_mut_slice());
    }

    let x = params.values();
    Solution {
        x: x.to_vec(),
        objective: objective.evaluate(&x),
        iters,
        trajectory: visited
            .into_iter()
            .map(|(x, value)| Point::new(x.to_vec(), value))
            .collect(),
    }
}
