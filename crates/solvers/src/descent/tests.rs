use approx::assert_relative_eq;

use optiviz_core::{Objective, Scalar, UnsupportedArity};
use optiviz_render::{Marker, Recorder, Surface};

use crate::update::{Adagrad, Adam, RmsProp, Sgd};

use super::{Config, ConfigError, Error, optimise, optimise_unrendered, validate};

/// f(x) = x²
struct Parabola;

impl Objective for Parabola {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[0]
    }
}

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

/// f(x, y) = x² + y²
struct Bowl;

impl Objective for Bowl {
    fn arity(&self) -> usize {
        2
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[0] + x[1] * x[1]
    }
}

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

/// f(x, y) = (x − 1)² + (y + 2)²
struct OffsetBowl;

impl Objective for OffsetBowl {
    fn arity(&self) -> usize {
        2
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2)
    }
}

/// Half the mean squared error of the line `w·x + b` over fixed samples.
///
/// The samples are data, so the arity is 2 (`w` and `b`).
struct LeastSquares {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl LeastSquares {
    fn new() -> Self {
        Self {
            xs: vec![-2.0, -1.0, 0.0, 1.0, 2.0],
            ys: vec![2.0, 3.0, 4.0, 5.0, 6.0],
        }
    }
}

impl Objective for LeastSquares {
    fn arity(&self) -> usize {
        2
    }

    #[allow(clippy::cast_precision_loss)]
    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        let (w, b) = (x[0], x[1]);
        let n = self.xs.len() as f64;
        let total: T = self
            .xs
            .iter()
            .zip(&self.ys)
            .map(|(&xi, &yi)| (w * xi + b - yi).powi(2))
            .sum();
        total / n / 2.0
    }
}

struct ThreeInputs;

impl Objective for ThreeInputs {
    fn arity(&self) -> usize {
        3
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0] * x[1] * x[2]
    }
}

/// f(x) = √x, which is NaN for negative x.
struct Root;

impl Objective for Root {
    fn arity(&self) -> usize {
        1
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        x[0].sqrt()
    }
}

fn config(plot_centre: Option<Vec<f64>>, plot_boundary: f64, iters: usize) -> Config {
    Config::new(plot_centre, plot_boundary, iters).expect("valid config")
}

fn sgd(lr: f64) -> Sgd {
    Sgd::new(lr).expect("valid lr")
}

// --- Convergence ---

#[test]
fn sgd_minimises_parabola() {
    let solution = optimise_unrendered(
        &Parabola,
        &[12.5],
        &config(Some(vec![0.0]), 25.0, 100),
        &sgd(0.1),
    )
    .expect("should run");

    assert_eq!(solution.x.len(), 1);
    assert!(solution.x[0].abs() < 0.05);
    assert_eq!(solution.iters, 100);
}

#[test]
fn sgd_minimises_bowl() {
    let solution = optimise_unrendered(
        &Bowl,
        &[12.5, 12.5],
        &config(Some(vec![0.0, 0.0]), 25.0, 100),
        &sgd(0.1),
    )
    .expect("should run");

    assert_eq!(solution.x.len(), 2);
    assert!(solution.x[0].abs() < 0.05);
    assert!(solution.x[1].abs() < 0.05);
}

#[test]
fn sgd_fits_least_squares_line() {
    let solution = optimise_unrendered(
        &LeastSquares::new(),
        &[12.5, 12.5],
        &config(None, 50.0, 100),
        &sgd(0.1),
    )
    .expect("should run");

    let &[w, b] = solution.x.as_slice() else {
        panic!("expected two parameters");
    };
    assert!((w - 1.0).abs() < 0.05);
    assert!((b - 4.0).abs() < 0.05);
}

#[test]
fn adam_minimises_wavy_objectives() {
    let adam = Adam::new(0.5).expect("valid lr");

    let one = optimise_unrendered(&Wavy, &[12.5], &config(Some(vec![0.0]), 25.0, 100), &adam)
        .expect("should run");
    assert!(one.x[0].abs() < 0.05);

    let two = optimise_unrendered(
        &WavyBowl,
        &[12.5, 12.5],
        &config(Some(vec![0.0, 0.0]), 25.0, 100),
        &adam,
    )
    .expect("should run");
    assert!(two.x[0].abs() < 0.05);
    assert!(two.x[1].abs() < 0.05);
}

#[test]
fn other_rules_minimise_parabola() {
    let momentum = sgd(0.1).with_momentum(0.5).expect("valid momentum");
    let with_momentum =
        optimise_unrendered(&Parabola, &[12.5], &config(None, 25.0, 100), &momentum)
            .expect("should run");
    assert!(with_momentum.x[0].abs() < 0.05);

    let adagrad = Adagrad::new(5.0).expect("valid lr");
    let adaptive = optimise_unrendered(&Parabola, &[12.5], &config(None, 25.0, 200), &adagrad)
        .expect("should run");
    assert!(adaptive.x[0].abs() < 0.05);

    let rms = RmsProp::new(0.1).expect("valid lr");
    let averaged = optimise_unrendered(&Parabola, &[12.5], &config(None, 25.0, 300), &rms)
        .expect("should run");
    assert!(averaged.x[0].abs() < 0.05);
}

#[test]
fn preserves_parameter_order() {
    let solution = optimise_unrendered(&OffsetBowl, &[5.0, 5.0], &config(None, 25.0, 200), &sgd(0.1))
        .expect("should run");

    assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-6);
    assert_relative_eq!(solution.x[1], -2.0, epsilon = 1e-6);
    assert_relative_eq!(solution.objective, 0.0, epsilon = 1e-10);
}

#[test]
fn identical_runs_reach_identical_endpoints() {
    let adam = Adam::new(0.5).expect("valid lr");
    let config = config(None, 25.0, 50);

    let first = optimise_unrendered(&WavyBowl, &[3.0, -4.0], &config, &adam).expect("should run");
    let second = optimise_unrendered(&WavyBowl, &[3.0, -4.0], &config, &adam).expect("should run");

    assert_eq!(first, second);
}

// --- Rendering ---

#[test]
fn draws_surface_once_then_marks_every_iteration() {
    let mut recorder = Recorder::new();

    let solution = optimise(
        &Parabola,
        &[3.0],
        &config(Some(vec![1.0]), 10.0, 5),
        &sgd(0.1),
        &mut recorder,
    )
    .expect("should run");

    let [Surface::Curve(curve)] = recorder.surfaces() else {
        panic!("expected a single curve");
    };
    assert_eq!(curve.xs.len(), 100);
    assert_relative_eq!(curve.xs[0], -4.0);
    assert_relative_eq!(curve.xs[99], 6.0);
    assert_relative_eq!(curve.values[0], 16.0);

    let markers = recorder.markers();
    assert_eq!(markers.len(), 5);
    assert_eq!(markers[0], Marker::one(3.0, 9.0));
    // x ← 0.8 x each step.
    assert_relative_eq!(markers[1].x, 2.4);

    for (marker, point) in markers.iter().zip(&solution.trajectory) {
        assert_relative_eq!(marker.x, point.x[0]);
        assert_relative_eq!(marker.value, point.objective);
    }
}

#[test]
fn two_parameter_runs_draw_a_grid() {
    let mut recorder = Recorder::new();

    optimise(
        &Bowl,
        &[2.0, -1.0],
        &config(None, 4.0, 3),
        &sgd(0.1),
        &mut recorder,
    )
    .expect("should run");

    let [Surface::Grid(grid)] = recorder.surfaces() else {
        panic!("expected a single grid");
    };
    assert_eq!(grid.values.len(), 100 * 100);
    assert_relative_eq!(grid.x_domain.min(), -2.0);
    assert_relative_eq!(grid.y_domain.max(), 2.0);
    assert_relative_eq!(grid.value(0, 0), 8.0);

    assert_eq!(recorder.markers().len(), 3);
    assert_eq!(recorder.markers()[0], Marker::two(2.0, -1.0, 5.0));
}

#[test]
fn trajectory_starts_at_initial_point() {
    let solution = optimise_unrendered(&Bowl, &[1.0, 2.0], &config(None, 25.0, 4), &sgd(0.25))
        .expect("should run");

    assert_eq!(solution.trajectory.len(), 4);
    assert_eq!(solution.trajectory[0].x, vec![1.0, 2.0]);
    assert_relative_eq!(solution.trajectory[0].objective, 5.0);
    // x ← 0.5 x each step.
    assert_eq!(solution.trajectory[1].x, vec![0.5, 1.0]);
    assert_eq!(solution.x, vec![0.0625, 0.125]);
}

// --- Validation ---

#[test]
fn rejects_three_parameter_objective_before_rendering() {
    let mut recorder = Recorder::new();

    let err = optimise(
        &ThreeInputs,
        &[1.0, 2.0, 3.0],
        &Config::default(),
        &Adam::default(),
        &mut recorder,
    )
    .unwrap_err();

    assert_eq!(err, Error::Arity(UnsupportedArity(3)));
    assert_eq!(
        err.to_string(),
        "objective must take 1 or 2 free parameters, found 3"
    );
    assert!(recorder.is_empty());
}

#[test]
fn rejects_mismatched_init_vector_before_rendering() {
    let mut recorder = Recorder::new();

    let err = optimise(
        &Parabola,
        &[1.0, 2.0],
        &Config::default(),
        &Adam::default(),
        &mut recorder,
    )
    .unwrap_err();

    assert_eq!(
        err,
        Error::DimensionMismatch {
            argument: "init_vector",
            expected: 1,
            found: 2,
        }
    );
    assert!(recorder.is_empty());
}

#[test]
fn rejects_mismatched_plot_centre_before_rendering() {
    let mut recorder = Recorder::new();

    let err = optimise(
        &Bowl,
        &[1.0, 2.0],
        &config(Some(vec![0.0]), 25.0, 10),
        &Adam::default(),
        &mut recorder,
    )
    .unwrap_err();

    assert_eq!(
        err,
        Error::DimensionMismatch {
            argument: "plot_centre",
            expected: 2,
            found: 1,
        }
    );
    assert!(err.to_string().contains("`plot_centre` has length 1"));
    assert!(recorder.is_empty());
}

#[test]
fn validate_reports_arity_before_lengths() {
    assert_eq!(
        validate(&ThreeInputs, &[1.0], None),
        Err(Error::Arity(UnsupportedArity(3)))
    );
    assert_eq!(
        validate(&LeastSquares::new(), &[0.0, 0.0], None),
        Ok(optiviz_core::Arity::Two)
    );
}

// --- Numerics and config ---

#[test]
fn non_finite_values_propagate() {
    let solution = optimise_unrendered(&Root, &[-1.0], &config(None, 25.0, 3), &sgd(0.1))
        .expect("validation passes");

    assert!(solution.trajectory[0].objective.is_nan());
    assert!(solution.x[0].is_nan());
    assert!(solution.objective.is_nan());
}

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(config.plot_centre(), None);
    assert_relative_eq!(config.plot_boundary(), 25.0);
    assert_eq!(config.iters(), 1000);
}

#[test]
fn rejects_invalid_config() {
    assert_eq!(Config::new(None, 0.0, 10), Err(ConfigError::PlotBoundary));
    assert_eq!(Config::new(None, f64::NAN, 10), Err(ConfigError::PlotBoundary));
    assert_eq!(Config::new(None, 25.0, 0), Err(ConfigError::Iters));
    assert_eq!(
        Config::new(Some(vec![f64::INFINITY]), 25.0, 10),
        Err(ConfigError::PlotCentre)
    );
}

/// Halts a run by panicking at the first marked point.
struct HaltAtFirstMark;

impl optiviz_core::Renderer for HaltAtFirstMark {
    fn draw_surface_1d(&mut self, _surface: &optiviz_core::Curve) {}

    fn draw_surface_2d(&mut self, _surface: &optiviz_core::Grid) {}

    fn mark_point_1d(&mut self, _x: f64, _value: f64) {
        panic!("first step reached");
    }

    fn mark_point_2d(&mut self, _x: f64, _y: f64, _value: f64) {
        panic!("first step reached");
    }
}

#[test]
fn huge_iteration_budget_reaches_first_step() {
    let config = config(None, 25.0, usize::MAX / 8);
    let sgd = sgd(0.1);

    let outcome = std::panic::catch_unwind(|| {
        let _ = optimise(&Parabola, &[1.0], &config, &sgd, HaltAtFirstMark);
    });

    let payload = outcome.expect_err("the renderer halts the run");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"first step reached"));
}
