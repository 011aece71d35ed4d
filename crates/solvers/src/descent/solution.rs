/// A visited point and the objective value there.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Parameter values, in objective argument order.
    pub x: Vec<f64>,

    /// The objective value at `x`.
    pub objective: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: Vec<f64>, objective: f64) -> Self {
        Self { x, objective }
    }
}

/// The result of a descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final parameter values, one per free parameter, in input order.
    pub x: Vec<f64>,

    /// Objective value at `x`.
    pub objective: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// Every point the objective was evaluated at inside the loop, in order.
    ///
    /// The first entry is the initial point; `x` itself is not included.
    pub trajectory: Vec<Point>,
}
