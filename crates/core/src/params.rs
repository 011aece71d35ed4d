use crate::Dual;

/// A scalar parameter cell that accumulates gradients.
///
/// Gradient tracking is enabled on creation. Update rules skip cells with
/// tracking disabled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param {
    value: f64,
    grad: f64,
    requires_grad: bool,
}

impl Param {
    /// Creates a tracked cell with a zero gradient.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            grad: 0.0,
            requires_grad: true,
        }
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the accumulated gradient.
    #[must_use]
    pub fn grad(&self) -> f64 {
        self.grad
    }

    #[must_use]
    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    pub fn set_requires_grad(&mut self, enabled: bool) {
        self.requires_grad = enabled;
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Adds `contribution` to the accumulated gradient.
    pub fn accumulate(&mut self, contribution: f64) {
        self.grad += contribution;
    }

    /// Clears the gradient, leaving the value untouched.
    pub fn zero_grad(&mut self) {
        self.grad = 0.0;
    }
}

/// The parameter vector being optimised: one [`Param`] per free parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Params<const N: usize> {
    cells: [Param; N],
}

impl<const N: usize> Params<N> {
    /// Creates tracked cells from the initial values, in order.
    #[must_use]
    pub fn new(init: [f64; N]) -> Self {
        Self {
            cells: init.map(Param::new),
        }
    }

    /// Returns the current values in order.
    #[must_use]
    pub fn values(&self) -> [f64; N] {
        self.cells.map(|cell| cell.value)
    }

    /// Returns the accumulated gradients in order.
    #[must_use]
    pub fn grads(&self) -> [f64; N] {
        self.cells.map(|cell| cell.grad)
    }

    /// Returns dual inputs for a tracked evaluation.
    ///
    /// Cell `i` becomes the variable with partial index `i`; cells with
    /// tracking disabled become constants.
    #[must_use]
    pub fn seed(&self) -> [Dual<N>; N] {
        std::array::from_fn(|i| {
            let cell = &self.cells[i];
            if cell.requires_grad {
                Dual::variable(cell.value, i)
            } else {
                Dual::constant(cell.value)
            }
        })
    }

    /// Accumulates the partials of `output` into the tracked cells.
    pub fn backward(&mut self, output: &Dual<N>) {
        for (cell, partial) in self.cells.iter_mut().zip(output.partials) {
            if cell.requires_grad {
                cell.accumulate(partial);
            }
        }
    }

    /// Clears every gradient.
    pub fn zero_grad(&mut self) {
        self.cells.iter_mut().for_each(Param::zero_grad);
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Param] {
        &self.cells
    }

    pub fn as_mut_slice(&mut self) -> &mut [Param] {
        &mut self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Scalar;

    fn bowl<T: Scalar>(x: &[T]) -> T {
        x[0] * x[0] + x[1] * x[1] * 3.0
    }

    #[test]
    fn cells_start_tracked_with_zero_gradient() {
        let params = Params::new([1.5, -2.0]);
        assert_eq!(params.values(), [1.5, -2.0]);
        assert_eq!(params.grads(), [0.0, 0.0]);
        assert!(params.as_slice().iter().all(Param::requires_grad));
    }

    #[test]
    fn backward_accumulates_until_cleared() {
        let mut params = Params::new([1.0, 2.0]);

        let output = bowl(&params.seed());
        params.backward(&output);
        assert_relative_eq!(params.grads()[0], 2.0);
        assert_relative_eq!(params.grads()[1], 12.0);

        params.backward(&output);
        assert_relative_eq!(params.grads()[0], 4.0);
        assert_relative_eq!(params.grads()[1], 24.0);

        params.zero_grad();
        assert_eq!(params.grads(), [0.0, 0.0]);
        assert_eq!(params.values(), [1.0, 2.0]);
    }

    #[test]
    fn untracked_cells_are_constants() {
        let mut params = Params::new([1.0, 2.0]);
        params.as_mut_slice()[1].set_requires_grad(false);

        let seed = params.seed();
        assert_eq!(seed[1].partials, [0.0, 0.0]);

        let output = bowl(&seed);
        params.backward(&output);
        assert_relative_eq!(params.grads()[0], 2.0);
        assert_relative_eq!(params.grads()[1], 0.0);
    }
}
