use crate::Param;

/// A first-order update rule applied to a parameter vector.
///
/// The rule owns whatever per-parameter state it needs (momentum buffers,
/// moving averages, step counts). The driver calls [`zero_grad`] before each
/// backward pass and [`step`] after it, always with the same parameters the
/// rule was built from.
///
/// [`zero_grad`]: UpdateRule::zero_grad
/// [`step`]: UpdateRule::step
pub trait UpdateRule {
    /// Clears accumulated gradients.
    fn zero_grad(&mut self, params: &mut [Param]) {
        params.iter_mut().for_each(Param::zero_grad);
    }

    /// Updates parameter values from their accumulated gradients.
    fn step(&mut self, params: &mut [Param]);
}

/// A configuration record that builds an [`UpdateRule`].
///
/// Each call to [`build`](Optimiser::build) yields a rule with fresh state,
/// so one configuration can drive any number of independent runs.
pub trait Optimiser {
    type Rule: UpdateRule;

    /// Creates a rule sized for `params`.
    fn build(&self, params: &[Param]) -> Self::Rule;
}

impl<O: Optimiser> Optimiser for &O {
    type Rule = O::Rule;

    fn build(&self, params: &[Param]) -> Self::Rule {
        (*self).build(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Moves every tracked value by a fixed amount against its gradient sign.
    struct SignStep(f64);

    impl UpdateRule for SignStep {
        fn step(&mut self, params: &mut [Param]) {
            for p in params.iter_mut().filter(|p| p.requires_grad()) {
                p.set_value(p.value() - self.0 * p.grad().signum());
            }
        }
    }

    #[test]
    fn default_zero_grad_clears_all_cells() {
        let mut params = [Param::new(1.0), Param::new(2.0)];
        params[0].accumulate(3.0);
        params[1].accumulate(-1.0);

        SignStep(0.5).zero_grad(&mut params);

        assert!(params.iter().all(|p| p.grad() == 0.0));
        assert_eq!(params[0].value(), 1.0);
    }

    #[test]
    fn step_uses_accumulated_gradients() {
        let mut params = [Param::new(1.0), Param::new(2.0)];
        params[0].accumulate(3.0);
        params[1].accumulate(-1.0);

        SignStep(0.5).step(&mut params);

        assert_eq!(params[0].value(), 0.5);
        assert_eq!(params[1].value(), 2.5);
    }
}
