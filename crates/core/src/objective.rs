use thiserror::Error;

use crate::Scalar;

/// A differentiable scalar objective of one or two free parameters.
///
/// The objective declares how many free scalar inputs it takes through
/// [`arity`](Objective::arity) and computes its value generically over
/// [`Scalar`], which lets the driver evaluate it on plain floats and on
/// gradient-tracking dual numbers alike.
///
/// Any extra data the objective depends on (sample points, coefficients)
/// belongs in the implementing type's fields and does not count toward the
/// arity.
///
/// # Example
///
/// ```
/// use optiviz_core::{Objective, Scalar};
///
/// /// f(x, y) = x² + y²
/// struct Bowl;
///
/// impl Objective for Bowl {
///     fn arity(&self) -> usize {
///         2
///     }
///
///     fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
///         x[0] * x[0] + x[1] * x[1]
///     }
/// }
///
/// assert_eq!(Bowl.evaluate(&[3.0, 4.0]), 25.0);
/// ```
pub trait Objective {
    /// Number of free scalar parameters.
    fn arity(&self) -> usize;

    /// Evaluates the objective at `x`.
    ///
    /// Callers guarantee `x.len() == self.arity()`.
    fn evaluate<T: Scalar>(&self, x: &[T]) -> T;
}

impl<O: Objective> Objective for &O {
    fn arity(&self) -> usize {
        (*self).arity()
    }

    fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
        (*self).evaluate(x)
    }
}

/// The parameter dimensionality supported by the optimisation driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// A single free parameter, drawn as a curve.
    One,

    /// Two free parameters, drawn as a surface.
    Two,
}

/// Returned when an objective's arity is neither 1 nor 2.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("objective must take 1 or 2 free parameters, found {0}")]
pub struct UnsupportedArity(pub usize);

impl Arity {
    /// Classifies the arity an objective declares.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedArity`] if the objective takes other than 1 or 2
    /// free parameters.
    pub fn of<O: Objective>(objective: &O) -> Result<Self, UnsupportedArity> {
        Self::try_from(objective.arity())
    }

    /// Returns the number of free parameters.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl TryFrom<usize> for Arity {
    type Error = UnsupportedArity;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(UnsupportedArity(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::Dual;

    /// f(x) = (x - shift)²; `shift` is data, not a free parameter.
    struct Shifted {
        shift: f64,
    }

    impl Objective for Shifted {
        fn arity(&self) -> usize {
            1
        }

        fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
            (x[0] - self.shift).powi(2)
        }
    }

    struct ThreeInputs;

    impl Objective for ThreeInputs {
        fn arity(&self) -> usize {
            3
        }

        fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
            x[0] + x[1] + x[2]
        }
    }

    #[test]
    fn data_fields_do_not_count_toward_arity() {
        let objective = Shifted { shift: 2.0 };
        assert_eq!(Arity::of(&objective), Ok(Arity::One));
        assert_eq!(Arity::One.count(), 1);
    }

    #[test]
    fn rejects_unsupported_arity() {
        let err = Arity::of(&ThreeInputs).unwrap_err();
        assert_eq!(err, UnsupportedArity(3));
        assert_eq!(
            err.to_string(),
            "objective must take 1 or 2 free parameters, found 3"
        );
        assert_eq!(Arity::try_from(0), Err(UnsupportedArity(0)));
    }

    #[test]
    fn evaluates_on_floats_and_duals() {
        let objective = Shifted { shift: 2.0 };

        assert_relative_eq!(objective.evaluate(&[5.0]), 9.0);

        let tracked = objective.evaluate(&[Dual::<1>::variable(5.0, 0)]);
        assert_relative_eq!(tracked.value, 9.0);
        assert_relative_eq!(tracked.partials[0], 6.0);
    }

    #[test]
    fn references_forward_to_the_objective() {
        let objective = Shifted { shift: -1.0 };
        let by_ref = &objective;
        assert_eq!(by_ref.arity(), 1);
        assert_relative_eq!(by_ref.evaluate(&[1.0]), 4.0);
    }
}
