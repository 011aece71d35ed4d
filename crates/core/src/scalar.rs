use std::{
    fmt::Debug,
    iter::Sum,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// A real number that objectives are written against.
///
/// Objectives implement [`Objective::evaluate`] generically over `Scalar` so
/// the same code runs on plain `f64` (surface sampling) and on
/// [`Dual`] numbers (gradient tracking inside the optimisation loop).
///
/// Concrete scalars accept `f64` on either side (`2.0 * x` and `x * 2.0`).
/// Code generic over `Scalar` can only rely on the right-hand form, so write
/// `x * 2.0` there, or lift the constant with [`Scalar::constant`].
///
/// [`Objective::evaluate`]: crate::Objective::evaluate
/// [`Dual`]: crate::Dual
pub trait Scalar:
    Copy
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Sum
{
    /// Lifts a constant into the scalar type.
    fn constant(value: f64) -> Self;

    /// Returns the plain numeric value, discarding any derivative information.
    fn value(&self) -> f64;

    fn powi(self, n: i32) -> Self;

    fn powf(self, n: f64) -> Self;

    fn sqrt(self) -> Self;

    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    fn tan(self) -> Self;

    fn tanh(self) -> Self;

    /// Absolute value.
    ///
    /// The derivative at zero is taken to be zero.
    fn abs(self) -> Self;
}

impl Scalar for f64 {
    fn constant(value: f64) -> Self {
        value
    }

    fn value(&self) -> f64 {
        *self
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }

    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn tan(self) -> Self {
        f64::tan(self)
    }

    fn tanh(self) -> Self {
        f64::tanh(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }
}
