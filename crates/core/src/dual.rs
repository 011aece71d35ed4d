//! Forward-mode dual numbers.
//!
//! A [`Dual<N>`] carries a value together with its partial derivatives with
//! respect to `N` input variables. Arithmetic propagates both, so evaluating
//! an objective on dual inputs yields its value and full gradient in a
//! single pass:
//!
//! ```text
//! (a, ∇a) + (b, ∇b) = (a + b, ∇a + ∇b)
//! (a, ∇a) * (b, ∇b) = (ab, b∇a + a∇b)
//! f((a, ∇a))        = (f(a), f'(a)∇a)
//! ```

use std::{
    iter::Sum,
    ops::{Add, Div, Mul, Neg, Sub},
};

use crate::Scalar;

/// A value and its partial derivatives with respect to `N` variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual<const N: usize> {
    /// The primal value.
    pub value: f64,

    /// Partial derivatives `[∂/∂x₀, …, ∂/∂xₙ₋₁]`.
    pub partials: [f64; N],
}

impl<const N: usize> Dual<N> {
    /// Creates a constant: all partials are zero.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            value,
            partials: [0.0; N],
        }
    }

    /// Creates the input variable with the given `index`.
    ///
    /// The partial with respect to itself is one, all others are zero.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn variable(value: f64, index: usize) -> Self {
        let mut partials = [0.0; N];
        partials[index] = 1.0;
        Self { value, partials }
    }

    /// Applies a unary function with value `value` and derivative `slope`,
    /// scaling every partial by `slope` (chain rule).
    fn chain(self, value: f64, slope: f64) -> Self {
        Self {
            value,
            partials: self.partials.map(|d| d * slope),
        }
    }

    fn zip(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> [f64; N] {
        std::array::from_fn(|i| f(self.partials[i], rhs.partials[i]))
    }
}

impl<const N: usize> Add for Dual<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            value: self.value + rhs.value,
            partials: self.zip(rhs, |a, b| a + b),
        }
    }
}

impl<const N: usize> Sub for Dual<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            value: self.value - rhs.value,
            partials: self.zip(rhs, |a, b| a - b),
        }
    }
}

impl<const N: usize> Mul for Dual<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self.value, rhs.value);
        Self {
            value: a * b,
            partials: self.zip(rhs, |da, db| da * b + a * db),
        }
    }
}

impl<const N: usize> Div for Dual<N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        let (a, b) = (self.value, rhs.value);
        Self {
            value: a / b,
            partials: self.zip(rhs, |da, db| (da * b - a * db) / (b * b)),
        }
    }
}

impl<const N: usize> Neg for Dual<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.chain(-self.value, -1.0)
    }
}

impl<const N: usize> Add<f64> for Dual<N> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self {
            value: self.value + rhs,
            partials: self.partials,
        }
    }
}

impl<const N: usize> Sub<f64> for Dual<N> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self {
            value: self.value - rhs,
            partials: self.partials,
        }
    }
}

impl<const N: usize> Mul<f64> for Dual<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.chain(self.value * rhs, rhs)
    }
}

impl<const N: usize> Div<f64> for Dual<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.chain(self.value / rhs, rhs.recip())
    }
}

impl<const N: usize> Add<Dual<N>> for f64 {
    type Output = Dual<N>;

    fn add(self, rhs: Dual<N>) -> Dual<N> {
        rhs + self
    }
}

impl<const N: usize> Sub<Dual<N>> for f64 {
    type Output = Dual<N>;

    fn sub(self, rhs: Dual<N>) -> Dual<N> {
        rhs.chain(self - rhs.value, -1.0)
    }
}

impl<const N: usize> Mul<Dual<N>> for f64 {
    type Output = Dual<N>;

    fn mul(self, rhs: Dual<N>) -> Dual<N> {
        rhs * self
    }
}

impl<const N: usize> Div<Dual<N>> for f64 {
    type Output = Dual<N>;

    fn div(self, rhs: Dual<N>) -> Dual<N> {
        let b = rhs.value;
        rhs.chain(self / b, -self / (b * b))
    }
}

impl<const N: usize> Sum for Dual<N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::constant(0.0), |acc, x| acc + x)
    }
}

impl<const N: usize> Scalar for Dual<N> {
    fn constant(value: f64) -> Self {
        Dual::constant(value)
    }

    fn value(&self) -> f64 {
        self.value
    }

    fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::constant(1.0);
        }
        let x = self.value;
        self.chain(x.powi(n), f64::from(n) * x.powi(n - 1))
    }

    fn powf(self, n: f64) -> Self {
        if n == 0.0 {
            return Self::constant(1.0);
        }
        let x = self.value;
        self.chain(x.powf(n), n * x.powf(n - 1.0))
    }

    fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        self.chain(root, 0.5 / root)
    }

    fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        self.chain(self.value.ln(), self.value.recip())
    }

    fn sin(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        self.chain(sin, cos)
    }

    fn cos(self) -> Self {
        let (sin, cos) = self.value.sin_cos();
        self.chain(cos, -sin)
    }

    fn tan(self) -> Self {
        let cos = self.value.cos();
        self.chain(self.value.tan(), (cos * cos).recip())
    }

    fn tanh(self) -> Self {
        let t = self.value.tanh();
        self.chain(t, 1.0 - t * t)
    }

    fn abs(self) -> Self {
        let slope = if self.value == 0.0 {
            0.0
        } else {
            self.value.signum()
        };
        self.chain(self.value.abs(), slope)
    }
}
