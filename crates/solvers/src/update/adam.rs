//! Adam: adaptive moment estimation (<https://arxiv.org/abs/1412.6980>).
//!
//! ```text
//! g = ∇ + weight_decay · x
//! m = β₁ · m + (1 − β₁) · g
//! v = β₂ · v + (1 − β₂) · g²
//! x = x − lr / (1 − β₁ᵗ) · m / (√v / √(1 − β₂ᵗ) + eps)
//! ```

use thiserror::Error;

use optiviz_core::{Optimiser, Param, UpdateRule};

use super::{decayed_grad, is_non_negative, is_unit_interval};

/// Configuration for [`AdamRule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adam {
    lr: f64,
    betas: (f64, f64),
    eps: f64,
    weight_decay: f64,
}

/// Errors that can occur when validating an Adam config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lr must be finite and non-negative")]
    Lr,

    #[error("betas must each lie in [0, 1)")]
    Betas,

    #[error("eps must be finite and non-negative")]
    Eps,

    #[error("weight_decay must be finite and non-negative")]
    WeightDecay,
}

impl Default for Adam {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-3).unwrap()
    }
}

impl Adam {
    /// Creates an Adam config with learning rate `lr`, betas `(0.9, 0.999)`,
    /// eps `1e-8` and no weight decay.
    ///
    /// # Errors
    ///
    /// Returns an error if `lr` is negative or non-finite.
    pub fn new(lr: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(lr) {
            return Err(ConfigError::Lr);
        }

        Ok(Self {
            lr,
            betas: (0.9, 0.999),
            eps: 1e-8,
            weight_decay: 0.0,
        })
    }

    /// Sets the decay rates of the first and second moment estimates.
    ///
    /// # Errors
    ///
    /// Returns an error if either beta lies outside `[0, 1)`.
    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Result<Self, ConfigError> {
        if !is_unit_interval(beta1) || !is_unit_interval(beta2) {
            return Err(ConfigError::Betas);
        }
        self.betas = (beta1, beta2);
        Ok(self)
    }

    /// Sets the term added to the denominator for numerical stability.
    ///
    /// # Errors
    ///
    /// Returns an error if `eps` is negative or non-finite.
    pub fn with_eps(mut self, eps: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(eps) {
            return Err(ConfigError::Eps);
        }
        self.eps = eps;
        Ok(self)
    }

    /// Sets the L2 penalty.
    ///
    /// # Errors
    ///
    /// Returns an error if `weight_decay` is negative or non-finite.
    pub fn with_weight_decay(mut self, weight_decay: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(weight_decay) {
            return Err(ConfigError::WeightDecay);
        }
        self.weight_decay = weight_decay;
        Ok(self)
    }

    #[must_use]
    pub fn lr(&self) -> f64 {
        self.lr
    }

    #[must_use]
    pub fn betas(&self) -> (f64, f64) {
        self.betas
    }

    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    #[must_use]
    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }
}

impl Optimiser for Adam {
    type Rule = AdamRule;

    fn build(&self, params: &[Param]) -> AdamRule {
        AdamRule {
            config: *self,
            moments: vec![Moments::default(); params.len()],
        }
    }
}

/// Per-parameter Adam state.
#[derive(Debug, Clone, Copy)]
struct Moments {
    mean: f64,
    variance: f64,
    /// β₁ᵗ and β₂ᵗ after `t` steps.
    beta_powers: (f64, f64),
}

impl Default for Moments {
    fn default() -> Self {
        Self {
            mean: 0.0,
            variance: 0.0,
            beta_powers: (1.0, 1.0),
        }
    }
}

/// The Adam update rule and its moment estimates.
#[derive(Debug, Clone)]
pub struct AdamRule {
    config: Adam,
    moments: Vec<Moments>,
}

impl UpdateRule for AdamRule {
    fn step(&mut self, params: &mut [Param]) {
        let Adam {
            lr,
            betas: (beta1, beta2),
            eps,
            weight_decay,
        } = self.config;

        for (param, state) in params.iter_mut().zip(&mut self.moments) {
            if !param.requires_grad() {
                continue;
            }

            let grad = decayed_grad(param, weight_decay);

            state.mean = beta1 * state.mean + (1.0 - beta1) * grad;
            state.variance = beta2 * state.variance + (1.0 - beta2) * grad * grad;
            state.beta_powers = (state.beta_powers.0 * beta1, state.beta_powers.1 * beta2);

            let bias_correction1 = 1.0 - state.beta_powers.0;
            let bias_correction2 = 1.0 - state.beta_powers.1;

            let step_size = lr / bias_correction1;
            let denom = state.variance.sqrt() / bias_correction2.sqrt() + eps;

            param.set_value(param.value() - step_size * state.mean / denom);
        }
    }
}
