//! Adagrad: per-parameter learning rates scaled by the accumulated squared
//! gradient.
//!
//! ```text
//! g   = ∇ + weight_decay · x
//! lrₜ = lr / (1 + (t − 1) · lr_decay)
//! s   = s + g²
//! x   = x − lrₜ · g / (√s + eps)
//! ```

use thiserror::Error;

use optiviz_core::{Optimiser, Param, UpdateRule};

use super::{decayed_grad, is_non_negative};

/// Configuration for [`AdagradRule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adagrad {
    lr: f64,
    lr_decay: f64,
    initial_accumulator: f64,
    eps: f64,
    weight_decay: f64,
}

/// Errors that can occur when validating an Adagrad config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lr must be finite and non-negative")]
    Lr,

    #[error("lr_decay must be finite and non-negative")]
    LrDecay,

    #[error("initial_accumulator must be finite and non-negative")]
    InitialAccumulator,

    #[error("eps must be finite and non-negative")]
    Eps,

    #[error("weight_decay must be finite and non-negative")]
    WeightDecay,
}

impl Default for Adagrad {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-2).unwrap()
    }
}

impl Adagrad {
    /// Creates an Adagrad config with learning rate `lr` and eps `1e-10`.
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
            lr_decay: 0.0,
            initial_accumulator: 0.0,
            eps: 1e-10,
            weight_decay: 0.0,
        })
    }

    /// Sets the learning-rate decay per step.
    ///
    /// # Errors
    ///
    /// Returns an error if `lr_decay` is negative or non-finite.
    pub fn with_lr_decay(mut self, lr_decay: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(lr_decay) {
            return Err(ConfigError::LrDecay);
        }
        self.lr_decay = lr_decay;
        Ok(self)
    }

    /// Sets the starting value of the squared-gradient sum.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is negative or non-finite.
    pub fn with_initial_accumulator(mut self, value: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(value) {
            return Err(ConfigError::InitialAccumulator);
        }
        self.initial_accumulator = value;
        Ok(self)
    }

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
    pub fn lr_decay(&self) -> f64 {
        self.lr_decay
    }

    #[must_use]
    pub fn initial_accumulator(&self) -> f64 {
        self.initial_accumulator
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

impl Optimiser for Adagrad {
    type Rule = AdagradRule;

    fn build(&self, params: &[Param]) -> AdagradRule {
        AdagradRule {
            config: *self,
            sums: vec![self.initial_accumulator; params.len()],
            steps: vec![0.0; params.len()],
        }
    }
}

/// The Adagrad update rule and its squared-gradient sums.
#[derive(Debug, Clone)]
pub struct AdagradRule {
    config: Adagrad,
    sums: Vec<f64>,
    steps: Vec<f64>,
}

impl UpdateRule for AdagradRule {
    fn step(&mut self, params: &mut [Param]) {
        let Adagrad {
            lr,
            lr_decay,
            eps,
            weight_decay,
            ..
        } = self.config;

        for ((param, sum), steps) in params
            .iter_mut()
            .zip(&mut self.sums)
            .zip(&mut self.steps)
        {
            if !param.requires_grad() {
                continue;
            }

            let grad = decayed_grad(param, weight_decay);
            let lr_t = lr / (1.0 + *steps * lr_decay);
            *steps += 1.0;
            *sum += grad * grad;

            param.set_value(param.value() - lr_t * grad / (sum.sqrt() + eps));
        }
    }
}
