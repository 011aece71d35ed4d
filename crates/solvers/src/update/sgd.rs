//! Stochastic gradient descent.
//!
//! ```text
//! g   = ∇ + weight_decay · x
//! buf = momentum · buf + (1 − dampening) · g      (buf = g on the first step)
//! g   = g + momentum · buf  (Nesterov)   or   buf
//! x   = x − lr · g
//! ```
//!
//! With `momentum = 0` this is plain gradient descent.

use thiserror::Error;

use optiviz_core::{Optimiser, Param, UpdateRule};

use super::{decayed_grad, is_non_negative};

/// Configuration for [`SgdRule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    lr: f64,
    momentum: f64,
    dampening: f64,
    weight_decay: f64,
    nesterov: bool,
}

/// Errors that can occur when validating an SGD config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lr must be finite and non-negative")]
    Lr,

    #[error("momentum must be finite and non-negative")]
    Momentum,

    #[error("dampening must be finite and non-negative")]
    Dampening,

    #[error("weight_decay must be finite and non-negative")]
    WeightDecay,

    #[error("nesterov momentum requires a positive momentum and zero dampening")]
    Nesterov,
}

impl Default for Sgd {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-3).unwrap()
    }
}

impl Sgd {
    /// Creates plain gradient descent with learning rate `lr`.
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
            momentum: 0.0,
            dampening: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        })
    }

    /// Sets the momentum factor.
    ///
    /// # Errors
    ///
    /// Returns an error if `momentum` is negative or non-finite.
    pub fn with_momentum(mut self, momentum: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(momentum) {
            return Err(ConfigError::Momentum);
        }
        self.momentum = momentum;
        Ok(self)
    }

    /// Sets the dampening applied to new gradients in the momentum buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `dampening` is negative or non-finite.
    pub fn with_dampening(mut self, dampening: f64) -> Result<Self, ConfigError> {
        if !is_non_negative(dampening) {
            return Err(ConfigError::Dampening);
        }
        self.dampening = dampening;
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

    /// Enables Nesterov momentum.
    ///
    /// # Errors
    ///
    /// Returns an error unless momentum is positive and dampening is zero.
    pub fn with_nesterov(mut self) -> Result<Self, ConfigError> {
        if self.momentum <= 0.0 || self.dampening != 0.0 {
            return Err(ConfigError::Nesterov);
        }
        self.nesterov = true;
        Ok(self)
    }

    #[must_use]
    pub fn lr(&self) -> f64 {
        self.lr
    }

    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    #[must_use]
    pub fn dampening(&self) -> f64 {
        self.dampening
    }

    #[must_use]
    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }

    #[must_use]
    pub fn nesterov(&self) -> bool {
        self.nesterov
    }
}

impl Optimiser for Sgd {
    type Rule = SgdRule;

    fn build(&self, params: &[Param]) -> SgdRule {
        SgdRule {
            config: *self,
            buffers: vec![None; params.len()],
        }
    }
}

/// The SGD update rule and its momentum buffers.
#[derive(Debug, Clone)]
pub struct SgdRule {
    config: Sgd,
    buffers: Vec<Option<f64>>,
}

impl UpdateRule for SgdRule {
    fn step(&mut self, params: &mut [Param]) {
        let Sgd {
            lr,
            momentum,
            dampening,
            weight_decay,
            nesterov,
        } = self.config;

        for (param, buffer) in params.iter_mut().zip(&mut self.buffers) {
            if !param.requires_grad() {
                continue;
            }

            let mut grad = decayed_grad(param, weight_decay);

            if momentum != 0.0 {
                let buf = match buffer {
                    Some(buf) => {
                        *buf = momentum * *buf + (1.0 - dampening) * grad;
                        *buf
                    }
                    None => *buffer.insert(grad),
                };
                grad = if nesterov { grad + momentum * buf } else { buf };
            }

            param.set_value(param.value() - lr * grad);
        }
    }
}
