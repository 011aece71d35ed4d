//! RMSprop: per-parameter learning rates scaled by a moving average of
//! squared gradients.
//!
//! ```text
//! g   = ∇ + weight_decay · x
//! s   = α · s + (1 − α) · g²
//! buf = momentum · buf + g / (√s + eps)
//! x   = x − lr · buf
//! ```

use thiserror::Error;

use optiviz_core::{Optimiser, Param, UpdateRule};

use super::{decayed_grad, is_non_negative, is_unit_interval};

/// Configuration for [`RmsPropRule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsProp {
    lr: f64,
    alpha: f64,
    eps: f64,
    momentum: f64,
    weight_decay: f64,
}

/// Errors that can occur when validating an RMSprop config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("lr must be finite and non-negative")]
    Lr,

    #[error("alpha must lie in [0, 1)")]
    Alpha,

    #[error("eps must be finite and non-negative")]
    Eps,

    #[error("momentum must be finite and non-negative")]
    Momentum,

    #[error("weight_decay must be finite and non-negative")]
    WeightDecay,
}

impl Default for RmsProp {
    fn default() -> Self {
        // Known-good value, unwrap is safe
        Self::new(1e-2).unwrap()
    }
}

impl RmsProp {
    /// Creates an RMSprop config with learning rate `lr`, alpha `0.99` and
    /// eps `1e-8`.
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
            alpha: 0.99,
            eps: 1e-8,
            momentum: 0.0,
            weight_decay: 0.0,
        })
    }

    /// Sets the smoothing constant of the squared-gradient average.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` lies outside `[0, 1)`.
    pub fn with_alpha(mut self, alpha: f64) -> Result<Self, ConfigError> {
        if !is_unit_interval(alpha) {
            return Err(ConfigError::Alpha);
        }
        self.alpha = alpha;
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
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.momentum
    }

    #[must_use]
    pub fn weight_decay(&self) -> f64 {
        self.weight_decay
    }
}

impl Optimiser for RmsProp {
    type Rule = RmsPropRule;

    fn build(&self, params: &[Param]) -> RmsPropRule {
        RmsPropRule {
            config: *self,
            square_avgs: vec![0.0; params.len()],
            buffers: vec![0.0; params.len()],
        }
    }
}

/// The RMSprop update rule and its running averages.
#[derive(Debug, Clone)]
pub struct RmsPropRule {
    config: RmsProp,
    square_avgs: Vec<f64>,
    buffers: Vec<f64>,
}

impl UpdateRule for RmsPropRule {
    fn step(&mut self, params: &mut [Param]) {
        let RmsProp {
            lr,
            alpha,
            eps,
            momentum,
            weight_decay,
        } = self.config;

        for ((param, square_avg), buf) in params
            .iter_mut()
            .zip(&mut self.square_avgs)
            .zip(&mut self.buffers)
        {
            if !param.requires_grad() {
                continue;
            }

            let grad = decayed_grad(param, weight_decay);
            *square_avg = alpha * *square_avg + (1.0 - alpha) * grad * grad;
            let scaled = grad / (square_avg.sqrt() + eps);

            let delta = if momentum > 0.0 {
                *buf = momentum * *buf + scaled;
                *buf
            } else {
                scaled
            };

            param.set_value(param.value() - lr * delta);
        }
    }
}
