//! First-order update rules.
//!
//! Each rule is split into a configuration record implementing
//! [`Optimiser`] and the stateful rule it builds, implementing
//! [`UpdateRule`]. Configurations are validated on construction and can be
//! reused across runs; every [`Optimiser::build`] starts from fresh state.
//!
//! # Rules
//!
//! - [`sgd`] — gradient descent with optional momentum and Nesterov momentum
//! - [`adam`] — bias-corrected adaptive moment estimation (the default)
//! - [`adagrad`] — per-parameter learning rates from accumulated squared
//!   gradients
//! - [`rms_prop`] — per-parameter learning rates from a moving average of
//!   squared gradients
//!
//! All rules skip parameters whose gradient tracking is disabled.
//!
//! [`Optimiser`]: optiviz_core::Optimiser
//! [`Optimiser::build`]: optiviz_core::Optimiser::build
//! [`UpdateRule`]: optiviz_core::UpdateRule

pub mod adagrad;
pub mod adam;
pub mod rms_prop;
pub mod sgd;

pub use adagrad::Adagrad;
pub use adam::Adam;
pub use rms_prop::RmsProp;
pub use sgd::Sgd;

/// Returns true if `value` is finite and non-negative.
fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Returns true if `value` lies in `[0, 1)`.
fn is_unit_interval(value: f64) -> bool {
    (0.0..1.0).contains(&value)
}

/// Returns the gradient of `param` with L2 weight decay applied.
fn decayed_grad(param: &optiviz_core::Param, weight_decay: f64) -> f64 {
    if weight_decay == 0.0 {
        param.grad()
    } else {
        param.grad() + weight_decay * param.value()
    }
}
