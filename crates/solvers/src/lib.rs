//! Update rules and the visualised descent driver for Optiviz.
//!
//! - [`update`] — first-order update rules ([`update::Sgd`], [`update::Adam`],
//!   [`update::Adagrad`], [`update::RmsProp`])
//! - [`descent`] — the fixed-budget optimisation loop that renders each step

pub mod descent;
pub mod update;
