//! Core traits and types for Optiviz.
//!
//! This crate defines the shared abstractions that update rules, the
//! optimisation driver, and renderers build on:
//!
//! - [`Objective`] — a differentiable scalar function of one or two free
//!   parameters, written once against [`Scalar`]
//! - [`Dual`] — forward-mode dual numbers that carry partial derivatives
//! - [`Param`], [`Params`] — parameter cells that accumulate gradients
//! - [`UpdateRule`], [`Optimiser`] — pluggable first-order update rules and
//!   the configuration records that build them
//! - [`Renderer`] — receives the objective surface and the optimisation path
//! - [`Curve`], [`Grid`], [`Domain`] — precomputed surface samples

mod dual;
mod objective;
mod params;
mod render;
mod scalar;
mod update;

pub mod surface;

pub use dual::Dual;
pub use objective::{Arity, Objective, UnsupportedArity};
pub use params::{Param, Params};
pub use render::Renderer;
pub use scalar::Scalar;
pub use surface::{Curve, Domain, Grid};
pub use update::{Optimiser, UpdateRule};
