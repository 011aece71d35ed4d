//! Renderers for Optiviz descent runs.
//!
//! This crate provides [`Renderer`] implementations that work with the
//! descent driver in `optiviz-solvers`.
//!
//! - [`Recorder`] keeps every surface and marker for later inspection or
//!   replay.
//! - [`palette`] bins a sampled two-parameter surface into colour levels.
//!
//! # Features
//!
//! - `plot` — Enables [`LivePlot`] for animating a run in an egui window.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Renderer`]: optiviz_core::Renderer

pub mod palette;

mod recorder;

#[cfg(feature = "plot")]
mod live;

pub use recorder::{Marker, Recorder, Surface};

#[cfg(feature = "plot")]
pub use live::{LivePlot, LiveRenderer, ShowConfig};
