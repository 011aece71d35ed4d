use crate::{Curve, Grid};

/// Receives the objective surface and the optimisation path as it unfolds.
///
/// The driver calls exactly one of the `draw_surface_*` methods before the
/// first iteration, then the matching `mark_point_*` method once per
/// iteration. Implementations that display the path live are expected to
/// pause briefly in `mark_point_*` so the display can refresh.
///
/// `()` is the no-op renderer.
pub trait Renderer {
    /// Draws the static curve of a one-parameter objective.
    fn draw_surface_1d(&mut self, surface: &Curve);

    /// Draws the static surface of a two-parameter objective.
    fn draw_surface_2d(&mut self, surface: &Grid);

    /// Marks the current point of a one-parameter run.
    fn mark_point_1d(&mut self, x: f64, value: f64);

    /// Marks the current point of a two-parameter run.
    fn mark_point_2d(&mut self, x: f64, y: f64, value: f64);
}

impl Renderer for () {
    fn draw_surface_1d(&mut self, _surface: &Curve) {}

    fn draw_surface_2d(&mut self, _surface: &Grid) {}

    fn mark_point_1d(&mut self, _x: f64, _value: f64) {}

    fn mark_point_2d(&mut self, _x: f64, _y: f64, _value: f64) {}
}

/// Allows `&mut R` to be passed to the driver, which takes its renderer by
/// value, so the renderer can be inspected once the run completes.
impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_surface_1d(&mut self, surface: &Curve) {
        (**self).draw_surface_1d(surface);
    }

    fn draw_surface_2d(&mut self, surface: &Grid) {
        (**self).draw_surface_2d(surface);
    }

    fn mark_point_1d(&mut self, x: f64, value: f64) {
        (**self).mark_point_1d(x, value);
    }

    fn mark_point_2d(&mut self, x: f64, y: f64, value: f64) {
        (**self).mark_point_2d(x, y, value);
    }
}
