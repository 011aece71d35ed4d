use std::fmt;

use optiviz_core::{Curve, Grid, Renderer};

/// A sampled objective surface, as handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Curve(Curve),
    Grid(Grid),
}

/// One marked point of the optimisation path.
///
/// `y` is `None` for one-parameter runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub y: Option<f64>,
    pub value: f64,
}

impl Marker {
    /// Creates the marker of a one-parameter run.
    #[must_use]
    pub fn one(x: f64, value: f64) -> Self {
        Self { x, y: None, value }
    }

    /// Creates the marker of a two-parameter run.
    #[must_use]
    pub fn two(x: f64, y: f64, value: f64) -> Self {
        Self {
            x,
            y: Some(y),
            value,
        }
    }
}

/// Formats as `(x) -> value` or `(x, y) -> value` with four decimals.
impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.y {
            Some(y) => write!(f, "({:.4}, {:.4}) -> {:.4}", self.x, y, self.value),
            None => write!(f, "({:.4}) -> {:.4}", self.x, self.value),
        }
    }
}

/// A renderer that keeps everything it is given.
///
/// Useful for inspecting a run after the fact, or for replaying it through
/// another renderer with [`Recorder::replay`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recorder {
    surfaces: Vec<Surface>,
    markers: Vec<Marker>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every surface drawn, in order.
    #[must_use]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Every marker, in order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns true if nothing has been drawn or marked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty() && self.markers.is_empty()
    }

    /// Sends the recorded surfaces, then the recorded markers, to `renderer`.
    pub fn replay<R: Renderer>(&self, mut renderer: R) {
        for surface in &self.surfaces {
            match surface {
                Surface::Curve(curve) => renderer.draw_surface_1d(curve),
                Surface::Grid(grid) => renderer.draw_surface_2d(grid),
            }
        }
        for marker in &self.markers {
            match marker.y {
                Some(y) => renderer.mark_point_2d(marker.x, y, marker.value),
                None => renderer.mark_point_1d(marker.x, marker.value),
            }
        }
    }
}

impl Renderer for Recorder {
    fn draw_surface_1d(&mut self, surface: &Curve) {
        self.surfaces.push(Surface::Curve(surface.clone()));
    }

    fn draw_surface_2d(&mut self, surface: &Grid) {
        self.surfaces.push(Surface::Grid(surface.clone()));
    }

    fn mark_point_1d(&mut self, x: f64, value: f64) {
        self.markers.push(Marker::one(x, value));
    }

    fn mark_point_2d(&mut self, x: f64, y: f64, value: f64) {
        self.markers.push(Marker::two(x, y, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use optiviz_core::{Domain, Objective, Scalar};

    struct Line;

    impl Objective for Line {
        fn arity(&self) -> usize {
            1
        }

        fn evaluate<T: Scalar>(&self, x: &[T]) -> T {
            x[0] * 2.0
        }
    }

    #[test]
    fn records_surfaces_and_markers_in_order() {
        let mut recorder = Recorder::new();
        assert!(recorder.is_empty());

        let curve = Curve::sample(&Line, Domain::new(0.0, 2.0), 3);
        recorder.draw_surface_1d(&curve);
        recorder.mark_point_1d(1.0, 2.0);
        recorder.mark_point_1d(0.5, 1.0);

        assert_eq!(recorder.surfaces(), [Surface::Curve(curve)]);
        assert_eq!(
            recorder.markers(),
            [Marker::one(1.0, 2.0), Marker::one(0.5, 1.0)]
        );
    }

    #[test]
    fn replay_reproduces_the_recording() {
        let mut original = Recorder::new();
        original.draw_surface_1d(&Curve::sample(&Line, Domain::new(1.0, 4.0), 5));
        original.mark_point_2d(1.0, 2.0, 3.0);

        let mut copy = Recorder::new();
        original.replay(&mut copy);

        assert_eq!(copy, original);
    }

    #[test]
    fn markers_display_as_titles() {
        assert_eq!(Marker::one(12.5, 156.25).to_string(), "(12.5000) -> 156.2500");
        assert_eq!(
            Marker::two(1.0, -0.5, 1.25).to_string(),
            "(1.0000, -0.5000) -> 1.2500"
        );
    }
}
