use thiserror::Error;

/// Configuration for the descent driver.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    plot_centre: Option<Vec<f64>>,
    plot_boundary: f64,
    iters: usize,
}

/// Errors that can occur when validating a descent driver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("plot_centre must contain only finite values")]
    PlotCentre,

    #[error("plot_boundary must be finite and positive")]
    PlotBoundary,

    #[error("iters must be positive")]
    Iters,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(None, 25.0, 1000).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// `plot_centre` defaults to the origin when `None`. The plotted domain
    /// spans `plot_boundary` along every axis, centred on `plot_centre`.
    ///
    /// # Errors
    ///
    /// Returns an error if the centre has non-finite entries, the boundary is
    /// not finite and positive, or `iters` is zero.
    pub fn new(
        plot_centre: Option<Vec<f64>>,
        plot_boundary: f64,
        iters: usize,
    ) -> Result<Self, ConfigError> {
        if plot_centre
            .as_deref()
            .is_some_and(|centre| centre.iter().any(|c| !c.is_finite()))
        {
            return Err(ConfigError::PlotCentre);
        }
        if !plot_boundary.is_finite() || plot_boundary <= 0.0 {
            return Err(ConfigError::PlotBoundary);
        }
        if iters == 0 {
            return Err(ConfigError::Iters);
        }

        Ok(Self {
            plot_centre,
            plot_boundary,
            iters,
        })
    }

    /// Returns the plot centre, if one was given.
    #[must_use]
    pub fn plot_centre(&self) -> Option<&[f64]> {
        self.plot_centre.as_deref()
    }

    /// Returns the total width of the plotted domain along each axis.
    #[must_use]
    pub fn plot_boundary(&self) -> f64 {
        self.plot_boundary
    }

    /// Returns the fixed number of iterations.
    #[must_use]
    pub fn iters(&self) -> usize {
        self.iters
    }
}
