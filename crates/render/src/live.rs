//! Live egui window that animates a descent run as it happens.
//!
//! See [`LivePlot`] for usage.

use std::{
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    thread::{self, JoinHandle},
    time::Duration,
};

use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use optiviz_core::{Curve, Grid, Renderer};
use tracing::{debug, info, warn};

use crate::{
    Marker, Surface,
    palette::{bin_grid, level_colour},
};

/// Configuration for a [`LivePlot`] window.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// LivePlot::new(ShowConfig::new().title("Adam on a bowl").legend())
///     .run(|renderer| descent::optimise(&Bowl, &[3.0, -2.0], &config, &adam, renderer))?;
/// ```
#[derive(Debug, Clone)]
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    frame_delay: Duration,
    levels: usize,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, a 50 ms
    /// pause after each marked point, and 12 heat-map levels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            frame_delay: Duration::from_millis(50),
            levels: 12,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend naming the surface and the path.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Sets how long the run pauses after each marked point.
    #[must_use]
    pub fn frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Sets the number of colour levels used for two-parameter surfaces.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels.max(1);
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

enum Update {
    Surface(Surface),
    Marker(Marker),
}

/// The renderer handed to a [`LivePlot`] job.
///
/// Forwards every surface and marker to the window. After each marked point
/// the calling thread sleeps for the configured frame delay so the path is
/// drawn at a watchable pace. Once the window is closed, frames are dropped
/// and the pause is skipped, so the run finishes at full speed.
pub struct LiveRenderer {
    sender: Sender<Update>,
    frame_delay: Duration,
    closed: bool,
}

impl LiveRenderer {
    fn send(&mut self, update: Update) {
        if self.closed {
            return;
        }
        if self.sender.send(update).is_err() {
            debug!("plot window closed, dropping remaining frames");
            self.closed = true;
        }
    }

    fn pause(&self) {
        if !self.closed {
            thread::sleep(self.frame_delay);
        }
    }
}

impl Renderer for LiveRenderer {
    fn draw_surface_1d(&mut self, surface: &Curve) {
        self.send(Update::Surface(Surface::Curve(surface.clone())));
    }

    fn draw_surface_2d(&mut self, surface: &Grid) {
        self.send(Update::Surface(Surface::Grid(surface.clone())));
    }

    fn mark_point_1d(&mut self, x: f64, value: f64) {
        self.send(Update::Marker(Marker::one(x, value)));
        self.pause();
    }

    fn mark_point_2d(&mut self, x: f64, y: f64, value: f64) {
        self.send(Update::Marker(Marker::two(x, y, value)));
        self.pause();
    }
}

/// Runs a job on a worker thread while animating its rendering in a window.
///
/// The job receives a [`LiveRenderer`] to pass to the descent driver. The
/// window stays open after the job finishes so the final state can be
/// inspected.
pub struct LivePlot {
    config: ShowConfig,
}

impl LivePlot {
    #[must_use]
    pub fn new(config: ShowConfig) -> Self {
        Self { config }
    }

    /// Opens a blocking egui window and runs `job` alongside it.
    ///
    /// Blocks until the window is closed by the user and the job has
    /// finished, then returns the job's result. A panic in the job is
    /// resumed on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn run<F, T>(self, job: F) -> Result<T, eframe::Error>
    where
        F: FnOnce(LiveRenderer) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let renderer = LiveRenderer {
            sender,
            frame_delay: self.config.frame_delay,
            closed: false,
        };
        let worker = thread::spawn(move || job(renderer));

        let options = eframe::NativeOptions::default();
        let title = self.config.title.clone().unwrap_or_default();
        let app = LiveApp::new(receiver, self.config);
        let shown = eframe::run_native(&title, options, Box::new(move |_cc| Ok(Box::new(app))));

        finish(shown, worker)
    }
}

/// Waits for the job, then reports the window outcome.
///
/// The job is always joined. A failed window drops the receiver, so the job
/// runs to completion without pausing before the error is returned.
fn finish<T>(
    shown: Result<(), eframe::Error>,
    worker: JoinHandle<T>,
) -> Result<T, eframe::Error> {
    match &shown {
        Ok(()) => info!("plot window closed"),
        Err(error) => warn!(%error, "plot window failed, waiting for the run to finish"),
    }

    let value = match worker.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    };
    shown.map(|()| value)
}

/// The egui [`eframe::App`] that draws frames as they arrive.
struct LiveApp {
    receiver: Receiver<Update>,
    connected: bool,
    config: ShowConfig,
    surface: Option<Surface>,
    heat: Vec<(Color32, Vec<[f64; 2]>)>,
    markers: Vec<Marker>,
}

impl LiveApp {
    fn new(receiver: Receiver<Update>, config: ShowConfig) -> Self {
        Self {
            receiver,
            connected: true,
            config,
            surface: None,
            heat: Vec::new(),
            markers: Vec::new(),
        }
    }

    fn drain(&mut self) {
        loop {
            match self.receiver.try_recv() {
                Ok(Update::Surface(surface)) => {
                    if let Surface::Grid(grid) = &surface {
                        self.heat = heat_map(grid, self.config.levels);
                    }
                    self.surface = Some(surface);
                }
                Ok(Update::Marker(marker)) => self.markers.push(marker),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.connected = false;
                    break;
                }
            }
        }
    }

    fn heading(&self) -> String {
        self.markers
            .last()
            .map_or_else(|| "waiting for the first step".to_owned(), ToString::to_string)
    }
}

impl eframe::App for LiveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.heading());

            let mut plot = Plot::new("live_plot");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            match &self.surface {
                Some(Surface::Curve(curve)) => {
                    let surface: PlotPoints = curve.points().collect();
                    let path: PlotPoints = self.markers.iter().map(|m| [m.x, m.value]).collect();
                    plot.show(ui, |plot_ui| {
                        plot_ui.line(Line::new(surface).name("objective"));
                        plot_ui.points(
                            Points::new(path)
                                .radius(3.0)
                                .color(Color32::BLACK)
                                .name("path"),
                        );
                    });
                }
                Some(Surface::Grid(_)) => {
                    let path: Vec<[f64; 2]> = self
                        .markers
                        .iter()
                        .filter_map(|m| m.y.map(|y| [m.x, y]))
                        .collect();
                    plot.data_aspect(1.0).show(ui, |plot_ui| {
                        for (colour, points) in &self.heat {
                            plot_ui.points(
                                Points::new(PlotPoints::from(points.clone()))
                                    .shape(MarkerShape::Square)
                                    .radius(2.5)
                                    .color(*colour),
                            );
                        }
                        if let Some(&last) = path.last() {
                            plot_ui.points(
                                Points::new(PlotPoints::from(vec![last]))
                                    .radius(4.0)
                                    .color(Color32::WHITE),
                            );
                        }
                        plot_ui.line(
                            Line::new(PlotPoints::from(path))
                                .color(Color32::WHITE)
                                .name("path"),
                        );
                    });
                }
                None => {}
            }
        });

        if self.connected {
            ctx.request_repaint_after(self.config.frame_delay);
        }
    }
}

fn heat_map(grid: &Grid, levels: usize) -> Vec<(Color32, Vec<[f64; 2]>)> {
    bin_grid(grid, levels)
        .into_iter()
        .enumerate()
        .filter(|(_, points)| !points.is_empty())
        .map(|(index, points)| {
            let [r, g, b] = level_colour(index, levels);
            (Color32::from_rgb(r, g, b), points)
        })
        .collect()
}
