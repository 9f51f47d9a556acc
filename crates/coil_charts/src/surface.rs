//! Rendering surface collaborator contract
//!
//! The surface is an opaque renderer: series are registered once at data
//! source construction, and the data source pushes a redraw request whenever
//! a tick mutated point values.

use std::sync::{Arc, Mutex};

use crate::series::SeriesHandle;

/// Shared, type-erased surface handle held by a data source.
pub type SharedSurface = Arc<Mutex<dyn RenderSurface>>;

pub trait RenderSurface {
    /// Register a series for rendering. The surface keeps the handle and
    /// reads current point values through it when drawing.
    fn add_series(&mut self, series: SeriesHandle);

    /// Observed point values changed; redraw on the next frame.
    fn request_redraw(&mut self);
}

/// A surface that renders nothing but records what it was told.
///
/// Stands in for a real chart widget in tests and headless demos.
#[derive(Default)]
pub struct HeadlessSurface {
    series: Vec<SeriesHandle>,
    redraws: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(&self) -> &[SeriesHandle] {
        &self.series
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }
}

impl RenderSurface for HeadlessSurface {
    fn add_series(&mut self, series: SeriesHandle) {
        self.series.push(series);
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}
