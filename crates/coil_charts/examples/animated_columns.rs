//! Spring-animated column data demo (headless)
//!
//! Reproduces the classic animated-chart flow without a window: a fixed set
//! of categories, a "year selector" that swaps in a new dataset mid-flight,
//! and spring parameters adjusted between datasets. Instead of pixels, the
//! current column values are printed as ASCII bars.
//!
//! Run with:
//! `cargo run -p coil_charts --example animated_columns`
//!
//! Optional:
//! - `COIL_DEMO_BOUNCINESS` initial spring bounciness (default: 4)
//! - `COIL_DEMO_SPEED` initial spring speed (default: 12)

use std::sync::{Arc, Mutex};

use anyhow::Result;
use coil_charts::prelude::*;

const DT: f32 = 1.0 / 60.0;

struct ConsoleSurface {
    series: Vec<SeriesHandle>,
    dirty: bool,
}

impl ConsoleSurface {
    fn new() -> Self {
        Self {
            series: Vec::new(),
            dirty: false,
        }
    }

    /// Redraw if anything changed since the last frame.
    fn flush(&mut self, frame: usize) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        // Print every few frames; a terminal is not a 60fps device.
        if frame % 6 != 0 {
            return;
        }
        for handle in &self.series {
            handle.with(|series| {
                for point in series.points() {
                    let cols = (point.value.max(0.0) * 3.0).round() as usize;
                    println!("{:>6} | {:<60} {:6.2}", point.category, "#".repeat(cols), point.value);
                }
            });
        }
        println!();
    }
}

impl RenderSurface for ConsoleSurface {
    fn add_series(&mut self, series: SeriesHandle) {
        self.series.push(series);
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }
}

fn env_f32(name: &str, default: f32) -> f32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<f32>().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let surface = Arc::new(Mutex::new(ConsoleSurface::new()));
    let shared: SharedSurface = surface.clone();

    let mut source = AnimatingDataSource::builder()
        .series_kind(SeriesKind::Bar)
        .series_name("Widget sales")
        .spring_bounciness(env_f32("COIL_DEMO_BOUNCINESS", 4.0))
        .spring_speed(env_f32("COIL_DEMO_SPEED", 12.0))
        .build(shared, ["2010", "2011", "2012"])?;

    // One dataset per "year selector" segment of the original UI.
    let datasets: [(&str, [f32; 3], Option<(f32, f32)>); 3] = [
        ("initial load", [5.0, 10.0, 15.0], None),
        // Crank the bounce slider before the second dataset.
        ("bouncy selection", [12.0, 3.0, 8.0], Some((18.0, 10.0))),
        ("settle down", [1.0, 1.0, 1.0], Some((0.0, 12.0))),
    ];

    let mut frame = 0usize;
    for (label, values, params) in datasets {
        if let Some((bounciness, speed)) = params {
            source.set_spring_bounciness(bounciness);
            source.set_spring_speed(speed);
        }
        tracing::info!(
            label,
            bounciness = source.spring_bounciness(),
            speed = source.spring_speed(),
            "animating to {values:?}"
        );
        source.animate_to_values(&values)?;

        // Interrupt the middle dataset before it settles, like tapping the
        // year selector mid-animation.
        let budget = if label == "bouncy selection" { 30 } else { usize::MAX };
        let mut spent = 0;
        while source.tick(DT) && spent < budget {
            frame += 1;
            spent += 1;
            surface.lock().unwrap().flush(frame);
        }
    }

    tracing::info!("settled at {:?}", source.values());
    Ok(())
}
