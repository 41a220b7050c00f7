//! Render diagnostics: timing and stamp counts for each layer.
//!
//! Time is read through the [`Clock`] trait so this crate stays free of
//! platform timer dependencies; callers supply a clock backed by whatever
//! timer their target provides.
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::compose::{LayerOutcome, draw_layers, prepare_canvas};
use crate::schedule::layer_schedule;
use crate::types::{ComposeConfig, ComposeError, Dimensions, RgbaImage};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Monotonic time source.
pub trait Clock {
    /// Opaque timestamp.
    type Instant;

    /// Current timestamp.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// Diagnostics collected from a single render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeDiagnostics {
    /// Source image dimensions.
    pub source: Dimensions,
    /// Output canvas edge length.
    pub size: u32,
    /// Input validation and canvas allocation time (seconds).
    #[serde(with = "duration_serde")]
    pub setup_duration: Duration,
    /// One entry per drawn layer, in drawing order.
    pub layers: Vec<LayerDiagnostics>,
    /// Total wall-clock duration of the render (seconds).
    #[serde(with = "duration_serde")]
    pub total_duration: Duration,
}

/// Diagnostics for one layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDiagnostics {
    /// Position in the schedule.
    pub index: usize,
    /// Stamps requested by the schedule.
    pub count: u32,
    /// Half-edge of the stamp box.
    pub radius: f64,
    /// Ring distance from the canvas center.
    pub y_offset: f64,
    /// Drawn and skipped stamp counts.
    pub outcome: LayerOutcome,
    /// Wall-clock time spent on this layer (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl ComposeDiagnostics {
    /// Total stamps composited across all layers.
    #[must_use]
    pub fn stamps_drawn(&self) -> u32 {
        self.layers.iter().map(|l| l.outcome.drawn).sum()
    }

    /// Total stamps skipped across all layers.
    #[must_use]
    pub fn stamps_skipped(&self) -> u32 {
        self.layers.iter().map(|l| l.outcome.skipped).sum()
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Render Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!(
            "Source: {}x{}  |  Canvas: {}x{}",
            self.source.width, self.source.height, self.size, self.size,
        ));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.total_duration),
        ));
        lines.push(format!(
            "Setup (validate + canvas): {:.3}ms",
            duration_ms(self.setup_duration),
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<8} {:>6} {:>10} {:>10} {:>10} {:>9}  {}",
            "Layer", "Count", "Radius", "Offset", "Duration", "% Total", "Stamps"
        ));
        lines.push("-".repeat(80));

        let total_ms = duration_ms(self.total_duration);
        for layer in &self.layers {
            let ms = duration_ms(layer.duration);
            let pct = if total_ms > 0.0 {
                ms / total_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "{:<8} {:>6} {:>10.3} {:>10.3} {:>8.3}ms {:>8.1}%  drawn={} skipped={}",
                layer.index,
                layer.count,
                layer.radius,
                layer.y_offset,
                ms,
                pct,
                layer.outcome.drawn,
                layer.outcome.skipped,
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Stamps drawn: {}  |  skipped: {}",
            self.stamps_drawn(),
            self.stamps_skipped(),
        ));

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Render like [`crate::render_with`] while timing every layer.
///
/// # Errors
///
/// Same as [`crate::render_with`].
pub fn render_with_diagnostics<C: Clock>(
    source: &RgbaImage,
    config: &ComposeConfig,
    clock: &C,
) -> Result<(RgbaImage, ComposeDiagnostics), ComposeError> {
    let start = clock.now();
    let schedule = layer_schedule(config.size);
    let mut canvas = prepare_canvas(source, config.size, config)?;
    let setup_duration = clock.elapsed(&start);

    let mut layers = Vec::with_capacity(schedule.len());
    let mut layer_start = clock.now();
    draw_layers(&mut canvas, source, &schedule, config, |index, spec, outcome| {
        layers.push(LayerDiagnostics {
            index,
            count: spec.count,
            radius: spec.radius,
            y_offset: spec.y_offset,
            outcome,
            duration: clock.elapsed(&layer_start),
        });
        layer_start = clock.now();
    });

    let diagnostics = ComposeDiagnostics {
        source: Dimensions::of(source),
        size: config.size,
        setup_duration,
        layers,
        total_duration: clock.elapsed(&start),
    };
    Ok((canvas, diagnostics))
}
