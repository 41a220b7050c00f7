//! fibspiral-compose: Fibonacci spiral composer (sans-IO).
//!
//! Renders a square canvas in which copies of one source image are
//! arranged on eight concentric rings:
//! layer schedule -> polar placement -> resize -> rotate -> composite.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! rasters and byte slices. File access, encoding, and logging setup live
//! in the `fibspiral` binary and `fibspiral-export`.

pub mod compose;
pub mod composite;
pub mod decode;
pub mod diagnostics;
pub mod placement;
pub mod schedule;
pub mod stamp;
pub mod types;

pub use compose::{LayerOutcome, compose_layers, draw_layer, new_canvas};
pub use decode::decode_rgba;
pub use diagnostics::{Clock, ComposeDiagnostics, render_with_diagnostics};
pub use schedule::{LayerSpec, layer_schedule};
pub use stamp::{ResizeFilter, RotateInterpolation};
pub use types::{ComposeConfig, ComposeError, Dimensions, RgbaImage};

/// Render the spiral composition of `source` on a `size x size` canvas
/// with the default resampling settings.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidDimension`] if `size` is zero or the
/// source has a zero-length axis.
pub fn render(source: &RgbaImage, size: u32) -> Result<RgbaImage, ComposeError> {
    render_with(source, &ComposeConfig::with_size(size))
}

/// Render the spiral composition of `source` with an explicit
/// configuration.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidDimension`] if `config.size` is zero or
/// the source has a zero-length axis.
pub fn render_with(source: &RgbaImage, config: &ComposeConfig) -> Result<RgbaImage, ComposeError> {
    let schedule = layer_schedule(config.size);
    tracing::info!(
        width = source.width(),
        height = source.height(),
        size = config.size,
        "rendering spiral"
    );
    compose_layers(source, config.size, &schedule, config)
}

/// Decode raw image bytes and render them.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyInput`] or [`ComposeError::ImageDecode`]
/// for unusable bytes, and the errors of [`render_with`].
pub fn generate(image_bytes: &[u8], config: &ComposeConfig) -> Result<RgbaImage, ComposeError> {
    config.validate()?;
    let source = decode_rgba(image_bytes)?;
    render_with(&source, config)
}
