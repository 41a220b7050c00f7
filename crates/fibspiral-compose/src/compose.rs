//! Ring drawing: turn layer specs into composited stamps on a canvas.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::composite::paste_over;
use crate::placement::{layer_placements, stamp_size};
use crate::schedule::LayerSpec;
use crate::stamp::build_stamp;
use crate::types::{ComposeConfig, ComposeError, Dimensions, RgbaImage, validate_source};

/// Background of every fresh canvas.
pub const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Stamp counts for one drawn ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerOutcome {
    /// Stamps composited onto the canvas.
    pub drawn: u32,
    /// Stamps skipped because their box had no area.
    pub skipped: u32,
}

/// A `size x size` opaque black canvas.
///
/// # Panics
///
/// Panics if the buffer length overflows `usize`; sizes that passed
/// [`ComposeConfig::validate`] never do.
#[must_use]
pub fn new_canvas(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, BACKGROUND)
}

/// Draw every stamp of `layer` onto `canvas`.
///
/// The canvas is assumed square; its center is `width / 2`. All stamps in
/// a ring share one size, so a degenerate box skips the whole ring.
pub fn draw_layer(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    layer: &LayerSpec,
    config: &ComposeConfig,
) -> LayerOutcome {
    let center = canvas.width() / 2;
    let Some(size) = stamp_size(layer.radius, Dimensions::of(source)) else {
        tracing::trace!(
            radius = layer.radius,
            count = layer.count,
            "stamp box is empty, skipping ring items"
        );
        return LayerOutcome {
            drawn: 0,
            skipped: layer.count,
        };
    };

    let mut outcome = LayerOutcome::default();
    for placement in layer_placements(layer) {
        let stamp = build_stamp(
            source,
            size,
            &placement,
            center,
            config.resize_filter,
            config.rotate_interpolation,
        );
        paste_over(canvas, &stamp.image, stamp.x, stamp.y);
        outcome.drawn += 1;
    }
    outcome
}

/// Draw `layers` in order onto a fresh canvas of edge length `size`.
///
/// Later layers are drawn over earlier ones.
///
/// # Errors
///
/// Returns [`ComposeError::InvalidDimension`] if `size` is zero or too
/// large to allocate, or the source has a zero-length axis.
pub fn compose_layers(
    source: &RgbaImage,
    size: u32,
    layers: &[LayerSpec],
    config: &ComposeConfig,
) -> Result<RgbaImage, ComposeError> {
    let mut canvas = prepare_canvas(source, size, config)?;
    draw_layers(&mut canvas, source, layers, config, |_, _, _| {});
    Ok(canvas)
}

/// Validate the inputs and allocate the background canvas.
pub(crate) fn prepare_canvas(
    source: &RgbaImage,
    size: u32,
    config: &ComposeConfig,
) -> Result<RgbaImage, ComposeError> {
    ComposeConfig { size, ..*config }.validate()?;
    validate_source(source)?;
    Ok(new_canvas(size))
}

/// Draw `layers` in order onto `canvas`, calling `on_layer` after each
/// ring with its index, spec, and outcome.
pub(crate) fn draw_layers(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    layers: &[LayerSpec],
    config: &ComposeConfig,
    mut on_layer: impl FnMut(usize, &LayerSpec, LayerOutcome),
) {
    for (index, layer) in layers.iter().enumerate() {
        let outcome = draw_layer(canvas, source, layer, config);
        tracing::debug!(
            layer = index,
            count = layer.count,
            radius = layer.radius,
            y_offset = layer.y_offset,
            drawn = outcome.drawn,
            skipped = outcome.skipped,
            "layer drawn"
        );
        on_layer(index, layer, outcome);
    }
}
