//! Image decoding to straight RGBA.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the RGBA
//! source raster the composer stamps from. Formats without an alpha
//! channel decode as fully opaque.

use crate::types::{ComposeError, RgbaImage};

/// Decode raw image bytes into an RGBA raster.
///
/// # Errors
///
/// Returns [`ComposeError::EmptyInput`] if `bytes` is empty.
/// Returns [`ComposeError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, ComposeError> {
    if bytes.is_empty() {
        return Err(ComposeError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
