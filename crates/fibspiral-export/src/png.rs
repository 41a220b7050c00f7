//! PNG and data URL serialization.
//!
//! This is a pure function with no I/O -- it returns bytes or a `String`.

use base64::{Engine as _, engine::general_purpose};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use fibspiral_compose::RgbaImage;

use crate::ExportError;

/// Prefix of every PNG data URL produced by [`to_data_url`].
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode an RGBA canvas as PNG bytes.
///
/// # Errors
///
/// Returns [`ExportError::Encode`] if the encoder rejects the buffer.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        canvas.as_raw(),
        canvas.width(),
        canvas.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buf)
}

/// Wrap PNG bytes in a `data:image/png;base64,...` URL.
///
/// # Examples
///
/// ```
/// use fibspiral_export::to_data_url;
///
/// assert_eq!(to_data_url(b"hi"), "data:image/png;base64,aGk=");
/// ```
#[must_use]
pub fn to_data_url(png: &[u8]) -> String {
    let b64 = general_purpose::STANDARD.encode(png);
    format!("{DATA_URL_PREFIX}{b64}")
}
