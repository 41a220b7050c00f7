//! Shared types for the fibspiral composer.

use serde::{Deserialize, Serialize};

use crate::stamp::{ResizeFilter, RotateInterpolation};

/// Re-export `RgbaImage` so downstream crates can pass source images and
/// receive canvases without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create a new dimensions pair.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of an existing raster.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Returns `true` if either axis is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Configuration for a single render.
///
/// The geometry of the composition is fixed; only the output size and the
/// resampling quality are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Edge length of the square output canvas in pixels.
    pub size: u32,

    /// Filter used to scale the source image to each stamp's box.
    pub resize_filter: ResizeFilter,

    /// Interpolation used when rotating a stamp by an angle that is not a
    /// multiple of 90 degrees.
    pub rotate_interpolation: RotateInterpolation,
}

impl ComposeConfig {
    /// Default canvas edge length.
    pub const DEFAULT_SIZE: u32 = 1024;

    /// Default stamp resize filter.
    pub const DEFAULT_RESIZE_FILTER: ResizeFilter = ResizeFilter::Lanczos3;

    /// Default stamp rotation interpolation.
    pub const DEFAULT_ROTATE_INTERPOLATION: RotateInterpolation = RotateInterpolation::Bicubic;

    /// Default configuration with a different canvas size.
    #[must_use]
    pub fn with_size(size: u32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Check the configuration before any pixels are touched.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::InvalidDimension`] if `size` is zero or the
    /// RGBA canvas byte length would overflow `usize`.
    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.size == 0 {
            return Err(ComposeError::InvalidDimension(
                "canvas size must be positive".to_owned(),
            ));
        }
        if canvas_byte_len(self.size).is_none() {
            return Err(ComposeError::InvalidDimension(format!(
                "canvas size {} is too large",
                self.size
            )));
        }
        Ok(())
    }
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            resize_filter: Self::DEFAULT_RESIZE_FILTER,
            rotate_interpolation: Self::DEFAULT_ROTATE_INTERPOLATION,
        }
    }
}

/// Errors that can occur while composing.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// Canvas size or source dimensions are zero.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid compose configuration: {0}")]
    InvalidConfig(String),
}

/// Byte length of a `size x size` RGBA buffer, if it fits in `usize`.
fn canvas_byte_len(size: u32) -> Option<usize> {
    let edge = usize::try_from(size).ok()?;
    edge.checked_mul(edge)?.checked_mul(4)
}

/// Reject sources that cannot produce a meaningful aspect ratio.
pub(crate) fn validate_source(source: &RgbaImage) -> Result<Dimensions, ComposeError> {
    let dims = Dimensions::of(source);
    if dims.is_empty() {
        return Err(ComposeError::InvalidDimension(format!(
            "source image is {}x{}",
            dims.width, dims.height
        )));
    }
    Ok(dims)
}
