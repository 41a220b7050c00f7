//! Stamp construction: resize the source, rotate it, and work out where
//! it lands on the canvas.
//!
//! Every stamp is a fresh raster. The source is only ever read, so a
//! single decoded image can back any number of concurrent renders.

use std::fmt;

use image::Rgba;
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use serde::{Deserialize, Serialize};

use crate::placement::StampPlacement;
use crate::types::{Dimensions, RgbaImage};

/// Resampling filter used to scale the source to a stamp's box.
///
/// Ordered from fastest/lowest-quality to slowest/highest-quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeFilter {
    /// Nearest-neighbor: fastest, blocky artifacts.
    Nearest,
    /// Bilinear interpolation: fast, decent quality.
    Triangle,
    /// Bicubic (Catmull-Rom): moderate speed, good quality.
    CatmullRom,
    /// Gaussian: moderate speed, smooth output.
    Gaussian,
    /// Lanczos with 3 lobes: slowest, sharpest.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Convert to the `image` crate's `FilterType`.
    const fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            Self::Nearest => image::imageops::FilterType::Nearest,
            Self::Triangle => image::imageops::FilterType::Triangle,
            Self::CatmullRom => image::imageops::FilterType::CatmullRom,
            Self::Gaussian => image::imageops::FilterType::Gaussian,
            Self::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResizeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Triangle => f.write_str("Triangle"),
            Self::CatmullRom => f.write_str("CatmullRom"),
            Self::Gaussian => f.write_str("Gaussian"),
            Self::Lanczos3 => f.write_str("Lanczos3"),
        }
    }
}

/// Interpolation used for rotations that are not quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotateInterpolation {
    /// Nearest-neighbor sampling.
    Nearest,
    /// Bilinear sampling.
    Bilinear,
    /// Bicubic sampling.
    #[default]
    Bicubic,
}

impl RotateInterpolation {
    const fn to_interpolation(self) -> Interpolation {
        match self {
            Self::Nearest => Interpolation::Nearest,
            Self::Bilinear => Interpolation::Bilinear,
            Self::Bicubic => Interpolation::Bicubic,
        }
    }
}

impl fmt::Display for RotateInterpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Bilinear => f.write_str("Bilinear"),
            Self::Bicubic => f.write_str("Bicubic"),
        }
    }
}

/// A transformed copy of the source with its top-left canvas position.
#[derive(Debug, Clone)]
pub struct PlacedStamp {
    /// Resized and rotated pixels.
    pub image: RgbaImage,
    /// Column of the stamp's left edge. May be negative.
    pub x: i64,
    /// Row of the stamp's top edge. May be negative.
    pub y: i64,
}

/// Scale `source` to exactly `size`.
#[must_use = "returns the resized stamp"]
pub fn resize_stamp(source: &RgbaImage, size: Dimensions, filter: ResizeFilter) -> RgbaImage {
    image::imageops::resize(source, size.width, size.height, filter.to_image_filter())
}

/// Rotate `stamp` clockwise by `degrees`, growing the raster so that no
/// corner is cut off. Uncovered pixels are fully transparent.
///
/// Quarter turns are exact pixel transposes with no resampling.
#[must_use = "returns the rotated stamp"]
#[allow(clippy::cast_possible_truncation)]
pub fn rotate_expand(
    stamp: &RgbaImage,
    degrees: f64,
    interpolation: RotateInterpolation,
) -> RgbaImage {
    let clockwise = degrees.rem_euclid(360.0);
    let quarters = (clockwise / 90.0).round();
    if (clockwise - quarters * 90.0).abs() < 1e-9 {
        return match quarters as i64 % 4 {
            1 => image::imageops::rotate90(stamp),
            2 => image::imageops::rotate180(stamp),
            3 => image::imageops::rotate270(stamp),
            _ => stamp.clone(),
        };
    }

    let theta = clockwise.to_radians();
    let (w, h) = (f64::from(stamp.width()), f64::from(stamp.height()));
    let (cos, sin) = (theta.cos().abs(), theta.sin().abs());
    let out_w = expanded_extent(w / 2.0, w.mul_add(cos, h * sin) / 2.0);
    let out_h = expanded_extent(h / 2.0, w.mul_add(sin, h * cos) / 2.0);

    // Samplers give up on any neighbourhood that leaves the raster, so
    // border pixels only survive with transparent margin around them.
    let padded = pad_transparent(stamp, SAMPLE_MARGIN);
    let in_center = (
        (f64::from(padded.width()) - 1.0) / 2.0,
        (f64::from(padded.height()) - 1.0) / 2.0,
    );
    let out_center = (
        (f64::from(out_w) - 1.0) / 2.0,
        (f64::from(out_h) - 1.0) / 2.0,
    );

    let projection = Projection::translate(out_center.0 as f32, out_center.1 as f32)
        * Projection::rotate(theta as f32)
        * Projection::translate(-in_center.0 as f32, -in_center.1 as f32);

    let mut out = RgbaImage::new(out_w, out_h);
    warp_into(
        &padded,
        &projection,
        interpolation.to_interpolation(),
        Rgba([0, 0, 0, 0]),
        &mut out,
    );
    out
}

/// Transparent border needed by the widest sampler (bicubic, 4x4).
const SAMPLE_MARGIN: u32 = 2;

/// Copy `image` into the middle of a transparent raster `margin` pixels
/// larger on every side.
fn pad_transparent(image: &RgbaImage, margin: u32) -> RgbaImage {
    let mut padded = RgbaImage::new(image.width() + 2 * margin, image.height() + 2 * margin);
    image::imageops::replace(&mut padded, image, i64::from(margin), i64::from(margin));
    padded
}

/// Whole-pixel span covering `[center - half, center + half]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn expanded_extent(center: f64, half: f64) -> u32 {
    let hi = snap(center + half).ceil();
    let lo = snap(center - half).floor();
    ((hi - lo) as u32).max(1)
}

/// Absorb floating-point noise around integers before rounding outward.
fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < 1e-9 { r } else { v }
}

/// Top-left canvas position for a rotated stamp of size `rotated` so that
/// its center lands on the placement's polar coordinate.
///
/// `center` is the canvas center (`size / 2`). Half the stamp size is
/// taken with integer division and the final value truncates toward zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn paste_origin(center: u32, placement: &StampPlacement, rotated: Dimensions) -> (i64, i64) {
    let c = f64::from(center);
    let x = (c + placement.offset_x - f64::from(rotated.width / 2)).trunc();
    let y = (c + placement.offset_y - f64::from(rotated.height / 2)).trunc();
    (x as i64, y as i64)
}

/// Resize, rotate, and position one stamp.
#[must_use]
pub fn build_stamp(
    source: &RgbaImage,
    size: Dimensions,
    placement: &StampPlacement,
    canvas_center: u32,
    resize_filter: ResizeFilter,
    interpolation: RotateInterpolation,
) -> PlacedStamp {
    let resized = resize_stamp(source, size, resize_filter);
    let image = rotate_expand(&resized, placement.rotation_deg, interpolation);
    let (x, y) = paste_origin(canvas_center, placement, Dimensions::of(&image));
    PlacedStamp { image, x, y }
}
