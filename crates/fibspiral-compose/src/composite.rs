//! Alpha compositing of stamps onto the canvas.
//!
//! Pixels are straight (non-premultiplied) RGBA. Each stamp pixel is laid
//! over the canvas with the Porter-Duff "over" operator weighted by the
//! stamp's own alpha, so transparent stamp pixels leave the canvas alone
//! and opaque ones replace it.

use image::Rgba;

use crate::types::RgbaImage;

/// Blend a single straight-alpha `src` pixel over `dst`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src.0[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let sa = f32::from(src.0[3]) / 255.0;
    let da = f32::from(dst.0[3]) / 255.0;
    let out_a = da.mul_add(1.0 - sa, sa);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let sc = f32::from(src.0[c]);
        let dc = f32::from(dst.0[c]);
        let blended = sc.mul_add(sa, dc * da * (1.0 - sa)) / out_a;
        out[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Composite `stamp` onto `canvas` with its top-left corner at `(x, y)`.
///
/// The offset may be negative or place the stamp partly (or wholly)
/// outside the canvas; only the overlapping region is touched.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn paste_over(canvas: &mut RgbaImage, stamp: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (sw, sh) = (i64::from(stamp.width()), i64::from(stamp.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(cw);
    let y1 = (y + sh).min(ch);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    // All coordinates below are inside both rasters, so the casts are exact.
    for cy in y0..y1 {
        for cx in x0..x1 {
            let src = *stamp.get_pixel((cx - x) as u32, (cy - y) as u32);
            if src.0[3] == 0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            *dst = over(*dst, src);
        }
    }
}
