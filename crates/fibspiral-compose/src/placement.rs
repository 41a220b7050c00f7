//! Polar placement of the stamps in one ring.
//!
//! Coordinates are relative to the canvas center with the y axis pointing
//! down, matching raster row order. Item `i` of a ring with `n` stamps sits
//! at `90 - i * 360/n` degrees. Generated ring offsets are negative, so the
//! last item of every ring lands straight above the center.

use std::f64::consts::FRAC_PI_2;

use crate::schedule::LayerSpec;
use crate::types::Dimensions;

/// Geometry of one stamp before any pixels are produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPlacement {
    /// 1-based position within the ring.
    pub index: u32,
    /// Placement angle in radians.
    pub angle_rad: f64,
    /// Horizontal offset of the stamp center from the canvas center.
    pub offset_x: f64,
    /// Vertical offset of the stamp center from the canvas center.
    pub offset_y: f64,
    /// `angle_rad - pi/2` in degrees. The stamp is turned clockwise by this
    /// amount so its top edge faces away from the center.
    pub rotation_deg: f64,
}

/// Angular width of one stamp in a ring of `count` items, in degrees.
#[must_use]
pub fn angle_step_deg(count: u32) -> f64 {
    360.0 / f64::from(count)
}

/// Placement of item `index` (1-based) in `layer`.
#[must_use]
pub fn placement(layer: &LayerSpec, index: u32) -> StampPlacement {
    let angle_deg = f64::from(index).mul_add(-angle_step_deg(layer.count), 90.0);
    let angle_rad = angle_deg.to_radians();

    StampPlacement {
        index,
        angle_rad,
        offset_x: angle_rad.cos() * layer.y_offset,
        offset_y: angle_rad.sin() * layer.y_offset,
        rotation_deg: (angle_rad - FRAC_PI_2).to_degrees(),
    }
}

/// Placements of every item in `layer`, in drawing order.
pub fn layer_placements(layer: &LayerSpec) -> impl Iterator<Item = StampPlacement> + '_ {
    (1..=layer.count).map(move |index| placement(layer, index))
}

/// Pixel size of a stamp whose square target box has half-edge `radius`,
/// shrunk along one axis to keep the source aspect ratio.
///
/// Sizes are floored and then clamped to at least one pixel, so a tiny but
/// positive radius still yields a 1x1 stamp. Returns `None` when the box
/// itself is empty (zero, negative, or non-finite radius); such stamps are
/// skipped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stamp_size(radius: f64, source: Dimensions) -> Option<Dimensions> {
    let edge = 2.0 * radius;
    let aspect = source.aspect_ratio();

    let (w, h) = if aspect > 1.0 {
        (edge, edge / aspect)
    } else {
        (edge * aspect, edge)
    };

    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        return None;
    }

    let width = (w.floor() as u32).max(1);
    let height = (h.floor() as u32).max(1);
    Some(Dimensions::new(width, height))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ring(count: u32, y_offset: f64) -> LayerSpec {
        LayerSpec {
            count,
            radius: 10.0,
            y_offset,
        }
    }

    #[test]
    fn center_layer_collapses_to_origin() {
        let layer = ring(1, 0.0);
        let items: Vec<_> = layer_placements(&layer).collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].offset_x.abs() < 1e-12);
        assert!(items[0].offset_y.abs() < 1e-12);
    }

    #[test]
    fn yields_count_items_with_one_based_indices() {
        let layer = ring(13, -50.0);
        let indices: Vec<u32> = layer_placements(&layer).map(|p| p.index).collect();
        assert_eq!(indices, (1..=13).collect::<Vec<_>>());
    }

    #[test]
    fn angles_are_evenly_spaced_over_full_circle() {
        for count in [1, 8, 13, 21, 34, 55, 89, 144] {
            let layer = ring(count, -100.0);
            let angles: Vec<f64> = layer_placements(&layer)
                .map(|p| p.angle_rad.to_degrees())
                .collect();
            let step = 360.0 / f64::from(count);
            for pair in angles.windows(2) {
                assert!((pair[0] - pair[1] - step).abs() < 1e-9);
            }
            let span = step * f64::from(count);
            assert!((span.rem_euclid(360.0)).min(360.0 - span.rem_euclid(360.0)) < 1e-9);
        }
    }

    #[test]
    fn last_item_sits_straight_above_center_without_rotation() {
        // 90 - n * 360/n = -270 degrees, which points along +y; with a
        // negative offset the stamp lands above the center.
        let layer = ring(8, -100.0);
        let last = placement(&layer, 8);
        assert!(last.offset_x.abs() < 1e-9);
        assert!((last.offset_y - -100.0).abs() < 1e-9);
        let turns = last.rotation_deg / 360.0;
        assert!((turns - turns.round()).abs() < 1e-9);
    }

    #[test]
    fn quarter_turn_item_faces_outward() {
        // Item 2 of 8 is at 0 degrees: offset along -x (left of center),
        // rotation -90 degrees (top edge turned to face left).
        let layer = ring(8, -100.0);
        let item = placement(&layer, 2);
        assert!((item.offset_x - -100.0).abs() < 1e-9);
        assert!(item.offset_y.abs() < 1e-9);
        assert!((item.rotation_deg - -90.0).abs() < 1e-9);
    }

    #[test]
    fn items_lie_on_ring_radius() {
        let layer = ring(21, -123.4);
        for p in layer_placements(&layer) {
            let dist = p.offset_x.hypot(p.offset_y);
            assert!((dist - 123.4).abs() < 1e-9);
        }
    }

    #[test]
    fn square_source_fills_box() {
        let size = stamp_size(50.0, Dimensions::new(100, 100)).unwrap();
        assert_eq!(size, Dimensions::new(100, 100));
    }

    #[test]
    fn landscape_source_shrinks_height() {
        let size = stamp_size(50.0, Dimensions::new(200, 100)).unwrap();
        assert_eq!(size, Dimensions::new(100, 50));
    }

    #[test]
    fn portrait_source_shrinks_width() {
        let size = stamp_size(50.0, Dimensions::new(100, 300)).unwrap();
        assert_eq!(size, Dimensions::new(33, 100));
    }

    #[test]
    fn aspect_ratio_preserved_within_one_pixel() {
        let sources = [(640, 480), (480, 640), (1920, 1080), (37, 91), (100, 99)];
        let schedule = crate::schedule::layer_schedule(1024);
        for (w, h) in sources {
            let source = Dimensions::new(w, h);
            for layer in &schedule {
                let stamp = stamp_size(layer.radius, source).unwrap();
                let (long, short, ratio) = if w > h {
                    (stamp.width, stamp.height, source.aspect_ratio())
                } else {
                    (stamp.height, stamp.width, 1.0 / source.aspect_ratio())
                };
                let ideal_short = f64::from(long) / ratio;
                assert!(
                    (f64::from(short) - ideal_short).abs() <= 1.0,
                    "{w}x{h} at r={}: got {}x{}",
                    layer.radius,
                    stamp.width,
                    stamp.height,
                );
            }
        }
    }

    #[test]
    fn sub_pixel_radius_clamps_to_one_pixel() {
        let size = stamp_size(0.2, Dimensions::new(10, 10)).unwrap();
        assert_eq!(size, Dimensions::new(1, 1));
    }

    #[test]
    fn extreme_aspect_clamps_short_axis() {
        let size = stamp_size(10.0, Dimensions::new(1000, 1)).unwrap();
        assert_eq!(size, Dimensions::new(20, 1));
    }

    #[test]
    fn zero_radius_is_skipped() {
        assert_eq!(stamp_size(0.0, Dimensions::new(10, 10)), None);
        assert_eq!(stamp_size(-3.0, Dimensions::new(10, 10)), None);
        assert_eq!(stamp_size(f64::NAN, Dimensions::new(10, 10)), None);
    }
}
