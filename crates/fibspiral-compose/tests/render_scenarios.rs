//! Integration tests: full renders of synthetic sources.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use fibspiral_compose::placement::{placement, stamp_size};
use fibspiral_compose::stamp::build_stamp;
use fibspiral_compose::{
    ComposeConfig, Dimensions, LayerSpec, RgbaImage, compose_layers, layer_schedule, new_canvas,
    render,
};
use image::Rgba;

const BLACK: [u8; 4] = [0, 0, 0, 255];

fn opaque_red(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
}

fn is_red(p: &Rgba<u8>) -> bool {
    p.0[0] > 200 && p.0[1] < 50 && p.0[2] < 50
}

#[test]
fn red_square_at_reference_size() {
    let canvas = render(&opaque_red(100, 100), 1024).expect("render should succeed");

    assert_eq!(canvas.dimensions(), (1024, 1024));
    assert!(
        is_red(canvas.get_pixel(512, 512)),
        "center pixel should be red, got {:?}",
        canvas.get_pixel(512, 512).0
    );
    for (x, y) in [(0, 0), (1023, 0), (0, 1023), (1023, 1023)] {
        assert_eq!(canvas.get_pixel(x, y).0, BLACK, "corner ({x},{y})");
    }
}

#[test]
fn render_is_deterministic() {
    let source = RgbaImage::from_fn(64, 48, |x, y| {
        #[allow(clippy::cast_possible_truncation)]
        Rgba([(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8, (x * 4) as u8])
    });
    let a = render(&source, 300).unwrap();
    let b = render(&source, 300).unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn center_stamp_covers_canvas_center_for_any_size() {
    for size in [64, 101, 257, 1000] {
        let canvas = render(&opaque_red(40, 40), size).unwrap();
        let c = size / 2;
        assert!(is_red(canvas.get_pixel(c, c)), "size {size}");
    }
}

#[test]
fn rings_stay_inside_inscribed_circle() {
    let canvas = render(&opaque_red(50, 50), 512).unwrap();
    let center = 256.0;
    for (x, y, p) in canvas.enumerate_pixels() {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        // A few pixels of slack for rotated bounding boxes and truncation.
        if dx.hypot(dy) > 262.0 {
            assert_eq!(p.0, BLACK, "({x},{y}) outside the rings was painted");
        }
    }
}

#[test]
fn landscape_center_stamp_keeps_aspect() {
    // 200x100 source: the center stamp is 2r wide and r tall.
    let canvas = render(&opaque_red(200, 100), 1024).unwrap();
    let schedule = layer_schedule(1024);
    let edge = schedule[0].radius * 2.0;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stamp_h = (edge / 2.0).floor() as u32;

    // Walk up from the center until the red run ends.
    let mut top = 512;
    while top > 0 && is_red(canvas.get_pixel(512, top - 1)) {
        top -= 1;
    }
    let mut bottom = 512;
    while bottom < 1023 && is_red(canvas.get_pixel(512, bottom + 1)) {
        bottom += 1;
    }
    let run = bottom - top + 1;
    assert!(
        run.abs_diff(stamp_h) <= 1,
        "vertical red run {run}, expected ~{stamp_h}"
    );
}

#[test]
fn zero_radius_layer_is_skipped_and_later_layers_render() {
    let source = opaque_red(30, 30);
    let config = ComposeConfig::with_size(512);
    let schedule = layer_schedule(512);

    let mut degenerate = schedule;
    degenerate[3].radius = 0.0;
    let with_zero = compose_layers(&source, 512, &degenerate, &config).unwrap();

    let without: Vec<LayerSpec> = schedule
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 3)
        .map(|(_, s)| *s)
        .collect();
    let dropped = compose_layers(&source, 512, &without, &config).unwrap();
    assert_eq!(with_zero, dropped);

    let first_three = compose_layers(&source, 512, &schedule[..3], &config).unwrap();
    assert_ne!(with_zero, first_three, "layers after the skipped one drew nothing");
}

#[test]
fn empty_schedule_returns_background() {
    let canvas = compose_layers(&opaque_red(5, 5), 33, &[], &ComposeConfig::default()).unwrap();
    assert_eq!(canvas, new_canvas(33));
}

#[test]
fn rotated_stamps_keep_their_area_in_every_ring() {
    let source = opaque_red(100, 100);
    let config = ComposeConfig::default();
    for (index, layer) in layer_schedule(1024).iter().enumerate() {
        let size = stamp_size(layer.radius, Dimensions::of(&source)).unwrap();
        let stamp = build_stamp(
            &source,
            size,
            &placement(layer, 1),
            512,
            config.resize_filter,
            config.rotate_interpolation,
        );
        let area = f64::from(size.width * size.height);
        let coverage = stamp
            .image
            .pixels()
            .map(|p| f64::from(p.0[3]) / 255.0)
            .sum::<f64>();
        assert!(
            (coverage - area).abs() < area * 0.25,
            "layer {index}: coverage {coverage} for a {}x{} stamp",
            size.width,
            size.height,
        );
    }
}
