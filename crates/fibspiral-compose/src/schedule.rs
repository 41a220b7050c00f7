//! Layer schedule: ring counts, stamp radii, and ring distances.
//!
//! The composition is built from eight concentric rings. Ring `k` holds
//! [`LAYER_COUNTS`]`[k]` stamps, and both the stamp size and the ring
//! distance shrink by the golden-ratio decay [`DECAY`] from one ring to
//! the next. The first ring is a single stamp sitting on the canvas
//! center.
//!
//! The constants are visual-tuning literals. Changing them changes every
//! rendered pixel.

use serde::{Deserialize, Serialize};

/// Stamps per ring, outermost-drawn first.
pub const LAYER_COUNTS: [u32; 8] = [1, 8, 13, 21, 34, 55, 89, 144];

/// Canvas size divided by this gives the first stamp's box edge.
pub const BASE_DIVISOR: f64 = 6.103;

/// Per-ring shrink factor for stamp size and ring spacing.
pub const DECAY: f64 = 0.61803;

/// One ring of the composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    /// Number of stamps evenly spaced around the ring.
    pub count: u32,
    /// Half the edge of each stamp's square target box.
    pub radius: f64,
    /// Signed distance of the ring from the canvas center. Zero or
    /// negative for every generated layer.
    pub y_offset: f64,
}

/// Carried state of the schedule recurrence.
#[derive(Debug, Clone, Copy)]
struct Stepper {
    current_size: f64,
    y_position: f64,
}

impl Stepper {
    fn start(size: u32) -> Self {
        Self {
            current_size: f64::from(size) / BASE_DIVISOR,
            y_position: 0.0,
        }
    }

    fn spec(self, count: u32) -> LayerSpec {
        LayerSpec {
            count,
            radius: self.current_size / 2.0,
            y_offset: self.y_position,
        }
    }

    fn advance(self) -> Self {
        let next_size = self.current_size * DECAY;
        Self {
            current_size: next_size,
            y_position: self.y_position
                - self.current_size / 2.0
                - next_size * DECAY
                - next_size / 2.0,
        }
    }
}

/// Compute the eight ring specs for a canvas of edge length `size`.
///
/// Each spec depends on every previous one, so the rings are produced by
/// replaying the recurrence from the first ring.
#[must_use]
pub fn layer_schedule(size: u32) -> [LayerSpec; 8] {
    let mut specs = [LayerSpec {
        count: 0,
        radius: 0.0,
        y_offset: 0.0,
    }; 8];

    LAYER_COUNTS
        .iter()
        .zip(specs.iter_mut())
        .fold(Stepper::start(size), |stepper, (&count, slot)| {
            *slot = stepper.spec(count);
            stepper.advance()
        });

    specs
}
