//! Threshold gating and detection collection.

use serde::{Deserialize, Serialize};

use crate::ncc::ResponseSurface;

/// A pixel position whose correlation cleared the match threshold.
///
/// Coordinates are the top-left anchor of the matched window in scene space
/// and always lie within the scene bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Detection {
    pub x: u32,
    pub y: u32,
}

impl Detection {
    #[inline]
    pub fn distance_to(&self, other: &Detection) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Collect every above-threshold position of one response surface.
///
/// The attempt is gated on the surface maximum: when no position reaches the
/// threshold the whole variant is dropped without a per-pixel scan. When the
/// gate passes, scores are one-sided thresholded (values at or below the
/// threshold become zero, larger values keep their magnitude) and every
/// position left with a positive score is emitted in row-major order.
pub fn collect_detections(surface: &ResponseSurface, threshold: f32) -> Vec<Detection> {
    if surface.max_value() < threshold {
        return Vec::new();
    }

    let mut detections = Vec::new();
    for y in 0..surface.height {
        for x in 0..surface.width {
            let v = surface.at(x, y);
            let v = if v > threshold { v } else { 0.0 };
            if v > 0.0 {
                detections.push(Detection {
                    x: x as u32,
                    y: y as u32,
                });
            }
        }
    }
    detections
}
