//! Resized and rotated template variants over the sweep grid.

use itemscan_core::{sample_bilinear_u8, GrayImage, GrayImageView};
use serde::{Deserialize, Serialize};

use crate::params::SearchParams;

/// One (width, angle) cell of the sweep grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Target width of the resized template in pixels.
    pub width: u32,
    /// Rotation about the resized template's center, in degrees.
    pub angle_deg: u32,
}

/// A template resized and rotated for one matching attempt.
#[derive(Clone, Debug)]
pub struct TransformVariant {
    pub spec: VariantSpec,
    pub image: GrayImage,
}

/// Enumerate the sweep grid: widths `scale_min..=scale_max` stepped by
/// `scale_step`, then angles `0..=360` stepped by `angle_step_deg`.
///
/// Both angle endpoints are included, so 0 and 360 degrees each produce an
/// identity-rotation variant. The grid is a pure function of the params and
/// regenerates identically on every call.
pub fn variant_grid(params: &SearchParams) -> Vec<VariantSpec> {
    let mut grid = Vec::new();
    let mut width = params.scale_min;
    while width <= params.scale_max {
        let mut angle = 0u32;
        while angle <= 360 {
            grid.push(VariantSpec {
                width,
                angle_deg: angle,
            });
            angle += params.angle_step_deg;
        }
        width += params.scale_step;
    }
    grid
}

/// Lazily produce every variant of the sweep grid, in grid order.
///
/// Variant images are materialized one at a time and dropped by the caller
/// after scoring; re-invoking with the same inputs yields the identical
/// sequence.
pub fn variants<'a>(
    template: GrayImageView<'a>,
    params: &SearchParams,
) -> impl Iterator<Item = TransformVariant> + 'a {
    variant_grid(params)
        .into_iter()
        .map(move |spec| make_variant(&template, spec))
}

/// Produce the resized and rotated variant for one grid cell.
///
/// The caller guarantees `src` is non-empty (see `Template::new`).
pub fn make_variant(src: &GrayImageView<'_>, spec: VariantSpec) -> TransformVariant {
    let resized = resize_to_width(src, spec.width);
    let image = rotate_about_center(&resized.as_view(), spec.angle_deg as f32);
    TransformVariant { spec, image }
}

/// Bilinear resize to `width`, keeping the aspect ratio.
///
/// New height = round(h * width / w), clamped to at least one row.
pub fn resize_to_width(src: &GrayImageView<'_>, width: u32) -> GrayImage {
    let dst_w = width as usize;
    let dst_h = ((src.height as f64 * width as f64 / src.width as f64).round() as usize).max(1);

    let sx = src.width as f32 / dst_w as f32;
    let sy = src.height as f32 / dst_h as f32;
    GrayImage::from_fn(dst_w, dst_h, |x, y| {
        sample_bilinear_u8(
            src,
            (x as f32 + 0.5) * sx - 0.5,
            (y as f32 + 0.5) * sy - 0.5,
        )
    })
}

/// Rotate about the image center onto a canvas of the same size.
///
/// Content rotating outside the canvas is clipped; uncovered canvas reads 0.
pub fn rotate_about_center(src: &GrayImageView<'_>, angle_deg: f32) -> GrayImage {
    if angle_deg.rem_euclid(360.0) == 0.0 {
        return GrayImage {
            width: src.width,
            height: src.height,
            data: src.data.to_vec(),
        };
    }

    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let cx = src.width as f32 / 2.0;
    let cy = src.height as f32 / 2.0;

    GrayImage::from_fn(src.width, src.height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let sx = cx + cos * dx + sin * dy;
        let sy = cy - sin * dx + cos * dy;
        sample_bilinear_u8(src, sx, sy)
    })
}
