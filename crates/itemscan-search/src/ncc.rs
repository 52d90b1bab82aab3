//! Normalized cross-correlation scoring.
//!
//! The scorer implements the correlation-coefficient formulation: both the
//! variant and each scene window are zero-meaned before correlating, so the
//! response lands in [-1, 1] regardless of absolute brightness. Per-window
//! sums come from integral images built once per scene and shared by every
//! scoring attempt of a pass.

use itemscan_core::GrayImageView;
use rayon::prelude::*;

/// Per-scene tables shared by all scoring attempts of one pass.
pub struct ScenePlan<'a> {
    scene: GrayImageView<'a>,
    /// (w+1) x (h+1) summed-area table of pixel values.
    integral: Vec<u64>,
    /// (w+1) x (h+1) summed-area table of squared pixel values.
    integral_sq: Vec<u64>,
}

impl<'a> ScenePlan<'a> {
    pub fn new(scene: GrayImageView<'a>) -> Self {
        let w = scene.width;
        let h = scene.height;
        let stride = w + 1;
        let mut integral = vec![0u64; stride * (h + 1)];
        let mut integral_sq = vec![0u64; stride * (h + 1)];

        for y in 0..h {
            for x in 0..w {
                let v = scene.data[y * w + x] as u64;
                let idx = (y + 1) * stride + (x + 1);
                integral[idx] =
                    v + integral[idx - 1] + integral[idx - stride] - integral[idx - stride - 1];
                integral_sq[idx] = v * v + integral_sq[idx - 1] + integral_sq[idx - stride]
                    - integral_sq[idx - stride - 1];
            }
        }

        Self {
            scene,
            integral,
            integral_sq,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.scene.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.scene.height
    }

    #[inline]
    pub fn scene(&self) -> GrayImageView<'a> {
        self.scene
    }

    /// Sum and squared-sum of the `w x h` window anchored at (x, y).
    #[inline]
    fn window_sums(&self, x: usize, y: usize, w: usize, h: usize) -> (u64, u64) {
        let stride = self.scene.width + 1;
        let a = y * stride + x;
        let b = y * stride + (x + w);
        let c = (y + h) * stride + x;
        let d = (y + h) * stride + (x + w);
        (
            self.integral[d] + self.integral[a] - self.integral[b] - self.integral[c],
            self.integral_sq[d] + self.integral_sq[a] - self.integral_sq[b] - self.integral_sq[c],
        )
    }
}

/// Correlation scores of one variant slid across the scene.
///
/// `width x height` equals `(scene - variant + 1)` in each axis; position
/// (x, y) scores the window whose top-left corner is at (x, y).
#[derive(Clone, Debug)]
pub struct ResponseSurface {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl ResponseSurface {
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Largest score on the surface; -1.0 for an empty surface.
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(-1.0f32, f32::max)
    }
}

/// Score `variant` against the prepared scene.
///
/// Returns `None` when the variant exceeds the scene in either dimension
/// (degenerate attempt, contributes zero detections). Windows or variants
/// with zero intensity variance score 0.
pub fn score(plan: &ScenePlan<'_>, variant: &GrayImageView<'_>) -> Option<ResponseSurface> {
    let tw = variant.width;
    let th = variant.height;
    if tw == 0 || th == 0 || tw > plan.width() || th > plan.height() {
        return None;
    }

    let area = (tw * th) as f64;
    let sum: f64 = variant.data.iter().map(|&v| v as f64).sum();
    let mean = sum / area;

    let mut zero_mean = Vec::with_capacity(tw * th);
    let mut template_ssd = 0.0f64;
    for &v in variant.data {
        let d = v as f64 - mean;
        template_ssd += d * d;
        zero_mean.push(d);
    }

    let out_w = plan.width() - tw + 1;
    let out_h = plan.height() - th + 1;

    let rows: Vec<Vec<f32>> = (0..out_h)
        .into_par_iter()
        .map(|y| {
            (0..out_w)
                .map(|x| correlation_at(plan, &zero_mean, tw, th, template_ssd, x, y))
                .collect()
        })
        .collect();

    let mut data = Vec::with_capacity(out_w * out_h);
    for row in rows {
        data.extend(row);
    }

    Some(ResponseSurface {
        width: out_w,
        height: out_h,
        data,
    })
}

#[inline]
fn correlation_at(
    plan: &ScenePlan<'_>,
    zero_mean: &[f64],
    tw: usize,
    th: usize,
    template_ssd: f64,
    x: usize,
    y: usize,
) -> f32 {
    let (win_sum, win_sum_sq) = plan.window_sums(x, y, tw, th);
    let area = (tw * th) as f64;
    let window_ssd = win_sum_sq as f64 - (win_sum as f64) * (win_sum as f64) / area;

    let denominator = (template_ssd * window_ssd).sqrt();
    if !(denominator > f64::EPSILON) {
        return 0.0;
    }

    // sum(T' * I) == sum(T' * (I - mean(I))) because T' sums to zero
    let scene = plan.scene();
    let mut numerator = 0.0f64;
    for row in 0..th {
        let scene_off = (y + row) * scene.width + x;
        let tpl_off = row * tw;
        for col in 0..tw {
            numerator += zero_mean[tpl_off + col] * scene.data[scene_off + col] as f64;
        }
    }

    (numerator / denominator) as f32
}
