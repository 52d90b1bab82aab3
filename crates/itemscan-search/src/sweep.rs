//! The parallel scale/rotation sweep.
//!
//! Every (template, width, angle) attempt is independent, so attempts fan
//! out across the rayon pool. Each attempt produces its own detection list
//! and the lists are concatenated in grid order (scale-major, then angle),
//! never merged through shared counters, which keeps the greedy dedup input
//! and therefore the final counts deterministic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use itemscan_core::GrayImageView;
use log::debug;
use rayon::prelude::*;

use crate::collect::{collect_detections, Detection};
use crate::dedup::DedupStrategy;
use crate::ncc::{score, ScenePlan};
use crate::params::{ParamsError, SearchParams};
use crate::rank::{MatchResult, TemplateCount};
use crate::template::Template;
use crate::transform::{make_variant, variant_grid};

/// Cooperative cancellation flag, checked before each scoring attempt.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Errors raised by the sweep.
#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("sweep cancelled")]
    Cancelled,
    #[error(transparent)]
    Params(#[from] ParamsError),
}

/// Count de-duplicated matches of one template against a prepared scene.
///
/// Detections from all variants are concatenated in grid order before
/// de-duplication. Variants larger than the scene are skipped and
/// contribute nothing.
pub fn count_template_matches(
    plan: &ScenePlan<'_>,
    template: &Template,
    params: &SearchParams,
    dedup: &dyn DedupStrategy,
    cancel: &CancelToken,
) -> Result<usize, SweepError> {
    params.validate()?;
    let grid = variant_grid(params);
    let source = template.image();

    let per_variant: Result<Vec<Vec<Detection>>, SweepError> = grid
        .par_iter()
        .map(|&spec| {
            if cancel.is_cancelled() {
                return Err(SweepError::Cancelled);
            }
            let variant = make_variant(&source, spec);
            match score(plan, &variant.image.as_view()) {
                Some(surface) => Ok(collect_detections(&surface, params.match_threshold)),
                None => {
                    debug!(
                        "template '{}': variant {}x{} at {} deg exceeds the scene, skipped",
                        template.name(),
                        variant.image.width,
                        variant.image.height,
                        spec.angle_deg
                    );
                    Ok(Vec::new())
                }
            }
        })
        .collect();

    let merged: Vec<Detection> = per_variant?.into_iter().flatten().collect();
    Ok(dedup.deduplicate(&merged).len())
}

/// Run the sweep for every template and return counts in catalog order.
///
/// Templates are processed in order; the variants of each template run in
/// parallel. Counts are accumulated into a fresh [`MatchResult`] value, so
/// back-to-back passes never contaminate each other.
pub fn sweep_templates(
    scene: &GrayImageView<'_>,
    templates: &[Template],
    params: &SearchParams,
    dedup: &dyn DedupStrategy,
    cancel: &CancelToken,
) -> Result<MatchResult, SweepError> {
    params.validate()?;
    let plan = ScenePlan::new(*scene);

    let counts = templates
        .iter()
        .map(|template| {
            count_template_matches(&plan, template, params, dedup, cancel).map(|count| {
                debug!("template '{}': {count} match(es)", template.name());
                TemplateCount {
                    name: template.name().to_string(),
                    count,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MatchResult { counts })
}
