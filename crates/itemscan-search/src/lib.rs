//! Brute-force scale/rotation template search.
//!
//! The sweep resizes and rotates each template over a fixed grid of widths
//! and angles, slides every variant across the scene with a normalized
//! cross-correlation scorer, collects above-threshold positions, collapses
//! spatially close hits, and ranks templates by their de-duplicated match
//! counts. Scoring attempts are independent and run in parallel; results
//! are merged in grid order so repeated runs are bit-identical.

mod collect;
mod dedup;
mod ncc;
mod params;
mod rank;
mod sweep;
mod template;
mod transform;

pub use collect::{collect_detections, Detection};
pub use dedup::{DedupStrategy, GreedyDedup, GridDedup};
pub use ncc::{score, ResponseSurface, ScenePlan};
pub use params::{ParamsError, SearchParams};
pub use rank::{ClassificationResult, MatchResult, TemplateCount};
pub use sweep::{count_template_matches, sweep_templates, CancelToken, SweepError};
pub use template::{Template, TemplateError};
pub use transform::{make_variant, variant_grid, variants, TransformVariant, VariantSpec};
