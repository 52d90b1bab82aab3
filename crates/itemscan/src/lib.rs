//! High-level facade for template-based item recognition.
//!
//! Given a scene image, an optional camera model, and a catalog of named
//! grayscale templates, the pipeline undistorts the scene, sweeps every
//! template over a grid of scales and rotations with normalized
//! cross-correlation, de-duplicates nearby hits, and reports which template
//! matched most often.
//!
//! ## Quickstart
//!
//! ```no_run
//! use itemscan::{recognize, CancelToken, SearchParams, TemplateCatalog};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = TemplateCatalog::load_dir("templates", false)?;
//! let scene = image::ImageReader::open("scene.png")?.decode()?.to_luma8();
//!
//! let outcome = recognize(
//!     &itemscan::gray_view(&scene),
//!     None,
//!     &catalog,
//!     &SearchParams::default(),
//!     &CancelToken::new(),
//! )?;
//! println!("best match: {} ({}x)", outcome.best.name, outcome.best.count);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `itemscan::core` (re-export of `itemscan-core`): image buffers,
//!   camera model, undistortion.
//! - `itemscan::search` (re-export of `itemscan-search`): the sweep,
//!   scoring, de-duplication, and ranking building blocks.
//! - [`TemplateCatalog`]: template decoding and catalog loading.
//! - [`recognize`]: the end-to-end pipeline.
//! - [`io`]: JSON config and report helpers for the example binary.

pub use itemscan_core as core;
pub use itemscan_search as search;

mod catalog;
pub mod io;
mod pipeline;

pub use catalog::{CatalogError, TemplateCatalog};
pub use pipeline::{gray_view, recognize, RecognizeError, Recognition};

pub use itemscan_core::{CameraIntrinsics, CameraModel, RadialTangentialDistortion};
pub use itemscan_search::{
    CancelToken, ClassificationResult, MatchResult, SearchParams, Template,
};
