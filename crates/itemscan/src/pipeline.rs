//! The end-to-end recognition pipeline.

use itemscan_core::{undistort_image, CameraModel, GrayImageView, UndistortError};
use itemscan_search::{
    sweep_templates, CancelToken, ClassificationResult, GreedyDedup, MatchResult, SearchParams,
    SweepError,
};
use log::info;

/// Errors raised by [`recognize`].
#[derive(thiserror::Error, Debug)]
pub enum RecognizeError {
    #[error("template catalog has no usable templates")]
    NoUsableTemplates,
    #[error("scene image is empty")]
    EmptyScene,
    #[error(transparent)]
    Undistort(#[from] UndistortError),
    #[error(transparent)]
    Sweep(#[from] SweepError),
}

/// Outcome of one recognition pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recognition {
    /// Per-template de-duplicated counts, in catalog order.
    pub matches: MatchResult,
    /// The winning (template, count) pair.
    pub best: ClassificationResult,
}

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Classify which catalog template appears in `scene`, and how many times.
///
/// When `camera` is provided the scene is undistorted before matching.
/// Precondition failures (empty scene, invalid camera model, empty catalog,
/// invalid params) surface before any correlation work starts. The sweep
/// itself runs each (template, scale, angle) attempt in parallel and merges
/// results deterministically, so repeated calls on the same inputs return
/// the same value.
pub fn recognize(
    scene: &GrayImageView<'_>,
    camera: Option<&CameraModel>,
    catalog: &crate::TemplateCatalog,
    params: &SearchParams,
    cancel: &CancelToken,
) -> Result<Recognition, RecognizeError> {
    if scene.is_empty() {
        return Err(RecognizeError::EmptyScene);
    }
    if catalog.is_empty() {
        return Err(RecognizeError::NoUsableTemplates);
    }

    let corrected = match camera {
        Some(camera) => Some(undistort_image(scene, camera)?),
        None => None,
    };
    let target = corrected.as_ref().map(|img| img.as_view()).unwrap_or(*scene);

    let dedup = GreedyDedup {
        radius: params.dedup_radius,
    };
    let matches = sweep_templates(&target, catalog.templates(), params, &dedup, cancel)?;
    let best = matches
        .select_best()
        .ok_or(RecognizeError::NoUsableTemplates)?;

    info!(
        "recognized '{}' with {} match(es) across {} template(s)",
        best.name,
        best.count,
        catalog.len()
    );
    Ok(Recognition { matches, best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TemplateCatalog;
    use itemscan_core::GrayImage;
    use itemscan_search::Template;

    #[test]
    fn empty_catalog_is_reported_explicitly() {
        let scene = GrayImage::new(32, 32);
        let err = recognize(
            &scene.as_view(),
            None,
            &TemplateCatalog::default(),
            &SearchParams::default(),
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RecognizeError::NoUsableTemplates));
    }

    #[test]
    fn empty_scene_is_rejected_before_matching() {
        let catalog = TemplateCatalog::from_templates(vec![Template::new(
            "bolt",
            GrayImage::from_fn(8, 8, |x, _| x as u8),
        )
        .unwrap()]);
        let scene = GrayImage::new(0, 0);
        let err = recognize(
            &scene.as_view(),
            None,
            &catalog,
            &SearchParams::default(),
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RecognizeError::EmptyScene));
    }

    #[test]
    fn invalid_camera_model_aborts_before_the_sweep() {
        let catalog = TemplateCatalog::from_templates(vec![Template::new(
            "bolt",
            GrayImage::from_fn(8, 8, |x, _| x as u8),
        )
        .unwrap()]);
        let scene = GrayImage::from_fn(32, 32, |x, y| (x + y) as u8);
        let camera = CameraModel {
            intrinsics: itemscan_core::CameraIntrinsics {
                fx: 0.0,
                fy: 0.0,
                cx: 16.0,
                cy: 16.0,
            },
            distortion: itemscan_core::RadialTangentialDistortion::default(),
        };
        let err = recognize(
            &scene.as_view(),
            Some(&camera),
            &catalog,
            &SearchParams::default(),
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RecognizeError::Undistort(_)));
    }
}
