//! Whole-image lens undistortion.

use crate::camera::{CameraModel, CameraModelError};
use crate::image::{sample_bilinear_u8, GrayImage, GrayImageView};

/// Errors raised by [`undistort_image`].
#[derive(thiserror::Error, Debug)]
pub enum UndistortError {
    #[error("input image is empty")]
    EmptyImage,
    #[error(transparent)]
    Camera(#[from] CameraModelError),
}

/// Remove lens distortion from `src`, producing an image of the same size.
///
/// Each output pixel is filled by mapping its undistorted position through
/// the distortion model and bilinearly sampling the raw image at the spot
/// where that ray actually hit the sensor. Samples falling outside the raw
/// image read as 0. Pure function of its inputs; no caching.
pub fn undistort_image(
    src: &GrayImageView<'_>,
    camera: &CameraModel,
) -> Result<GrayImage, UndistortError> {
    if src.is_empty() {
        return Err(UndistortError::EmptyImage);
    }
    camera.validate()?;

    let mut out = GrayImage::new(src.width, src.height);
    for y in 0..src.height {
        let row = &mut out.data[y * src.width..(y + 1) * src.width];
        for (x, px) in row.iter_mut().enumerate() {
            let raw = camera.distort_pixel([x as f64, y as f64]);
            *px = sample_bilinear_u8(src, raw[0] as f32, raw[1] as f32);
        }
    }
    Ok(out)
}
