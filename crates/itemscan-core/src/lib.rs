//! Image and camera primitives for template-based item recognition.
//!
//! This crate is intentionally small. It does *not* depend on any image
//! codec; pixel data is exchanged as plain row-major `u8` grids, either
//! owned ([`GrayImage`]) or borrowed ([`GrayImageView`]).

mod camera;
mod image;
mod undistort;

pub use camera::{
    CameraIntrinsics, CameraModel, CameraModelError, RadialTangentialDistortion,
};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};
pub use undistort::{undistort_image, UndistortError};
