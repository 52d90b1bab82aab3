//! Pinhole intrinsics and Brown-Conrady radial-tangential distortion.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Errors raised while building or validating a camera model.
#[derive(thiserror::Error, Debug)]
pub enum CameraModelError {
    #[error("intrinsic matrix must have 9 row-major elements, got {got}")]
    IntrinsicMatrixLen { got: usize },
    #[error("distortion vector must have 5 coefficients, got {got}")]
    DistortionLen { got: usize },
    #[error("focal lengths must be finite and non-zero (fx={fx}, fy={fy})")]
    InvalidFocalLength { fx: f64, fy: f64 },
    #[error("principal point must be finite (cx={cx}, cy={cy})")]
    InvalidPrincipalPoint { cx: f64, cy: f64 },
    #[error("distortion coefficients must be finite")]
    NonFiniteDistortion,
}

/// Pinhole camera intrinsics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length in x (pixels).
    pub fx: f64,
    /// Focal length in y (pixels).
    pub fy: f64,
    /// Principal point x (pixels).
    pub cx: f64,
    /// Principal point y (pixels).
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Read focal lengths and principal point from a 3x3 intrinsic matrix.
    pub fn from_matrix(k: &Matrix3<f64>) -> Result<Self, CameraModelError> {
        let out = Self {
            fx: k[(0, 0)],
            fy: k[(1, 1)],
            cx: k[(0, 2)],
            cy: k[(1, 2)],
        };
        out.validate()?;
        Ok(out)
    }

    /// Build intrinsics from a row-major 9-element slice.
    pub fn from_slice(k: &[f64]) -> Result<Self, CameraModelError> {
        if k.len() != 9 {
            return Err(CameraModelError::IntrinsicMatrixLen { got: k.len() });
        }
        Self::from_matrix(&Matrix3::from_row_slice(k))
    }

    pub fn validate(&self) -> Result<(), CameraModelError> {
        if !self.fx.is_finite()
            || !self.fy.is_finite()
            || self.fx.abs() < 1e-12
            || self.fy.abs() < 1e-12
        {
            return Err(CameraModelError::InvalidFocalLength {
                fx: self.fx,
                fy: self.fy,
            });
        }
        if !self.cx.is_finite() || !self.cy.is_finite() {
            return Err(CameraModelError::InvalidPrincipalPoint {
                cx: self.cx,
                cy: self.cy,
            });
        }
        Ok(())
    }

    /// Convert pixel coordinates to normalized pinhole coordinates.
    #[inline]
    pub fn pixel_to_normalized(&self, pixel_xy: [f64; 2]) -> [f64; 2] {
        [
            (pixel_xy[0] - self.cx) / self.fx,
            (pixel_xy[1] - self.cy) / self.fy,
        ]
    }

    /// Convert normalized pinhole coordinates to pixel coordinates.
    #[inline]
    pub fn normalized_to_pixel(&self, normalized_xy: [f64; 2]) -> [f64; 2] {
        [
            self.fx * normalized_xy[0] + self.cx,
            self.fy * normalized_xy[1] + self.cy,
        ]
    }
}

/// Brown-Conrady radial-tangential distortion coefficients.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct RadialTangentialDistortion {
    /// Radial coefficient k1.
    pub k1: f64,
    /// Radial coefficient k2.
    pub k2: f64,
    /// Tangential coefficient p1.
    pub p1: f64,
    /// Tangential coefficient p2.
    pub p2: f64,
    /// Radial coefficient k3.
    pub k3: f64,
}

impl RadialTangentialDistortion {
    /// Build coefficients from a `[k1, k2, p1, p2, k3]` slice.
    pub fn from_slice(d: &[f64]) -> Result<Self, CameraModelError> {
        if d.len() != 5 {
            return Err(CameraModelError::DistortionLen { got: d.len() });
        }
        let out = Self {
            k1: d[0],
            k2: d[1],
            p1: d[2],
            p2: d[3],
            k3: d[4],
        };
        out.validate()?;
        Ok(out)
    }

    pub fn validate(&self) -> Result<(), CameraModelError> {
        let all_finite = self.k1.is_finite()
            && self.k2.is_finite()
            && self.p1.is_finite()
            && self.p2.is_finite()
            && self.k3.is_finite();
        if all_finite {
            Ok(())
        } else {
            Err(CameraModelError::NonFiniteDistortion)
        }
    }

    /// Apply distortion to normalized coordinates.
    pub fn distort_normalized(&self, normalized_xy: [f64; 2]) -> [f64; 2] {
        let x = normalized_xy[0];
        let y = normalized_xy[1];
        let r2 = x * x + y * y;
        let r4 = r2 * r2;
        let r6 = r4 * r2;
        let radial = 1.0 + self.k1 * r2 + self.k2 * r4 + self.k3 * r6;
        let x_tan = 2.0 * self.p1 * x * y + self.p2 * (r2 + 2.0 * x * x);
        let y_tan = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * x * y;
        [x * radial + x_tan, y * radial + y_tan]
    }
}

/// Complete camera model (intrinsics + radial-tangential distortion).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CameraModel {
    pub intrinsics: CameraIntrinsics,
    pub distortion: RadialTangentialDistortion,
}

impl CameraModel {
    pub fn new(
        intrinsics: CameraIntrinsics,
        distortion: RadialTangentialDistortion,
    ) -> Result<Self, CameraModelError> {
        intrinsics.validate()?;
        distortion.validate()?;
        Ok(Self {
            intrinsics,
            distortion,
        })
    }

    /// Build a model from a row-major 3x3 matrix and a 5-coefficient vector.
    pub fn from_slices(k: &[f64], d: &[f64]) -> Result<Self, CameraModelError> {
        Ok(Self {
            intrinsics: CameraIntrinsics::from_slice(k)?,
            distortion: RadialTangentialDistortion::from_slice(d)?,
        })
    }

    pub fn validate(&self) -> Result<(), CameraModelError> {
        self.intrinsics.validate()?;
        self.distortion.validate()
    }

    /// Map an undistorted pixel position to where it lands on the raw sensor.
    #[inline]
    pub fn distort_pixel(&self, undistorted_pixel_xy: [f64; 2]) -> [f64; 2] {
        let normalized = self.intrinsics.pixel_to_normalized(undistorted_pixel_xy);
        let distorted = self.distortion.distort_normalized(normalized);
        self.intrinsics.normalized_to_pixel(distorted)
    }
}
