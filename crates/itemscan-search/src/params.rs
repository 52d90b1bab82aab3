use serde::{Deserialize, Serialize};

/// Errors raised by [`SearchParams::validate`].
#[derive(thiserror::Error, Debug)]
pub enum ParamsError {
    #[error("scale range must satisfy 0 < min <= max, got {min}..={max}")]
    InvalidScaleRange { min: u32, max: u32 },
    #[error("scale step must be positive")]
    InvalidScaleStep,
    #[error("angle step must be positive")]
    InvalidAngleStep,
    #[error("match threshold must be in (0, 1], got {got}")]
    InvalidThreshold { got: f32 },
    #[error("dedup radius must be positive, got {got}")]
    InvalidDedupRadius { got: f32 },
}

/// Settings for the scale/rotation sweep.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchParams {
    /// Smallest variant width in pixels.
    pub scale_min: u32,
    /// Largest variant width in pixels (inclusive).
    pub scale_max: u32,
    /// Width increment between variants.
    pub scale_step: u32,
    /// Rotation increment in degrees. The grid covers 0..=360 with both
    /// endpoints included, so the identity pose is evaluated twice per
    /// width; de-duplication absorbs the repeat.
    pub angle_step_deg: u32,
    /// Minimum correlation for a position to count as a detection.
    pub match_threshold: f32,
    /// Detections closer than this many pixels collapse into one match.
    pub dedup_radius: f32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            scale_min: 20,
            scale_max: 100,
            scale_step: 5,
            angle_step_deg: 45,
            match_threshold: 0.8,
            dedup_radius: 10.0,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.scale_min == 0 || self.scale_min > self.scale_max {
            return Err(ParamsError::InvalidScaleRange {
                min: self.scale_min,
                max: self.scale_max,
            });
        }
        if self.scale_step == 0 {
            return Err(ParamsError::InvalidScaleStep);
        }
        if self.angle_step_deg == 0 {
            return Err(ParamsError::InvalidAngleStep);
        }
        if !(self.match_threshold > 0.0 && self.match_threshold <= 1.0) {
            return Err(ParamsError::InvalidThreshold {
                got: self.match_threshold,
            });
        }
        if !(self.dedup_radius > 0.0) {
            return Err(ParamsError::InvalidDedupRadius {
                got: self.dedup_radius,
            });
        }
        Ok(())
    }
}
