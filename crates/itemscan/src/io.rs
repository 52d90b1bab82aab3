//! JSON configuration and report helpers for the recognition example.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use itemscan_core::{CameraModel, CameraModelError};
use itemscan_search::{ClassificationResult, MatchResult, SearchParams};

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Camera model as it appears in config files: a row-major 3x3 matrix and
/// the `[k1, k2, p1, p2, k3]` coefficient vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub matrix: [f64; 9],
    pub distortion: [f64; 5],
}

impl CameraConfig {
    pub fn build(&self) -> Result<CameraModel, CameraModelError> {
        CameraModel::from_slices(&self.matrix, &self.distortion)
    }
}

/// Configuration for the recognition example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeConfig {
    pub scene_path: String,
    pub templates_dir: String,
    #[serde(default)]
    pub strict_catalog: bool,
    #[serde(default)]
    pub camera: Option<CameraConfig>,
    #[serde(default)]
    pub params: Option<SearchParams>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl RecognizeConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Sweep parameters with config overrides applied.
    pub fn build_params(&self) -> SearchParams {
        self.params.clone().unwrap_or_default()
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("recognize_report.json"))
    }
}

/// Report written by the recognition example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeReport {
    pub scene_path: String,
    pub templates_dir: String,
    pub matches: MatchResult,
    #[serde(default)]
    pub best: Option<ClassificationResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RecognizeReport {
    pub fn new(cfg: &RecognizeConfig) -> Self {
        Self {
            scene_path: cfg.scene_path.clone(),
            templates_dir: cfg.templates_dir.clone(),
            matches: MatchResult::default(),
            best: None,
            error: None,
        }
    }

    pub fn set_recognition(&mut self, recognition: crate::Recognition) {
        self.matches = recognition.matches;
        self.best = Some(recognition.best);
        self.error = None;
    }

    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_json() {
        let cfg = RecognizeConfig {
            scene_path: "scene.png".into(),
            templates_dir: "templates".into(),
            strict_catalog: true,
            camera: Some(CameraConfig {
                matrix: [600.0, 0.0, 320.0, 0.0, 600.0, 240.0, 0.0, 0.0, 1.0],
                distortion: [-0.1, 0.02, 0.0, 0.0, 0.0],
            }),
            params: Some(SearchParams {
                scale_min: 30,
                ..SearchParams::default()
            }),
            output_path: None,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        cfg.write_json(&path).unwrap();
        let loaded = RecognizeConfig::load_json(&path).unwrap();

        assert_eq!(loaded.scene_path, cfg.scene_path);
        assert_eq!(loaded.build_params().scale_min, 30);
        assert!(loaded.camera.unwrap().build().is_ok());
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let loaded: RecognizeConfig = serde_json::from_str(
            r#"{"scene_path": "s.png", "templates_dir": "tpl"}"#,
        )
        .unwrap();
        assert!(!loaded.strict_catalog);
        assert!(loaded.camera.is_none());
        assert_eq!(loaded.build_params(), SearchParams::default());
        assert_eq!(loaded.output_path(), PathBuf::from("recognize_report.json"));
    }
}
