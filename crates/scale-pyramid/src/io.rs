//! JSON configuration and report helpers.

use std::{
    fs,
    path::{Path, PathBuf},
};

use scale_pyramid_core::TimingsMs;
use serde::{Deserialize, Serialize};

use crate::{PyramidError, PyramidParams, PyramidSummary};

fn default_patch_size() -> Option<usize> {
    Some(64)
}

/// Run configuration for the `scale-pyramid` tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidConfig {
    #[serde(default)]
    pub image_path: Option<String>,
    /// Square patch the input is resampled to first; `None` keeps the
    /// native resolution.
    #[serde(default = "default_patch_size")]
    pub patch_size: Option<usize>,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub params: PyramidParams,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            patch_size: default_patch_size(),
            output_path: None,
            params: PyramidParams::default(),
        }
    }
}

impl PyramidConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PyramidError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PyramidError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.output_path.as_ref().map(PathBuf::from)
    }
}

/// Outcome of one pyramid build, written as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidReport {
    pub image_path: String,
    pub patch_size: Option<usize>,
    pub params: PyramidParams,
    pub summary: PyramidSummary,
    #[serde(default)]
    pub timings_ms: TimingsMs,
}

impl PyramidReport {
    pub fn to_json(&self) -> Result<String, PyramidError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PyramidError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
