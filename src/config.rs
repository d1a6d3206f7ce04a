//! Construction-time settings for the normalizers.
//!
//! Every struct here deserializes with missing fields filled from `Default`,
//! so a config file only has to name what it changes.

use crate::error::{PreprocessError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at the directory holding the n-gram tables.
pub const NGRAM_DIR_ENV: &str = "LATIN_PREPROCESS_NGRAMS";

/// Fallback n-gram directory, relative to the working directory.
pub const DEFAULT_NGRAM_DIR: &str = "data/ngrams";

/// Which implementation of the rule engines to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Table-driven reference implementation.
    Baseline,
    /// Straight-line implementation with the same outputs.
    #[default]
    Tuned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvConfig {
    /// Characters shown on each side of a change in detailed mode.
    pub context_window: usize,
    pub backend: Backend,
}

impl Default for UvConfig {
    fn default() -> Self {
        Self {
            context_window: 3,
            backend: Backend::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongSConfig {
    /// Pass 2 fires only when the s-form is this many times more frequent.
    pub threshold: f64,
    pub apply_pass2: bool,
    pub backend: Backend,
}

impl Default for LongSConfig {
    fn default() -> Self {
        Self {
            threshold: 2.0,
            apply_pass2: true,
            backend: Backend::default(),
        }
    }
}

impl LongSConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(PreprocessError::Configuration(format!(
                "pass 2 threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    pub long_s: bool,
    pub uv: bool,
    pub long_s_settings: LongSConfig,
    pub uv_settings: UvConfig,
    pub ngram_dir: Option<PathBuf>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            long_s: true,
            uv: true,
            long_s_settings: LongSConfig::default(),
            uv_settings: UvConfig::default(),
            ngram_dir: None,
        }
    }
}

impl PreprocessorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PreprocessError::Configuration(format!("invalid preprocessor config: {}", e)))?;
        config.long_s_settings.validate()?;
        Ok(config)
    }
}

/// Resolve the n-gram directory: explicit path, then environment, then default.
pub fn resolve_ngram_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    if let Ok(dir) = std::env::var(NGRAM_DIR_ENV) {
        let path = PathBuf::from(dir);
        if !path.is_dir() {
            log::warn!("{} points to a missing directory: {}", NGRAM_DIR_ENV, path.display());
        }
        return path;
    }
    PathBuf::from(DEFAULT_NGRAM_DIR)
}
