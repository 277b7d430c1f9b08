//! Encoder configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::embedding::{resolve_cache_dir, ModelName};
use crate::error::{EncoderError, Result};
use crate::traversal::TraversalPaths;

/// Default number of documents per model call
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Construction-time settings of a [`crate::TextEncoder`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Which pretrained model to load
    pub model_name: ModelName,
    /// Run the model on the GPU
    pub on_gpu: bool,
    /// Batch size used when a call does not override it
    pub default_batch_size: usize,
    /// Traversal paths used when a call does not override them
    pub default_traversal_paths: TraversalPaths,
    /// Model weight cache (discovered when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Show a progress bar while downloading weights
    pub show_download_progress: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model_name: ModelName::default(),
            on_gpu: false,
            default_batch_size: DEFAULT_BATCH_SIZE,
            default_traversal_paths: TraversalPaths::default(),
            cache_dir: None,
            show_download_progress: false,
        }
    }
}

impl EncoderConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        log::debug!("Loaded encoder config from {}", path.display());
        Ok(config)
    }

    /// Reject settings the encoder cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.default_batch_size == 0 {
            return Err(EncoderError::config("default_batch_size must be positive"));
        }
        Ok(())
    }

    /// Effective model cache directory
    pub fn resolved_cache_dir(&self) -> PathBuf {
        resolve_cache_dir(self.cache_dir.as_deref())
    }

    pub fn with_model(mut self, model_name: ModelName) -> Self {
        self.model_name = model_name;
        self
    }

    pub fn with_gpu(mut self, on_gpu: bool) -> Self {
        self.on_gpu = on_gpu;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.default_batch_size = batch_size;
        self
    }

    pub fn with_traversal_paths(mut self, paths: TraversalPaths) -> Self {
        self.default_traversal_paths = paths;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.model_name, ModelName::BgeLargeEnV15);
        assert!(!config.on_gpu);
        assert_eq!(config.default_batch_size, 32);
        assert_eq!(config.default_traversal_paths.to_string(), "r");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"model_name": "bge-small-en-v1.5", "default_traversal_paths": ["r", "c"]}}"#
        )
        .unwrap();

        let config = EncoderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model_name, ModelName::BgeSmallEnV15);
        assert_eq!(config.default_traversal_paths.to_string(), "r,c");
        assert_eq!(config.default_batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_batch_size": 0}}"#).unwrap();

        let err = EncoderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EncoderError::Config(_)));
    }

    #[test]
    fn test_unknown_model_in_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"model_name": "ernie_tiny"}}"#).unwrap();

        let err = EncoderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EncoderError::Json(_)));
    }

    #[test]
    fn test_bad_traversal_path_in_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_traversal_paths": "rz"}}"#).unwrap();

        let err = EncoderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EncoderError::Json(_)));
    }

    #[test]
    fn test_explicit_cache_dir_is_used() {
        let config = EncoderConfig::default().with_cache_dir("/opt/models");
        assert_eq!(config.resolved_cache_dir(), PathBuf::from("/opt/models"));
    }
}
