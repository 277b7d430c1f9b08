//! Error types for text-encoder

use thiserror::Error;

/// Errors that can occur while loading a model or encoding documents
#[derive(Debug, Error)]
pub enum EncoderError {
    /// Model loading error (fatal at construction)
    #[error("Model error: {0}")]
    Model(String),

    /// Embedding call failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Invalid construction-time configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid call-time parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed traversal path selector
    #[error("Invalid traversal path: {0}")]
    InvalidPath(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncoderError {
    /// Create a model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create an embedding error
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Create an invalid traversal path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }
}

/// Result type for encoder operations
pub type Result<T> = std::result::Result<T, EncoderError>;
