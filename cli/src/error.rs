//! Error types for the text-encoder CLI.

use text_encoder::EncoderError;
use thiserror::Error;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input at line {line}: {message}")]
    InvalidInput { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
