//! Call-time parameters

use serde::{Deserialize, Serialize};

use crate::error::{EncoderError, Result};
use crate::traversal::TraversalPaths;

/// Per-call overrides for [`crate::TextEncoder::encode`]
///
/// Unset fields fall back to the encoder's configured defaults. Unknown
/// keys in the incoming parameter map are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncodeParameters {
    #[serde(default, alias = "traverse_paths", skip_serializing_if = "Option::is_none")]
    pub traversal_paths: Option<TraversalPaths>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
}

impl EncodeParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_traversal_paths(mut self, paths: TraversalPaths) -> Self {
        self.traversal_paths = Some(paths);
        self
    }

    /// Build from a JSON parameter map such as
    /// `{"traversal_paths": ["r"], "batch_size": 10}`
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(value).map_err(|e| EncoderError::invalid_parameter(e.to_string()))
    }
}
