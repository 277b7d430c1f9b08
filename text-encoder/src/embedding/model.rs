//! Model interface
//!
//! The encoder talks to any pretrained model through [`TextModel`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EncoderError, Result};

/// Per-text model output
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Fixed-size sentence vector, used as the document embedding
    pub pooled: Vec<f32>,
    /// Per-token vectors (empty when the backend only exposes pooled output)
    pub sequence: Vec<Vec<f32>>,
}

impl Features {
    /// Features carrying only a pooled vector
    pub fn pooled(pooled: Vec<f32>) -> Self {
        Self {
            pooled,
            sequence: vec![],
        }
    }
}

/// A loaded embedding model
///
/// Implementations must return exactly one [`Features`] per input text, in
/// input order, with `pooled.len() == self.dimension()`.
pub trait TextModel: Send + Sync {
    /// Identifier of the loaded model
    fn name(&self) -> &str;

    /// Output dimensionality of the pooled vector
    fn dimension(&self) -> usize;

    /// Embed a batch of texts
    fn get_embedding(&self, texts: &[&str], use_gpu: bool) -> Result<Vec<Features>>;
}

impl<M: TextModel + ?Sized> TextModel for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn get_embedding(&self, texts: &[&str], use_gpu: bool) -> Result<Vec<Features>> {
        (**self).get_embedding(texts, use_gpu)
    }
}

impl<M: TextModel + ?Sized> TextModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn get_embedding(&self, texts: &[&str], use_gpu: bool) -> Result<Vec<Features>> {
        (**self).get_embedding(texts, use_gpu)
    }
}

/// Supported pretrained models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelName {
    AllMiniLmL6V2,
    ParaphraseMultilingualMiniLmL12V2,
    BgeSmallEnV15,
    BgeBaseEnV15,
    #[default]
    BgeLargeEnV15,
    MultilingualE5Small,
    MultilingualE5Base,
    MultilingualE5Large,
    NomicEmbedTextV15,
    MxbaiEmbedLargeV1,
}

impl ModelName {
    pub const ALL: [ModelName; 10] = [
        Self::AllMiniLmL6V2,
        Self::ParaphraseMultilingualMiniLmL12V2,
        Self::BgeSmallEnV15,
        Self::BgeBaseEnV15,
        Self::BgeLargeEnV15,
        Self::MultilingualE5Small,
        Self::MultilingualE5Base,
        Self::MultilingualE5Large,
        Self::NomicEmbedTextV15,
        Self::MxbaiEmbedLargeV1,
    ];

    /// Hugging Face repository id
    pub fn hub_id(&self) -> &'static str {
        match self {
            Self::AllMiniLmL6V2 => "sentence-transformers/all-MiniLM-L6-v2",
            Self::ParaphraseMultilingualMiniLmL12V2 => {
                "Xenova/paraphrase-multilingual-MiniLM-L12-v2"
            }
            Self::BgeSmallEnV15 => "BAAI/bge-small-en-v1.5",
            Self::BgeBaseEnV15 => "BAAI/bge-base-en-v1.5",
            Self::BgeLargeEnV15 => "BAAI/bge-large-en-v1.5",
            Self::MultilingualE5Small => "intfloat/multilingual-e5-small",
            Self::MultilingualE5Base => "intfloat/multilingual-e5-base",
            Self::MultilingualE5Large => "intfloat/multilingual-e5-large",
            Self::NomicEmbedTextV15 => "nomic-ai/nomic-embed-text-v1.5",
            Self::MxbaiEmbedLargeV1 => "mixedbread-ai/mxbai-embed-large-v1",
        }
    }

    /// Repository name without the owner, e.g. `bge-large-en-v1.5`
    pub fn short_name(&self) -> &'static str {
        let id = self.hub_id();
        id.rsplit('/').next().unwrap_or(id)
    }

    pub fn dimension(&self) -> usize {
        match self {
            Self::AllMiniLmL6V2
            | Self::ParaphraseMultilingualMiniLmL12V2
            | Self::BgeSmallEnV15
            | Self::MultilingualE5Small => 384,
            Self::BgeBaseEnV15 | Self::MultilingualE5Base | Self::NomicEmbedTextV15 => 768,
            Self::BgeLargeEnV15 | Self::MultilingualE5Large | Self::MxbaiEmbedLargeV1 => 1024,
        }
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hub_id())
    }
}

impl FromStr for ModelName {
    type Err = EncoderError;

    /// Accepts the hub id or the short name, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| {
                m.hub_id().eq_ignore_ascii_case(wanted) || m.short_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| EncoderError::config(format!("unsupported model: {wanted}")))
    }
}

impl Serialize for ModelName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hub_id())
    }
}

impl<'de> Deserialize<'de> for ModelName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
