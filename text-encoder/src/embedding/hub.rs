//! Hub-backed pretrained models
//!
//! Wraps fastembed, which fetches ONNX weights and tokenizers from the
//! Hugging Face hub on first use and runs them through ONNX Runtime.

use std::path::PathBuf;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};

use super::model::{Features, ModelName, TextModel};
use crate::error::{EncoderError, Result};

/// Options for [`HubModel::load`]
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Where weights are downloaded and cached
    pub cache_dir: PathBuf,
    /// Show a progress bar while downloading
    pub show_download_progress: bool,
    /// Run on the GPU
    pub on_gpu: bool,
}

fn fastembed_variant(name: ModelName) -> EmbeddingModel {
    match name {
        ModelName::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
        ModelName::ParaphraseMultilingualMiniLmL12V2 => EmbeddingModel::ParaphraseMLMiniLML12V2,
        ModelName::BgeSmallEnV15 => EmbeddingModel::BGESmallENV15,
        ModelName::BgeBaseEnV15 => EmbeddingModel::BGEBaseENV15,
        ModelName::BgeLargeEnV15 => EmbeddingModel::BGELargeENV15,
        ModelName::MultilingualE5Small => EmbeddingModel::MultilingualE5Small,
        ModelName::MultilingualE5Base => EmbeddingModel::MultilingualE5Base,
        ModelName::MultilingualE5Large => EmbeddingModel::MultilingualE5Large,
        ModelName::NomicEmbedTextV15 => EmbeddingModel::NomicEmbedTextV15,
        ModelName::MxbaiEmbedLargeV1 => EmbeddingModel::MxbaiEmbedLargeV1,
    }
}

/// Pretrained embedding model loaded from the hub
///
/// fastembed exposes pooled sentence vectors only, so every returned
/// [`Features::sequence`] is empty. The ONNX session runs on CPU.
pub struct HubModel {
    model: TextEmbedding,
    name: ModelName,
}

impl HubModel {
    /// Load (downloading if needed) the named model
    pub fn load(name: ModelName, options: &LoadOptions) -> Result<Self> {
        if options.on_gpu {
            return Err(EncoderError::model(format!(
                "GPU execution requested for {} but only the CPU runtime is available",
                name
            )));
        }

        std::fs::create_dir_all(&options.cache_dir)?;
        log::info!(
            "Loading {} (cache: {})",
            name,
            options.cache_dir.display()
        );

        let mut init = InitOptions::new(fastembed_variant(name));
        init.cache_dir = options.cache_dir.clone();
        init.show_download_progress = options.show_download_progress;

        let model = TextEmbedding::try_new(init)
            .map_err(|e| EncoderError::model(format!("Failed to load {}: {}", name, e)))?;

        log::info!("Loaded {} ({}d)", name, name.dimension());

        Ok(Self { model, name })
    }
}

impl TextModel for HubModel {
    fn name(&self) -> &str {
        self.name.hub_id()
    }

    fn dimension(&self) -> usize {
        self.name.dimension()
    }

    fn get_embedding(&self, texts: &[&str], use_gpu: bool) -> Result<Vec<Features>> {
        if use_gpu {
            return Err(EncoderError::embedding(
                "device unavailable: GPU execution is not supported by the CPU runtime",
            ));
        }
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let vectors = self
            .model
            .embed(texts.to_vec(), Some(texts.len()))
            .map_err(|e| EncoderError::embedding(format!("Failed to encode texts: {}", e)))?;

        Ok(vectors.into_iter().map(Features::pooled).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_load_is_rejected_before_download() {
        let options = LoadOptions {
            cache_dir: std::env::temp_dir().join("text-encoder-gpu-test"),
            show_download_progress: false,
            on_gpu: true,
        };
        match HubModel::load(ModelName::BgeSmallEnV15, &options) {
            Err(EncoderError::Model(msg)) => assert!(msg.contains("GPU")),
            Err(other) => panic!("expected model error, got {other}"),
            Ok(_) => panic!("GPU load should fail"),
        }
    }

    #[test]
    #[ignore = "downloads model weights from the hub"]
    fn test_hub_model_embeds_hello_world() {
        let options = LoadOptions {
            cache_dir: crate::embedding::resolve_cache_dir(None),
            show_download_progress: false,
            on_gpu: false,
        };
        let model = HubModel::load(ModelName::BgeLargeEnV15, &options).unwrap();
        let features = model.get_embedding(&["hello world"], false).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].pooled.len(), 1024);
        assert!(features[0].pooled.iter().any(|v| *v != 0.0));
    }
}
