//! Text encoder executor
//!
//! Selects documents by traversal path, batches their text through a
//! [`TextModel`] and writes the pooled vector back onto each document.

use crate::config::EncoderConfig;
use crate::document::{Document, DocumentArray};
use crate::embedding::{Features, HubModel, LoadOptions, TextModel};
use crate::error::{EncoderError, Result};
use crate::params::EncodeParameters;
use crate::traversal::DocAddress;

/// Embeds document text with a pretrained model
///
/// The model is loaded once at construction and shared read-only by every
/// [`TextEncoder::encode`] call. Nothing else persists between calls.
pub struct TextEncoder<M = HubModel> {
    model: M,
    config: EncoderConfig,
}

impl TextEncoder<HubModel> {
    /// Load the configured hub model
    ///
    /// # Errors
    /// Returns `Config` for invalid settings and `Model` if the model
    /// cannot be loaded. Neither is retried.
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        let options = LoadOptions {
            cache_dir: config.resolved_cache_dir(),
            show_download_progress: config.show_download_progress,
            on_gpu: config.on_gpu,
        };
        let model = HubModel::load(config.model_name, &options)?;
        Ok(Self { model, config })
    }
}

impl<M: TextModel> TextEncoder<M> {
    /// Wrap an already-loaded model
    pub fn with_model(model: M, config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        log::info!(
            "TextEncoder ready ({}, {}d, batch {}, paths {})",
            model.name(),
            model.dimension(),
            config.default_batch_size,
            config.default_traversal_paths
        );
        Ok(Self { model, config })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Output dimensionality of every embedding this encoder writes
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// Embed every selected document with text, in place
    ///
    /// Documents are flattened along the effective traversal paths, those
    /// without text are skipped, and the rest go to the model in
    /// consecutive batches. A failing batch aborts the call: earlier
    /// batches keep their embeddings, later documents are left untouched.
    pub fn encode(&self, docs: &mut DocumentArray, params: &EncodeParameters) -> Result<()> {
        if docs.is_empty() {
            return Ok(());
        }

        let batch_size = params.batch_size.unwrap_or(self.config.default_batch_size);
        if batch_size == 0 {
            return Err(EncoderError::invalid_parameter("batch_size must be positive"));
        }
        let paths = params
            .traversal_paths
            .as_ref()
            .unwrap_or(&self.config.default_traversal_paths);

        let targets: Vec<DocAddress> = paths
            .locate(docs)
            .into_iter()
            .filter(|addr| docs.get_at(addr).and_then(Document::text_to_embed).is_some())
            .collect();

        log::debug!(
            "Encoding {} documents along {} in batches of {}",
            targets.len(),
            paths,
            batch_size
        );

        for (index, batch) in targets.chunks(batch_size).enumerate() {
            let texts: Vec<&str> = batch
                .iter()
                .filter_map(|addr| docs.get_at(addr).and_then(Document::text_to_embed))
                .collect();

            let features = self.model.get_embedding(&texts, self.config.on_gpu)?;
            self.check_batch(&features, batch.len())?;

            for (addr, feature) in batch.iter().zip(features) {
                if let Some(doc) = docs.get_at_mut(addr) {
                    doc.embedding = Some(feature.pooled);
                }
            }
            log::debug!("Batch {} done ({} documents)", index, batch.len());
        }

        Ok(())
    }

    fn check_batch(&self, features: &[Features], expected: usize) -> Result<()> {
        if features.len() != expected {
            return Err(EncoderError::embedding(format!(
                "{} returned {} vectors for {} texts",
                self.model.name(),
                features.len(),
                expected
            )));
        }
        let dimension = self.model.dimension();
        if let Some(bad) = features.iter().find(|f| f.pooled.len() != dimension) {
            return Err(EncoderError::embedding(format!(
                "{} returned a {}d vector, expected {}d",
                self.model.name(),
                bad.pooled.len(),
                dimension
            )));
        }
        Ok(())
    }
}
