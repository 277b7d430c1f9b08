//! Text Encoder
//!
//! Wraps a pretrained embedding model from the Hugging Face hub and exposes
//! it as a document-pipeline executor: documents with text in, one
//! fixed-size embedding per document out.
//!
//! ## Features
//!
//! - **Traversal paths** - Select root, chunk or match levels of nested documents
//! - **Batching** - Order-preserving batches with per-call size overrides
//! - **Pluggable models** - Any [`TextModel`]; [`HubModel`] runs fastembed/ONNX
//!
//! ## Example
//!
//! ```ignore
//! use text_encoder::{Document, DocumentArray, EncodeParameters, EncoderConfig, TextEncoder};
//!
//! let encoder = TextEncoder::new(EncoderConfig::default())?;
//!
//! let mut docs: DocumentArray = vec![Document::with_text("hello world")].into();
//! encoder.encode(&mut docs, &EncodeParameters::default())?;
//!
//! assert_eq!(docs.as_slice()[0].embedding.as_ref().unwrap().len(), 1024);
//! ```

pub mod config;
pub mod document;
pub mod embedding;
pub mod encoder;
pub mod error;
pub mod params;
pub mod traversal;

// Re-exports for convenience
pub use config::{EncoderConfig, DEFAULT_BATCH_SIZE};
pub use document::{Document, DocumentArray};
pub use embedding::{Features, HubModel, LoadOptions, ModelName, TextModel};
pub use encoder::TextEncoder;
pub use error::{EncoderError, Result};
pub use params::EncodeParameters;
pub use traversal::{DocAddress, Edge, TraversalPath, TraversalPaths};
