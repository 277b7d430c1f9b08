//! Embedding module
//!
//! Model abstraction plus the fastembed-backed hub implementation.

mod discovery;
mod hub;
mod model;

pub use discovery::{resolve_cache_dir, DEFAULT_CACHE_DIR};
pub use hub::{HubModel, LoadOptions};
pub use model::{Features, ModelName, TextModel};
