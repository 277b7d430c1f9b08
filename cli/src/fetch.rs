//! Model prefetch
//!
//! Loads the configured model once so its weights land in the local cache
//! before the encoder is used in a pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use text_encoder::{EncoderConfig, TextEncoder};

use crate::error::CliResult;

/// Make sure the configured model is in the cache, downloading if needed.
/// Returns the cache directory.
pub fn ensure_model_cached(config: &EncoderConfig) -> CliResult<PathBuf> {
    let cache_dir = config.resolved_cache_dir();
    let before = dir_size(&cache_dir);

    tracing::info!(
        "Fetching {} into {}...",
        config.model_name,
        cache_dir.display()
    );

    let encoder = TextEncoder::new(config.clone().with_cache_dir(&cache_dir))?;

    let after = dir_size(&cache_dir);
    let size_mb = after as f64 / (1024.0 * 1024.0);
    if after > before {
        let fetched_mb = (after - before) as f64 / (1024.0 * 1024.0);
        tracing::info!("  downloaded {fetched_mb:.1} MB");
    }
    tracing::info!(
        "{} ready ({}d), cache holds {size_mb:.1} MB",
        encoder.config().model_name,
        encoder.dimension()
    );

    Ok(cache_dir)
}

/// Total size in bytes of all files under `path` (0 if missing)
fn dir_size(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| match entry.file_type() {
            Ok(kind) if kind.is_dir() => dir_size(&entry.path()),
            Ok(_) => entry.metadata().map(|m| m.len()).unwrap_or(0),
            Err(_) => 0,
        })
        .sum()
}
