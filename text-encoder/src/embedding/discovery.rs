//! Model cache discovery
//!
//! Decides where downloaded model weights live.

use std::path::{Path, PathBuf};

/// Fallback cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = ".fastembed_cache";

/// Find the model cache directory with priority:
/// 1. Explicit path from the encoder config
/// 2. TEXT_ENCODER_MODELS_PATH environment variable
/// 3. FASTEMBED_CACHE_PATH environment variable
/// 4. User home directory (~/.text-encoder/models)
/// 5. `.fastembed_cache` in the working directory
pub fn resolve_cache_dir(explicit: Option<&Path>) -> PathBuf {
    // Priority 1: config
    if let Some(path) = explicit {
        log::info!("Using configured model cache: {}", path.display());
        return path.to_path_buf();
    }

    // Priority 2/3: environment
    for var in ["TEXT_ENCODER_MODELS_PATH", "FASTEMBED_CACHE_PATH"] {
        if let Ok(value) = std::env::var(var) {
            if value.trim().is_empty() {
                log::warn!("{} is set but empty, ignoring", var);
                continue;
            }
            log::info!("Using {}: {}", var, value);
            return PathBuf::from(value);
        }
    }

    // Priority 4: user home directory
    if let Some(home) = home_cache_dir() {
        log::info!("Using user model cache: {}", home.display());
        return home;
    }

    log::warn!(
        "Cannot determine home directory, caching models in {}",
        DEFAULT_CACHE_DIR
    );
    PathBuf::from(DEFAULT_CACHE_DIR)
}

fn home_cache_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".text-encoder").join("models"))
}
