//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use text_encoder::{EncoderConfig, ModelName, TraversalPaths};

use crate::error::CliResult;
use crate::io::Format;

#[derive(Debug, Parser)]
#[command(name = "text-encoder")]
#[command(about = "Embed document text with a pretrained model")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read documents, attach embeddings, write them back out
    Encode(EncodeArgs),
    /// List supported models
    Models,
    /// Download a model into the local cache
    Fetch(ModelArgs),
}

/// Settings that select and load the model
#[derive(Debug, Clone, Default, Args)]
pub struct ModelArgs {
    /// JSON encoder config file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Model to load (hub id or short name)
    #[arg(long, short)]
    pub model: Option<ModelName>,

    /// Request GPU execution (unsupported: this build ships the CPU runtime only, so loading fails)
    #[arg(long)]
    pub gpu: bool,

    /// Model weight cache directory
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Show download progress
    #[arg(long)]
    pub progress: bool,
}

impl ModelArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> CliResult<EncoderConfig> {
        let mut config = match &self.config {
            Some(path) => EncoderConfig::from_file(path)?,
            None => EncoderConfig::default(),
        };
        if let Some(model) = self.model {
            config = config.with_model(model);
        }
        if self.gpu {
            config = config.with_gpu(true);
        }
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        if self.progress {
            config.show_download_progress = true;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Input file (stdin when omitted)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Document serialization
    #[arg(long, short, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Default batch size of the encoder
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Default traversal paths of the encoder, e.g. "r" or "r,c"
    #[arg(long)]
    pub traversal_paths: Option<TraversalPaths>,

    /// Call-time parameters as JSON, e.g. '{"batch_size": 10}'
    #[arg(long)]
    pub params: Option<String>,
}

impl EncodeArgs {
    pub fn load_config(&self) -> CliResult<EncoderConfig> {
        let mut config = self.model.load_config()?;
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if let Some(paths) = &self.traversal_paths {
            config = config.with_traversal_paths(paths.clone());
        }
        Ok(config)
    }
}
