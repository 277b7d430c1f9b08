//! Text Encoder CLI Entry Point
//!
//! Subcommands:
//! - encode: embed documents read from a file or stdin
//! - models: list supported pretrained models
//! - fetch: download a model into the local cache

use clap::Parser;
use text_encoder_cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for documents
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_encoder=info,text_encoder_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = text_encoder_cli::run(cli) {
        tracing::error!("text-encoder failed: {}", e);
        std::process::exit(1);
    }
}
