//! Text Encoder CLI Library
//!
//! Plays the pipeline's role around [`text_encoder::TextEncoder`]: reads a
//! document collection, encodes it and writes it back out.

pub mod args;
pub mod commands;
pub mod error;
pub mod fetch;
pub mod io;

pub use args::Cli;
pub use commands::run;
pub use error::CliError;
