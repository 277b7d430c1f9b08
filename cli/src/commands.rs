//! Subcommand implementations

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use text_encoder::{DocumentArray, EncodeParameters, ModelName, TextEncoder, TextModel};

use crate::args::{Cli, Command, EncodeArgs};
use crate::error::{CliError, CliResult};
use crate::fetch::ensure_model_cached;
use crate::io::{read_documents, write_documents, Format};

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Encode(args) => encode(&args),
        Command::Models => list_models(io::stdout().lock()),
        Command::Fetch(args) => {
            let config = args.load_config()?;
            let cache_dir = ensure_model_cached(&config)?;
            println!("{}", cache_dir.display());
            Ok(())
        }
    }
}

/// Parse the `--params` JSON object
pub fn parse_params(raw: Option<&str>) -> CliResult<EncodeParameters> {
    let Some(raw) = raw else {
        return Ok(EncodeParameters::default());
    };
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.is_object() && !value.is_null() {
        return Err(CliError::InvalidArgument(
            "--params must be a JSON object".to_string(),
        ));
    }
    Ok(EncodeParameters::from_json(&value)?)
}

fn encode(args: &EncodeArgs) -> CliResult<()> {
    let encoder = TextEncoder::new(args.load_config()?)?;
    encode_files(&encoder, args)?;
    Ok(())
}

/// Run `encode` with an already-built encoder.
///
/// The output is only opened once every document is read and encoded, so
/// `--input` and `--output` may name the same file and a failed run leaves
/// no output behind.
pub fn encode_files<M: TextModel>(encoder: &TextEncoder<M>, args: &EncodeArgs) -> CliResult<usize> {
    let params = parse_params(args.params.as_deref())?;

    let mut docs = match &args.input {
        Some(path) => read_documents(BufReader::new(File::open(path)?), args.format)?,
        None => read_documents(io::stdin().lock(), args.format)?,
    };
    let embedded = encode_documents(encoder, &mut docs, &params)?;

    match &args.output {
        Some(path) => write_documents(BufWriter::new(File::create(path)?), &docs, args.format)?,
        None => write_documents(BufWriter::new(io::stdout().lock()), &docs, args.format)?,
    }
    Ok(embedded)
}

/// Read documents, encode them, write them back; returns how many
/// documents received an embedding at the top level.
pub fn encode_stream<M, R, W>(
    encoder: &TextEncoder<M>,
    input: R,
    output: W,
    format: Format,
    params: &EncodeParameters,
) -> CliResult<usize>
where
    M: TextModel,
    R: io::BufRead,
    W: Write,
{
    let mut docs = read_documents(input, format)?;
    let embedded = encode_documents(encoder, &mut docs, params)?;
    write_documents(output, &docs, format)?;
    Ok(embedded)
}

fn encode_documents<M: TextModel>(
    encoder: &TextEncoder<M>,
    docs: &mut DocumentArray,
    params: &EncodeParameters,
) -> CliResult<usize> {
    tracing::info!("Read {} documents", docs.len());

    encoder.encode(docs, params)?;

    let embedded = docs.iter().filter(|d| d.embedding.is_some()).count();
    tracing::info!("{} of {} root documents embedded", embedded, docs.len());
    Ok(embedded)
}

/// Print supported models, marking the default
pub fn list_models<W: Write>(mut out: W) -> CliResult<()> {
    let default = ModelName::default();
    for model in ModelName::ALL {
        let marker = if model == default { "*" } else { " " };
        writeln!(
            out,
            "{marker} {:<48} {:<40} {:>5}d",
            model.hub_id(),
            model.short_name(),
            model.dimension()
        )?;
    }
    out.flush()?;
    Ok(())
}
