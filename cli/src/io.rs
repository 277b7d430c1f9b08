//! Document I/O
//!
//! Documents travel as a single JSON array or as JSON Lines (one document
//! per line, blank lines ignored).

use std::io::{BufRead, Write};

use clap::ValueEnum;
use text_encoder::{Document, DocumentArray};

use crate::error::{CliError, CliResult};

/// Serialized form of a document collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// One JSON array
    #[default]
    Json,
    /// One JSON document per line
    Jsonl,
}

/// Read a document collection
pub fn read_documents<R: BufRead>(reader: R, format: Format) -> CliResult<DocumentArray> {
    match format {
        Format::Json => Ok(serde_json::from_reader(reader)?),
        Format::Jsonl => {
            let mut docs = DocumentArray::new();
            for (index, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let doc: Document =
                    serde_json::from_str(&line).map_err(|e| CliError::InvalidInput {
                        line: index + 1,
                        message: e.to_string(),
                    })?;
                docs.push(doc);
            }
            Ok(docs)
        }
    }
}

/// Write a document collection
pub fn write_documents<W: Write>(mut writer: W, docs: &DocumentArray, format: Format) -> CliResult<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut writer, docs)?;
            writeln!(writer)?;
        }
        Format::Jsonl => {
            for doc in docs {
                serde_json::to_writer(&mut writer, doc)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_array() {
        let input = br#"[{"content": "hello world"}, {"id": "2"}]"#;
        let docs = read_documents(&input[..], Format::Json).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs.as_slice()[0].text.as_deref(), Some("hello world"));
        assert_eq!(docs.as_slice()[1].id, "2");
    }

    #[test]
    fn test_read_jsonl_skips_blank_lines() {
        let input = "{\"text\": \"a\"}\n\n{\"text\": \"b\"}\n";
        let docs = read_documents(input.as_bytes(), Format::Jsonl).unwrap();
        let texts: Vec<_> = docs.iter().filter_map(|d| d.text.clone()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_read_jsonl_reports_line_number() {
        let input = "{\"text\": \"a\"}\nnot json\n";
        match read_documents(input.as_bytes(), Format::Jsonl) {
            Err(CliError::InvalidInput { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_write_jsonl_one_doc_per_line() {
        let docs: DocumentArray = vec![
            Document::with_text("a").id("1"),
            Document::with_text("b").id("2"),
        ]
        .into();
        let mut out = Vec::new();
        write_documents(&mut out, &docs, Format::Jsonl).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec![r#"{"id":"1","text":"a"}"#, r#"{"id":"2","text":"b"}"#]);
    }
}
