//! Parser layer for loading local tabular files into datasets

mod csv;
mod json;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::model::Dataset;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Dataset
    fn parse(&self, path: &Path) -> Result<Dataset>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(JsonParser)],
        }
    }

    /// Get a parser for the given file path
    ///
    /// Files without an extension are sniffed for their format.
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => detect_format(path)?.to_string(),
        };

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!("Unsupported file format: {}", ext)
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Dataset> {
        let parser = self.get_parser(path)?;
        let dataset = parser.parse(path)?;
        tracing::debug!(
            path = %path.display(),
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "parsed dataset"
        );
        Ok(dataset)
    }
}

/// Detect file format from content: JSON if it opens with `[` or `{`, else CSV
pub fn detect_format(path: &Path) -> Result<&'static str> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut buffer = [0u8; 64];
    let bytes_read = file
        .read(&mut buffer)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let first = buffer[..bytes_read]
        .iter()
        .find(|b| !b.is_ascii_whitespace());

    Ok(match first {
        Some(b'[') | Some(b'{') => "json",
        _ => "csv",
    })
}
