//! CSV file parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Dataset, Schema, StructField, TypeTag, Value};

use super::Parser;

/// Parser for CSV files
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let delimiter = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("tsv")) {
            b'\t'
        } else {
            b','
        };
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader);

        // Read headers
        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();

        // Read rows
        let mut rows: Vec<Vec<Value>> = Vec::new();
        for (line_num, result) in csv_reader.records().enumerate() {
            let record = result.with_context(|| format!("Failed to read CSV row {}", line_num + 2))?; // +2 for 1-indexing and header
            rows.push(record.iter().map(parse_cell_value).collect());
        }

        let schema = Schema::new(
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| StructField::new(name, infer_column_type(&rows, i)))
                .collect(),
        );

        let mut dataset = Dataset::new(schema);
        for cells in rows {
            dataset.add_values(cells);
        }

        Ok(dataset)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "tsv" | "txt")
    }
}

/// Parse a string value into a Value with type inference
fn parse_cell_value(s: &str) -> Value {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return Value::Null;
    }

    // Try parsing as boolean
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }

    // Try parsing as float, NaN included
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }

    // Try parsing as date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Value::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Value::Timestamp(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Value::Timestamp(dt);
    }

    // Default to string
    Value::String(trimmed.to_string())
}

/// Type tag of a single parsed cell
pub(super) fn value_type(value: &Value) -> TypeTag {
    match value {
        Value::Null => TypeTag::Null,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Int(_) => TypeTag::Long,
        Value::Float(_) => TypeTag::Double,
        Value::Decimal(_) => TypeTag::Decimal,
        Value::String(_) => TypeTag::String,
        Value::Date(_) => TypeTag::Date,
        Value::Timestamp(_) => TypeTag::Timestamp,
        Value::Array(_) => TypeTag::Array,
    }
}

/// Infer a column type from data, widening across rows
fn infer_column_type(rows: &[Vec<Value>], col_idx: usize) -> TypeTag {
    rows.iter()
        .filter_map(|row| row.get(col_idx))
        .fold(TypeTag::Null, |inferred, cell| inferred.widen(value_type(cell)))
}
