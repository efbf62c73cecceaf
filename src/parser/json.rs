//! JSON array parser

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::model::{Dataset, Schema, StructField, TypeTag, Value};

use super::csv::value_type;
use super::Parser;

/// Parser for JSON array files
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        let reader = BufReader::new(file);

        let value: JsonValue =
            serde_json::from_reader(reader).context("Failed to parse JSON file")?;

        // Handle both arrays and single objects
        let array = match value {
            JsonValue::Array(arr) => arr,
            JsonValue::Object(_) => vec![value],
            _ => bail!("JSON must be an array or object"),
        };

        // Collect all unique keys across all objects to build the column list,
        // widening each column's type as values are seen
        let mut columns: IndexMap<String, TypeTag> = IndexMap::new();
        for (i, item) in array.iter().enumerate() {
            let JsonValue::Object(obj) = item else {
                bail!("JSON item {} is not an object", i + 1);
            };
            for (key, value) in obj {
                let tag = json_type(value);
                let entry = columns.entry(key.clone()).or_insert(TypeTag::Null);
                *entry = entry.widen(tag);
            }
        }

        let schema = Schema::new(
            columns
                .iter()
                .map(|(name, tag)| StructField::new(name.clone(), *tag))
                .collect(),
        );
        let mut dataset = Dataset::new(schema);

        // Convert each object to a row
        for item in &array {
            if let JsonValue::Object(obj) = item {
                dataset.add_values(columns.keys().map(|key| json_to_value(obj.get(key))).collect());
            }
        }

        Ok(dataset)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "json")
    }
}

fn json_type(value: &JsonValue) -> TypeTag {
    match value {
        JsonValue::Object(_) => TypeTag::Struct,
        other => value_type(&json_to_value(Some(other))),
    }
}

fn json_to_value(value: Option<&JsonValue>) -> Value {
    match value {
        None | Some(JsonValue::Null) => Value::Null,
        Some(JsonValue::Bool(b)) => Value::Bool(*b),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        Some(JsonValue::String(s)) => {
            // Try parsing as date/datetime
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Value::Date(date);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return Value::Timestamp(dt);
            }
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Value::Timestamp(dt);
            }
            // JSON has no literal for NaN
            if s == "NaN" {
                return Value::Float(f64::NAN);
            }
            Value::String(s.clone())
        }
        Some(JsonValue::Array(arr)) => {
            Value::Array(arr.iter().map(|v| json_to_value(Some(v))).collect())
        }
        Some(JsonValue::Object(obj)) => {
            // Keep objects as their JSON text
            Value::String(JsonValue::Object(obj.clone()).to_string())
        }
    }
}
