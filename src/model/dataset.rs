//! In-memory datasets: a schema plus its collected rows

use super::record::Record;
use super::schema::Schema;
use super::value::Value;

/// A fully materialized table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Column definitions
    pub schema: Schema,
    /// All rows in order
    pub rows: Vec<Record>,
}

impl Dataset {
    /// Create an empty dataset with column definitions
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Create a dataset from a schema and rows
    pub fn from_rows(schema: Schema, rows: Vec<Record>) -> Self {
        Self { schema, rows }
    }

    /// Add a row from values in column order
    ///
    /// Missing trailing values are padded with nulls; surplus values are dropped.
    pub fn add_values(&mut self, values: Vec<Value>) {
        let mut values = values.into_iter();
        let row = Record::from_pairs(
            self.schema
                .fields
                .iter()
                .map(|f| (f.name.clone(), values.next().unwrap_or(Value::Null))),
        );
        self.rows.push(row);
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.index_of(name)
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Sort rows by all their values, left to right
    pub fn sort_rows(&mut self) {
        self.rows.sort_by(|a, b| {
            a.values()
                .zip(b.values())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len()))
        });
    }

    /// Reorder columns alphabetically by name, in the schema and every row
    pub fn sort_columns(&mut self) {
        self.schema.fields.sort_by(|a, b| a.name.cmp(&b.name));
        let names = self.schema.field_names();
        for row in &mut self.rows {
            *row = row.project(&names);
        }
    }
}
