//! Schema comparison logic

use crate::error::AssertionError;
use crate::model::{Schema, StructField};

use super::report::ComparisonReport;

/// Return true if both schemas have the same fields in the same order
///
/// With `ignore_nullable`, fields that differ only in nullability are equal.
pub fn are_schemas_equal(s1: &Schema, s2: &Schema, ignore_nullable: bool) -> bool {
    s1.len() == s2.len()
        && s1
            .fields
            .iter()
            .zip(&s2.fields)
            .all(|(f1, f2)| are_fields_equal(f1, f2, ignore_nullable))
}

fn are_fields_equal(f1: &StructField, f2: &StructField, ignore_nullable: bool) -> bool {
    f1.name == f2.name
        && f1.data_type == f2.data_type
        && (ignore_nullable || f1.nullable == f2.nullable)
}

/// Assert that two schemas are equal
///
/// The failure report lists every field pair; the shorter schema is padded
/// with `None`.
pub fn assert_schema_equality(
    s1: &Schema,
    s2: &Schema,
    ignore_nullable: bool,
) -> Result<(), AssertionError> {
    if are_schemas_equal(s1, s2, ignore_nullable) {
        return Ok(());
    }

    let mut report = ComparisonReport::new("schema1", "schema2");
    for i in 0..s1.len().max(s2.len()) {
        let (f1, f2) = (s1.fields.get(i), s2.fields.get(i));
        let equal = match (f1, f2) {
            (Some(f1), Some(f2)) => are_fields_equal(f1, f2, ignore_nullable),
            _ => false,
        };
        report.push(display_field(f1), display_field(f2), equal);
    }

    tracing::debug!(
        left_fields = s1.len(),
        right_fields = s2.len(),
        mismatches = report.mismatch_count(),
        "schema mismatch"
    );

    Err(AssertionError::SchemasNotEqual { report })
}

fn display_field(field: Option<&StructField>) -> String {
    field.map_or_else(|| "None".to_string(), StructField::to_string)
}
