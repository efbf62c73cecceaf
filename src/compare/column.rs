//! Column-level comparison within one dataset

use crate::config::ComparisonPolicy;
use crate::error::AssertionError;
use crate::model::{Dataset, Value};

use super::report::ComparisonReport;
use super::value::ValueComparator;

const NULL: &Value = &Value::Null;

/// Compare two columns of a dataset row by row without failing
pub fn compare_columns(
    dataset: &Dataset,
    col_name1: &str,
    col_name2: &str,
    policy: &ComparisonPolicy,
) -> Result<ComparisonReport, AssertionError> {
    let idx1 = column_index(dataset, col_name1)?;
    let idx2 = column_index(dataset, col_name2)?;
    let comparator = ValueComparator::new(policy);
    let mut report = ComparisonReport::new(col_name1, col_name2);

    tracing::debug!(
        rows = dataset.row_count(),
        precision = ?comparator.precision(),
        allow_nan_equality = comparator.allows_nan_equality(),
        "comparing columns"
    );

    for (index, row) in dataset.rows.iter().enumerate() {
        let v1 = row.get_index(idx1).unwrap_or(NULL);
        let v2 = row.get_index(idx2).unwrap_or(NULL);

        let equal = comparator.equal_untyped(v1, v2);
        if !equal {
            tracing::debug!(row = index, "column value mismatch");
        }
        report.push(v1.repr(), v2.repr(), equal);
    }

    Ok(report)
}

/// Assert that two columns of a dataset hold equal values in every row
///
/// Tolerance applies whenever both cells are floats, including inside arrays.
pub fn assert_column_equality(
    dataset: &Dataset,
    col_name1: &str,
    col_name2: &str,
    policy: &ComparisonPolicy,
) -> Result<(), AssertionError> {
    let report = compare_columns(dataset, col_name1, col_name2, policy)?;
    if report.all_equal() {
        Ok(())
    } else {
        Err(AssertionError::ColumnsNotEqual { report })
    }
}

fn column_index(dataset: &Dataset, name: &str) -> Result<usize, AssertionError> {
    dataset
        .column_index(name)
        .ok_or_else(|| AssertionError::ColumnNotFound {
            column: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Schema, StructField, TypeTag};

    fn dataset<A, B>(names: [&str; 2], tag: TypeTag, data: Vec<(A, B)>) -> Dataset
    where
        A: Into<Value>,
        B: Into<Value>,
    {
        let schema = Schema::new(vec![StructField::new(names[0], tag), StructField::new(names[1], tag)]);
        let mut dataset = Dataset::new(schema);
        for (a, b) in data {
            dataset.add_values(vec![a.into(), b.into()]);
        }
        dataset
    }

    fn exact() -> ComparisonPolicy {
        ComparisonPolicy::new()
    }

    #[test]
    fn test_fails_on_data_mismatch() {
        let df = dataset(
            ["name", "expected_name"],
            TypeTag::String,
            vec![("jose", "jose"), ("li", "li"), ("luisa", "laura")],
        );
        let err = assert_column_equality(&df, "name", "expected_name", &exact()).unwrap_err();
        assert!(matches!(err, AssertionError::ColumnsNotEqual { .. }));
        assert_eq!(err.report().map(|r| r.mismatch_count()), Some(1));
    }

    #[test]
    fn test_passes_without_mismatch() {
        let df = dataset(
            ["name", "expected_name"],
            TypeTag::String,
            vec![(Some("jose"), Some("jose")), (Some("li"), Some("li")), (None, None)],
        );
        assert!(assert_column_equality(&df, "name", "expected_name", &exact()).is_ok());
    }

    #[test]
    fn test_integer_values() {
        let df = dataset(
            ["num1", "num2"],
            TypeTag::Long,
            vec![(Some(1_i64), Some(1_i64)), (Some(10), Some(10)), (Some(8), Some(8)), (None, None)],
        );
        assert!(assert_column_equality(&df, "num1", "num2", &exact()).is_ok());
    }

    #[test]
    fn test_nans_equal_when_allowed() {
        let df = dataset(
            ["num1", "num2"],
            TypeTag::Double,
            vec![
                (Some(1.0), Some(1.0)),
                (Some(10.3), Some(10.3)),
                (Some(f64::NAN), Some(f64::NAN)),
                (None, None),
            ],
        );
        let policy = exact().with_allow_nan_equality(true);
        assert!(assert_column_equality(&df, "num1", "num2", &policy).is_ok());
        assert!(assert_column_equality(&df, "num1", "num2", &exact()).is_err());
    }

    #[test]
    fn test_array_elements() {
        let df = dataset(
            ["array1", "array2"],
            TypeTag::Array,
            vec![(vec![1.0, 7.2], vec![1.0, 7.2]), (vec![0.7, 5.6], vec![0.7, 5.6])],
        );
        assert!(assert_column_equality(&df, "array1", "array2", &exact()).is_ok());

        let df = dataset(
            ["array1", "array2"],
            TypeTag::Array,
            vec![(vec!["ice", "cold"], vec!["ice", "cold"]), (vec!["juice", "box"], vec!["cardboard", "box"])],
        );
        assert!(assert_column_equality(&df, "array1", "array2", &exact()).is_err());
    }

    #[test]
    fn test_array_nan_elements_when_allowed() {
        let df = dataset(
            ["array1", "array2"],
            TypeTag::Array,
            vec![(vec![f64::NAN, 7.2], vec![f64::NAN, 7.2]), (vec![3.4, f64::NAN], vec![3.4, f64::NAN])],
        );
        let policy = exact().with_allow_nan_equality(true);
        assert!(assert_column_equality(&df, "array1", "array2", &policy).is_ok());
    }

    #[test]
    fn test_nested_array_elements() {
        let df = dataset(
            ["array1", "array2"],
            TypeTag::Array,
            vec![
                (vec![vec![1.0], vec![7.2]], vec![vec![1.0], vec![7.2]]),
                (vec![vec![0.7]], vec![vec![0.7]]),
            ],
        );
        assert!(assert_column_equality(&df, "array1", "array2", &exact()).is_ok());
    }

    #[test]
    fn test_approximate_equality() {
        let p = exact().with_precision(0.1);

        let df = dataset(
            ["num1", "num2"],
            TypeTag::Double,
            vec![(Some(1.1), Some(1.1)), (Some(1.0004), Some(1.0005)), (Some(0.4), Some(0.45)), (None, None)],
        );
        assert!(assert_column_equality(&df, "num1", "num2", &p).is_ok());

        let df = dataset(
            ["num1", "num2"],
            TypeTag::Double,
            vec![(1.5, 1.1), (1.0004, 1.0005), (0.4, 0.45)],
        );
        assert!(assert_column_equality(&df, "num1", "num2", &p).is_err());
    }

    #[test]
    fn test_floats_against_nulls_fail_with_precision() {
        let p = exact().with_precision(0.1);

        let df = dataset(
            ["num1", "num2"],
            TypeTag::Double,
            vec![(Some(1.1), Some(1.1)), (Some(2.2), Some(2.2)), (Some(3.3), None)],
        );
        assert!(assert_column_equality(&df, "num1", "num2", &p).is_err());

        let df = dataset(
            ["num1", "num2"],
            TypeTag::Double,
            vec![(Some(1.1), Some(1.1)), (Some(2.2), Some(2.2)), (None, Some(3.3))],
        );
        assert!(assert_column_equality(&df, "num1", "num2", &p).is_err());
    }

    #[test]
    fn test_missing_column() {
        let df = dataset(["a", "b"], TypeTag::String, vec![("x", "x")]);
        let err = assert_column_equality(&df, "a", "c", &exact()).unwrap_err();
        assert!(matches!(err, AssertionError::ColumnNotFound { ref column } if column == "c"));
        assert!(err.report().is_none());
    }

    #[test]
    fn test_report_headings_are_column_names() {
        let df = dataset(["name", "expected_name"], TypeTag::String, vec![("jose", "jose")]);
        let report = compare_columns(&df, "name", "expected_name", &exact()).unwrap();
        assert_eq!(report.columns(), &["name".to_string(), "expected_name".to_string()]);
        assert_eq!(report.entries()[0].left, "\"jose\"");
    }

    #[test]
    fn test_report_tells_null_from_null_string() {
        let df = dataset(["a", "b"], TypeTag::String, vec![(Value::Null, Value::from("null"))]);
        let report = compare_columns(&df, "a", "b", &exact()).unwrap();
        let entry = &report.entries()[0];
        assert!(!entry.equal);
        assert_eq!(entry.left, "null");
        assert_eq!(entry.right, "\"null\"");
        assert_ne!(entry.left, entry.right);
    }
}
