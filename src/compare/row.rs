//! Row-level comparison

use crate::config::ComparisonPolicy;
use crate::error::AssertionError;
use crate::model::{Dataset, Record, TypeTag};

use super::report::ComparisonReport;
use super::value::ValueComparator;

/// Display text for a row that is missing on one side
const ABSENT_ROW: &str = "None";

/// Pair rows by position, padding the shorter side with `None`
pub fn pair_rows<'a>(
    left: &'a [Record],
    right: &'a [Record],
) -> Vec<(Option<&'a Record>, Option<&'a Record>)> {
    (0..left.len().max(right.len()))
        .map(|i| (left.get(i), right.get(i)))
        .collect()
}

/// Return true if both rows are equal
///
/// Two absent rows are equal; one absent row never is. Values are compared
/// position by position against `type_tags`, stopping at the shortest of the
/// three sequences.
pub fn are_rows_equal(
    r1: Option<&Record>,
    r2: Option<&Record>,
    type_tags: &[TypeTag],
    policy: &ComparisonPolicy,
) -> bool {
    RowComparator::new(policy).equal(r1, r2, type_tags)
}

/// Row comparator applying a [`ValueComparator`] to every field
#[derive(Debug, Clone, Copy)]
pub struct RowComparator {
    values: ValueComparator,
}

impl RowComparator {
    pub fn new(policy: &ComparisonPolicy) -> Self {
        Self {
            values: ValueComparator::new(policy),
        }
    }

    /// Compare two optional rows
    pub fn equal(&self, r1: Option<&Record>, r2: Option<&Record>, type_tags: &[TypeTag]) -> bool {
        let (r1, r2) = match (r1, r2) {
            (None, None) => return true,
            (Some(r1), Some(r2)) => (r1, r2),
            _ => return false,
        };

        if r1.len() != r2.len() || r1.len() != type_tags.len() {
            tracing::warn!(
                left = r1.len(),
                right = r2.len(),
                types = type_tags.len(),
                "field counts differ, comparing the shortest prefix"
            );
        }

        // Order matters
        r1.values()
            .zip(r2.values())
            .zip(type_tags)
            .all(|((v1, v2), tag)| self.values.equal(v1, v2, Some(*tag)))
    }

    /// Compare every row pair of two datasets and collect the report
    ///
    /// Type tags come from the left dataset's schema only; the schemas are
    /// expected to have been checked beforehand.
    pub fn compare(&self, left: &Dataset, right: &Dataset) -> ComparisonReport {
        let type_tags = left.schema.type_tags();
        let mut report = ComparisonReport::new("df1", "df2");

        tracing::debug!(
            left_rows = left.row_count(),
            right_rows = right.row_count(),
            precision = ?self.values.precision(),
            allow_nan_equality = self.values.allows_nan_equality(),
            "comparing rows"
        );

        for (index, (r1, r2)) in pair_rows(&left.rows, &right.rows).into_iter().enumerate() {
            let equal = self.equal(r1, r2, &type_tags);
            if !equal {
                tracing::debug!(row = index, "row mismatch");
            }
            report.push(display_row(r1), display_row(r2), equal);
        }

        report
    }
}

fn display_row(row: Option<&Record>) -> String {
    row.map_or_else(|| ABSENT_ROW.to_string(), Record::to_string)
}

/// Compare all rows of two datasets without failing
pub fn compare_rows(left: &Dataset, right: &Dataset, policy: &ComparisonPolicy) -> ComparisonReport {
    RowComparator::new(policy).compare(left, right)
}

/// Assert that all rows of two datasets are equal
///
/// Every row pair is compared and reported, even after the first mismatch.
pub fn assert_rows_equality(
    left: &Dataset,
    right: &Dataset,
    policy: &ComparisonPolicy,
) -> Result<(), AssertionError> {
    let report = compare_rows(left, right, policy);
    if report.all_equal() {
        Ok(())
    } else {
        Err(AssertionError::RowsNotEqual { report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Schema, StructField, Value};
    use rstest::rstest;

    const STRINGS: [TypeTag; 2] = [TypeTag::String, TypeTag::String];

    fn row(n1: impl Into<Value>, n2: impl Into<Value>) -> Record {
        Record::new().with("n1", n1).with("n2", n2)
    }

    fn num_row(num: f64, first_name: &str) -> Record {
        Record::new().with("num", num).with("first_name", first_name)
    }

    fn exact() -> ComparisonPolicy {
        ComparisonPolicy::new()
    }

    fn nan_equal() -> ComparisonPolicy {
        ComparisonPolicy::new().with_allow_nan_equality(true)
    }

    fn within(precision: f64) -> ComparisonPolicy {
        ComparisonPolicy::new().with_precision(precision)
    }

    fn dataset(rows: Vec<Record>) -> Dataset {
        let schema = Schema::new(vec![
            StructField::new("num", TypeTag::Double),
            StructField::new("first_name", TypeTag::String),
        ]);
        Dataset::from_rows(schema, rows)
    }

    #[test]
    fn test_string_rows() {
        assert!(!are_rows_equal(Some(&row("bob", "jose")), Some(&row("li", "li")), &STRINGS, &exact()));
        assert!(are_rows_equal(
            Some(&row("luisa", "laura")),
            Some(&row("luisa", "laura")),
            &STRINGS,
            &exact()
        ));
    }

    #[test]
    fn test_rows_of_nulls_are_equal() {
        let r = row(Value::Null, Value::Null);
        assert!(are_rows_equal(Some(&r), Some(&r.clone()), &STRINGS, &exact()));
    }

    #[test]
    fn test_absent_rows() {
        let r = row("a", "b");
        assert!(are_rows_equal(None, None, &STRINGS, &exact()));
        assert!(!are_rows_equal(None, Some(&r), &STRINGS, &exact()));
        assert!(!are_rows_equal(Some(&r), None, &STRINGS, &exact()));
    }

    #[test]
    fn test_nan_equality_does_not_hide_other_differences() {
        assert!(!are_rows_equal(Some(&row("bob", "jose")), Some(&row("li", "li")), &STRINGS, &nan_equal()));
    }

    #[rstest]
    fn test_nan_rows(#[values(TypeTag::Float, TypeTag::Double, TypeTag::Decimal)] tag: TypeTag) {
        let tags = [tag, TypeTag::String];
        let r1 = row(f64::NAN, "jose");
        let r2 = row(f64::NAN, "jose");
        assert!(are_rows_equal(Some(&r1), Some(&r2), &tags, &nan_equal()));
        assert!(!are_rows_equal(Some(&r1), Some(&r2), &tags, &exact()));
    }

    #[rstest]
    fn test_nan_compared_to_string(#[values(TypeTag::Float, TypeTag::Double, TypeTag::Decimal)] tag: TypeTag) {
        let tags = [tag, TypeTag::String];
        assert!(!are_rows_equal(
            Some(&row(f64::NAN, "jose")),
            Some(&row("hi", "jose")),
            &tags,
            &nan_equal()
        ));
    }

    #[rstest]
    fn test_rows_within_precision(#[values(TypeTag::Float, TypeTag::Double, TypeTag::Decimal)] tag: TypeTag) {
        let tags = [tag, TypeTag::String];
        let p = within(0.1);
        assert!(are_rows_equal(Some(&num_row(1.1, "li")), Some(&num_row(1.05, "li")), &tags, &p));
        assert!(are_rows_equal(Some(&num_row(5.0, "laura")), Some(&num_row(5.0, "laura")), &tags, &p));
        assert!(!are_rows_equal(Some(&num_row(5.0, "laura")), Some(&num_row(5.9, "laura")), &tags, &p));

        let nulls = row(Value::Null, Value::Null);
        assert!(are_rows_equal(Some(&nulls), Some(&nulls.clone()), &tags, &p));
    }

    #[test]
    fn test_precision_boundary_follows_float_subtraction() {
        // abs(5.0 - 5.1) is slightly below 0.1 in binary floating point
        let tags = [TypeTag::Double, TypeTag::String];
        assert!(are_rows_equal(
            Some(&num_row(5.0, "a")),
            Some(&num_row(5.1, "a")),
            &tags,
            &within(0.1)
        ));
        // An exactly representable difference equal to the precision fails
        assert!(!are_rows_equal(
            Some(&num_row(1.0, "a")),
            Some(&num_row(1.5, "a")),
            &tags,
            &within(0.5)
        ));
    }

    #[test]
    fn test_field_comparison_stops_at_shortest() {
        let short = Record::new().with("a", 1_i64);
        let long = Record::new().with("a", 1_i64).with("b", "extra");
        assert!(are_rows_equal(Some(&short), Some(&long), &[TypeTag::Long, TypeTag::String], &exact()));

        // Fewer tags than fields truncates as well
        let r1 = row("same", "left");
        let r2 = row("same", "right");
        assert!(are_rows_equal(Some(&r1), Some(&r2), &[TypeTag::String], &exact()));
    }

    #[test]
    fn test_pair_rows_pads_to_longest() {
        let left = vec![num_row(1.0, "a")];
        let right = vec![num_row(1.0, "a"), num_row(2.0, "b")];
        let pairs = pair_rows(&left, &right);
        assert_eq!(pairs.len(), 2);
        assert!(pairs[1].0.is_none());
        assert!(pairs[1].1.is_some());
    }

    #[test]
    fn test_assert_rows_equality_passes() {
        let left = dataset(vec![num_row(1.0, "a"), num_row(2.0, "b")]);
        let right = dataset(vec![num_row(1.0, "a"), num_row(2.0, "b")]);
        assert!(assert_rows_equality(&left, &right, &exact()).is_ok());
    }

    #[test]
    fn test_assert_rows_equality_fails_on_extra_row() {
        let left = dataset(vec![num_row(1.0, "a")]);
        let right = dataset(vec![num_row(1.0, "a"), num_row(2.0, "b")]);

        let report = match assert_rows_equality(&left, &right, &exact()) {
            Err(AssertionError::RowsNotEqual { report }) => report,
            other => panic!("expected RowsNotEqual, got {other:?}"),
        };
        assert_eq!(report.len(), 2);
        assert!(report.entries()[0].equal);
        assert!(!report.entries()[1].equal);
        assert_eq!(report.entries()[1].left, "None");
        assert_eq!(report.entries()[1].right, "Row(num=2.0, first_name=\"b\")");
    }

    #[test]
    fn test_every_row_is_reported_after_a_mismatch() {
        let left = dataset(vec![num_row(1.0, "x"), num_row(2.0, "b"), num_row(3.0, "c")]);
        let right = dataset(vec![num_row(1.0, "a"), num_row(2.0, "b"), num_row(3.0, "c")]);

        let report = compare_rows(&left, &right, &exact());
        assert!(!report.all_equal());
        assert_eq!(report.len(), 3);
        assert_eq!(report.mismatch_count(), 1);
    }

    #[test]
    fn test_nan_rows_in_datasets() {
        let schema = Schema::new(vec![StructField::new("n1", TypeTag::Double)]);
        let left = Dataset::from_rows(schema.clone(), vec![Record::new().with("n1", f64::NAN)]);
        let right = Dataset::from_rows(schema, vec![Record::new().with("n1", f64::NAN)]);

        assert!(assert_rows_equality(&left, &right, &nan_equal()).is_ok());
        assert!(assert_rows_equality(&left, &right, &exact()).is_err());
    }

    #[test]
    fn test_error_message_carries_rendered_report() {
        let left = dataset(vec![num_row(1.0, "a")]);
        let right = dataset(vec![num_row(1.5, "a")]);
        let message = assert_rows_equality(&left, &right, &within(0.1))
            .unwrap_err()
            .to_string();
        assert!(message.starts_with("rows are not equal\n"));
        assert!(message.contains("│ df1"));
        assert!(message.contains("Row(num=1.5, first_name=\"a\")"));
    }
}
