//! Comparison engine for values, rows, columns and schemas

pub mod column;
mod report;
pub mod row;
pub mod schema;
pub mod value;

use std::borrow::Cow;

use crate::config::AssertOptions;
use crate::error::AssertionError;
use crate::model::Dataset;

pub use column::{assert_column_equality, compare_columns};
pub use report::{ComparisonReport, ReportEntry};
pub use row::{are_rows_equal, assert_rows_equality, compare_rows, RowComparator};
pub use schema::{are_schemas_equal, assert_schema_equality};
pub use value::{are_elements_equal, check_equal, is_nan, ValueComparator};

/// Whole-dataset comparison engine
///
/// Checks the schemas first, then every row.
pub struct DatasetComparer {
    options: AssertOptions,
}

impl DatasetComparer {
    /// Create a new comparer with options
    pub fn new(options: AssertOptions) -> Self {
        Self { options }
    }

    /// Assert that both datasets are equal
    pub fn assert_equal(&self, left: &Dataset, right: &Dataset) -> Result<(), AssertionError> {
        let left = self.normalize_columns(left);
        let right = self.normalize_columns(right);

        assert_schema_equality(&left.schema, &right.schema, self.options.ignore_nullable)?;

        let left = self.normalize_rows(left);
        let right = self.normalize_rows(right);

        assert_rows_equality(&left, &right, &self.options.policy)
    }

    fn normalize_columns<'a>(&self, dataset: &'a Dataset) -> Cow<'a, Dataset> {
        if self.options.ignore_column_order {
            let mut owned = dataset.clone();
            owned.sort_columns();
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(dataset)
        }
    }

    fn normalize_rows<'a>(&self, dataset: Cow<'a, Dataset>) -> Cow<'a, Dataset> {
        if self.options.ignore_row_order {
            let mut owned = dataset.into_owned();
            owned.sort_rows();
            Cow::Owned(owned)
        } else {
            dataset
        }
    }
}

/// Convenience function to assert two datasets are equal
pub fn assert_dataset_equality(
    left: &Dataset,
    right: &Dataset,
    options: &AssertOptions,
) -> Result<(), AssertionError> {
    DatasetComparer::new(*options).assert_equal(left, right)
}
