//! Assertion failures

use crate::compare::ComparisonReport;

/// Raised when compared data is not equal
#[derive(Debug, thiserror::Error)]
pub enum AssertionError {
    #[error("rows are not equal\n{report}")]
    RowsNotEqual { report: ComparisonReport },

    #[error("columns are not equal\n{report}")]
    ColumnsNotEqual { report: ComparisonReport },

    #[error("schemas are not equal\n{report}")]
    SchemasNotEqual { report: ComparisonReport },

    #[error("column not found: {column}")]
    ColumnNotFound { column: String },
}

impl AssertionError {
    /// The diagnostic report, if this failure carries one
    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            AssertionError::RowsNotEqual { report }
            | AssertionError::ColumnsNotEqual { report }
            | AssertionError::SchemasNotEqual { report } => Some(report),
            AssertionError::ColumnNotFound { .. } => None,
        }
    }
}
