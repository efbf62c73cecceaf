//! rowassert - Equality assertions for tabular data
//!
//! Compares rows, columns and schemas of materialized datasets, with optional
//! numeric tolerance and NaN equality, and reports mismatches as a
//! side-by-side table.

pub mod compare;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use compare::{
    are_elements_equal, are_rows_equal, assert_column_equality, assert_dataset_equality,
    assert_rows_equality, assert_schema_equality, check_equal, compare_rows, is_nan,
    ComparisonReport,
};
pub use config::{AssertOptions, ComparisonPolicy, Config};
pub use error::AssertionError;
pub use model::{Dataset, Record, Schema, StructField, TypeTag, Value};
