//! Data model for tabular data representation

mod dataset;
mod record;
mod schema;
mod value;

pub use dataset::Dataset;
pub use record::Record;
pub use schema::{Schema, StructField, TypeTag};
pub use value::Value;
