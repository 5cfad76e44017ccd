//! Data models for schema introspection and query results.

pub mod schema;
pub mod value;

pub use schema::{
    ColumnDescriptor, ColumnSummary, ForeignKeyDescriptor, SchemaSnapshot, TableDescriptor,
};
pub use value::SqlValue;
