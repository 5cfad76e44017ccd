//! MCP tool implementations.

pub mod query;
pub mod schema;

pub use query::{QueryInput, QueryToolHandler};
pub use schema::{GetSchemaInput, SchemaToolHandler};
