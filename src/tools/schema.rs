//! Schema introspection tool.
//!
//! This module implements the `get_schema` MCP tool and backs the
//! `db://schema` resource.

use crate::db::SchemaInspector;
use crate::error::GatewayResult;
use crate::models::{ColumnSummary, SchemaSnapshot};
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Input for the get_schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSchemaInput {
    /// Specific table to describe. Omit to describe every table.
    #[serde(default)]
    pub table_name: Option<String>,
}

/// Handler for schema introspection requests.
pub struct SchemaToolHandler {
    inspector: SchemaInspector,
}

impl SchemaToolHandler {
    /// Create a handler for the given database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            inspector: SchemaInspector::new(db_path),
        }
    }

    /// Describe the whole database, or a single table when a name is given.
    pub async fn get_schema(&self, input: GetSchemaInput) -> GatewayResult<SchemaSnapshot> {
        let snapshot = self
            .inspector
            .describe_schema(input.table_name.as_deref())
            .await?;
        info!(
            tables = snapshot.len(),
            table = input.table_name.as_deref().unwrap_or("*"),
            "Schema described"
        );
        Ok(snapshot)
    }

    /// The lighter per-column overview serving the schema resource.
    pub async fn schema_overview(&self) -> GatewayResult<BTreeMap<String, Vec<ColumnSummary>>> {
        self.inspector.schema_overview().await
    }
}
