//! Query execution tool.
//!
//! This module implements the `query` MCP tool for executing SELECT queries.
//! Anything that does not start with SELECT is rejected before it reaches
//! the engine.

use crate::db::SafeQueryExecutor;
use crate::error::GatewayResult;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Input for the query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// SQL SELECT statement to execute, verbatim. No parameter binding.
    pub query: String,
}

/// Handler for read-only query requests.
pub struct QueryToolHandler {
    executor: SafeQueryExecutor,
}

impl QueryToolHandler {
    /// Create a handler for the given database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            executor: SafeQueryExecutor::new(db_path),
        }
    }

    /// Run the query and return one JSON object per row.
    pub async fn query(
        &self,
        input: QueryInput,
    ) -> GatewayResult<Vec<serde_json::Map<String, JsonValue>>> {
        self.executor.execute(&input.query).await
    }
}
