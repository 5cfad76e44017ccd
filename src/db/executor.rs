//! Constrained ad-hoc query execution.
//!
//! Accepted statements run verbatim against a fresh read-only connection.
//! The validation contract is deliberately narrow: trim the text and check
//! for a case-insensitive `SELECT` prefix, nothing more. There is no SQL
//! parsing and no parameter binding.

use crate::db::open_connection;
use crate::error::{GatewayError, GatewayResult};
use crate::models::value::row_to_json_map;
use serde_json::Value as JsonValue;
use sqlx::{Connection, SqliteConnection};
use std::path::PathBuf;
use tracing::info;

/// Executes read-only queries against a single SQLite database file.
pub struct SafeQueryExecutor {
    db_path: PathBuf,
}

impl SafeQueryExecutor {
    /// Create an executor for the given database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Execute a SELECT query and return its rows as ordered name→value maps.
    ///
    /// Rows keep the engine's column order and row order; a query matching
    /// zero rows returns an empty vector, not an error.
    pub async fn execute(
        &self,
        sql: &str,
    ) -> GatewayResult<Vec<serde_json::Map<String, JsonValue>>> {
        validate_select(sql)?;

        let mut conn = open_connection(&self.db_path).await?;
        let result = Self::fetch_rows(&mut conn, sql.trim()).await;
        let _ = conn.close().await;

        let rows = result?;
        info!(rows = rows.len(), "Query executed");
        Ok(rows)
    }

    async fn fetch_rows(
        conn: &mut SqliteConnection,
        sql: &str,
    ) -> GatewayResult<Vec<serde_json::Map<String, JsonValue>>> {
        let rows = sqlx::query(sql).fetch_all(conn).await?;
        Ok(rows.iter().map(row_to_json_map).collect())
    }
}

/// Check that the trimmed statement starts with `SELECT`, case-insensitively.
///
/// This mirrors a plain prefix test: statements like CTEs (`WITH ... SELECT`)
/// are rejected even though they only read.
fn validate_select(sql: &str) -> GatewayResult<()> {
    let trimmed = sql.trim();
    let is_select = trimmed
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select"));
    if is_select {
        Ok(())
    } else {
        Err(GatewayError::policy(
            "query must start with SELECT".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_uppercase_select() {
        assert!(validate_select("SELECT * FROM sessions").is_ok());
    }

    #[test]
    fn test_validate_accepts_lowercase_select() {
        assert!(validate_select("select 1").is_ok());
    }

    #[test]
    fn test_validate_accepts_mixed_case_select() {
        assert!(validate_select("SeLeCt name FROM speakers").is_ok());
    }

    #[test]
    fn test_validate_trims_leading_whitespace() {
        assert!(validate_select("   \n\t SELECT 1").is_ok());
    }

    #[test]
    fn test_validate_rejects_delete() {
        let err = validate_select("DELETE FROM sessions").unwrap_err();
        assert!(matches!(err, GatewayError::PolicyViolation { .. }));
    }

    #[test]
    fn test_validate_rejects_update() {
        let err = validate_select("UPDATE sessions SET title = 'x'").unwrap_err();
        assert!(matches!(err, GatewayError::PolicyViolation { .. }));
    }

    #[test]
    fn test_validate_rejects_insert() {
        assert!(validate_select("INSERT INTO sessions VALUES (1)").is_err());
    }

    #[test]
    fn test_validate_rejects_drop() {
        assert!(validate_select("DROP TABLE sessions").is_err());
    }

    #[test]
    fn test_validate_rejects_leading_whitespace_delete() {
        assert!(validate_select("   DELETE FROM sessions").is_err());
    }

    #[test]
    fn test_validate_rejects_cte() {
        // Prefix check only; a read-only CTE still fails it.
        assert!(validate_select("WITH t AS (SELECT 1) SELECT * FROM t").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_and_short_input() {
        assert!(validate_select("").is_err());
        assert!(validate_select("   ").is_err());
        assert!(validate_select("sel").is_err());
    }
}
