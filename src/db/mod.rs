//! Database access layer.
//!
//! Every operation opens its own short-lived connection against the single
//! SQLite file and closes it before returning. There is no pool and no shared
//! state between calls.

pub mod executor;
pub mod inspector;

pub use executor::SafeQueryExecutor;
pub use inspector::SchemaInspector;

use crate::error::{GatewayError, GatewayResult};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

/// Open a fresh read-only connection to the database file.
///
/// The read-only flag is enforced at the SQLite level, so even a statement
/// that slips past query validation cannot mutate the file.
pub(crate) async fn open_connection(path: &Path) -> GatewayResult<SqliteConnection> {
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    SqliteConnection::connect_with(&options)
        .await
        .map_err(|e| GatewayError::connection(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_open_connection_missing_file_is_connection_error() {
        let path = PathBuf::from("/nonexistent/dir/missing.db");
        let err = open_connection(&path).await.unwrap_err();
        assert!(matches!(err, GatewayError::Connection { .. }));
        assert!(err.to_string().contains("missing.db"));
    }
}
