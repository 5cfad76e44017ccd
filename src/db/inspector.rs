//! Schema introspection over the SQLite file.
//!
//! Metadata comes from `sqlite_master` plus the `table_info` and
//! `foreign_key_list` pragmas. Column and foreign-key order is whatever the
//! engine reports; nothing is re-sorted or cached.

use crate::db::open_connection;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    ColumnDescriptor, ColumnSummary, ForeignKeyDescriptor, SchemaSnapshot, TableDescriptor,
};
use sqlx::{Connection, Row, SqliteConnection};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

const LIST_TABLES: &str = r#"
    SELECT name FROM sqlite_master
    WHERE type = 'table'
    AND name NOT LIKE 'sqlite_%'
    ORDER BY name
    "#;

/// Raw column row shared by both snapshot shapes.
///
/// Both `describe_schema` and `schema_overview` build from this, so the two
/// views can never disagree on order, types, or flags.
struct PragmaColumn {
    name: String,
    data_type: String,
    notnull: bool,
    default_value: Option<String>,
    is_primary_key: bool,
}

/// Schema inspector for a single SQLite database file.
pub struct SchemaInspector {
    db_path: PathBuf,
}

impl SchemaInspector {
    /// Create an inspector for the given database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Describe the schema of the whole database, or of a single table.
    ///
    /// With a table name, a table whose `table_info` pragma reports zero
    /// columns is treated as missing and surfaces as `NotFound`. The
    /// `foreign_keys` field of each descriptor is attached only when the
    /// table declares at least one foreign key.
    pub async fn describe_schema(&self, table: Option<&str>) -> GatewayResult<SchemaSnapshot> {
        let mut conn = open_connection(&self.db_path).await?;
        let result = Self::build_snapshot(&mut conn, table).await;
        let _ = conn.close().await;
        result
    }

    /// The lighter per-column view of every user table.
    ///
    /// No foreign-key resolution and no missing-table handling; serves the
    /// schema resource surface.
    pub async fn schema_overview(&self) -> GatewayResult<BTreeMap<String, Vec<ColumnSummary>>> {
        let mut conn = open_connection(&self.db_path).await?;
        let result = Self::build_overview(&mut conn).await;
        let _ = conn.close().await;
        result
    }

    async fn build_snapshot(
        conn: &mut SqliteConnection,
        table: Option<&str>,
    ) -> GatewayResult<SchemaSnapshot> {
        let mut snapshot = SchemaSnapshot::new();

        let tables = match table {
            Some(name) => vec![name.to_string()],
            None => Self::list_tables(conn).await?,
        };
        let single = table.is_some();

        for name in tables {
            let columns = Self::fetch_columns(conn, &name).await?;
            if columns.is_empty() {
                if single {
                    return Err(GatewayError::not_found(name));
                }
                // A table listed in sqlite_master always has columns; skip
                // defensively if it vanished between the two statements.
                continue;
            }
            let foreign_keys = Self::fetch_foreign_keys(conn, &name).await?;
            let descriptor = TableDescriptor::new(
                columns.into_iter().map(PragmaColumn::into_descriptor).collect(),
            )
            .with_foreign_keys(foreign_keys);
            snapshot.insert(name, descriptor);
        }

        debug!(tables = snapshot.len(), "Built schema snapshot");
        Ok(snapshot)
    }

    async fn build_overview(
        conn: &mut SqliteConnection,
    ) -> GatewayResult<BTreeMap<String, Vec<ColumnSummary>>> {
        let mut overview = BTreeMap::new();
        for name in Self::list_tables(conn).await? {
            let columns = Self::fetch_columns(conn, &name).await?;
            overview.insert(
                name,
                columns.into_iter().map(PragmaColumn::into_summary).collect(),
            );
        }
        Ok(overview)
    }

    async fn list_tables(conn: &mut SqliteConnection) -> GatewayResult<Vec<String>> {
        let rows = sqlx::query(LIST_TABLES).fetch_all(conn).await?;
        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    async fn fetch_columns(
        conn: &mut SqliteConnection,
        table_name: &str,
    ) -> GatewayResult<Vec<PragmaColumn>> {
        let pragma_query = format!("PRAGMA table_info('{}')", table_name);
        let rows = sqlx::query(&pragma_query).fetch_all(conn).await?;

        Ok(rows
            .iter()
            .map(|row| {
                let notnull: i64 = row.get("notnull");
                let pk: i64 = row.get("pk");
                PragmaColumn {
                    name: row.get("name"),
                    data_type: row.get("type"),
                    notnull: notnull != 0,
                    default_value: row.try_get("dflt_value").ok().flatten(),
                    is_primary_key: pk > 0,
                }
            })
            .collect())
    }

    async fn fetch_foreign_keys(
        conn: &mut SqliteConnection,
        table_name: &str,
    ) -> GatewayResult<Vec<ForeignKeyDescriptor>> {
        let fk_query = format!("PRAGMA foreign_key_list('{}')", table_name);
        let rows = sqlx::query(&fk_query).fetch_all(conn).await?;

        Ok(rows
            .iter()
            .map(|row| ForeignKeyDescriptor {
                id: row.get("id"),
                seq: row.get("seq"),
                referenced_table: row.get("table"),
                from_column: row.get("from"),
                // NULL when the constraint references the parent's primary key implicitly
                to_column: row.try_get("to").ok().flatten(),
            })
            .collect())
    }
}

impl PragmaColumn {
    fn into_descriptor(self) -> ColumnDescriptor {
        ColumnDescriptor {
            name: self.name,
            data_type: self.data_type,
            notnull: self.notnull,
            default_value: self.default_value,
            is_primary_key: self.is_primary_key,
        }
    }

    fn into_summary(self) -> ColumnSummary {
        ColumnSummary {
            name: self.name,
            data_type: self.data_type,
            notnull: self.notnull,
            default: self.default_value,
            pk: self.is_primary_key,
        }
    }
}
