//! Schema-related data models.
//!
//! This module defines types for SQLite schema introspection. Column and
//! foreign-key ordering always follows the order SQLite reports, never a
//! re-sorted view of it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A full snapshot of the database schema, keyed by table name.
///
/// Recomputed fresh on every call; never cached.
pub type SchemaSnapshot = BTreeMap<String, TableDescriptor>;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TableDescriptor {
    /// Columns in declaration order as reported by `PRAGMA table_info`
    pub columns: Vec<ColumnDescriptor>,
    /// Present only when the table declares at least one foreign key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_keys: Option<Vec<ForeignKeyDescriptor>>,
}

impl TableDescriptor {
    /// Create a table descriptor without foreign keys.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            foreign_keys: None,
        }
    }

    /// Attach foreign keys. Empty lists are dropped so the field stays
    /// absent rather than serializing as `[]`.
    pub fn with_foreign_keys(mut self, foreign_keys: Vec<ForeignKeyDescriptor>) -> Self {
        if !foreign_keys.is_empty() {
            self.foreign_keys = Some(foreign_keys);
        }
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type (e.g., `INTEGER`, `TEXT`, `VARCHAR(30)`)
    #[serde(rename = "type")]
    pub data_type: String,
    /// True when the column carries a NOT NULL constraint
    pub notnull: bool,
    /// Declared default expression, verbatim; None when absent
    pub default_value: Option<String>,
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKeyDescriptor {
    /// Constraint index from `PRAGMA foreign_key_list`
    pub id: i64,
    /// Column position within a composite constraint
    pub seq: i64,
    pub referenced_table: String,
    pub from_column: String,
    /// None when the constraint references the parent's primary key implicitly
    pub to_column: Option<String>,
}

/// Lighter per-column shape used by the schema resource.
///
/// Mirrors the raw `PRAGMA table_info` row without FK resolution.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub notnull: bool,
    pub default: Option<String>,
    pub pk: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_column() -> ColumnDescriptor {
        ColumnDescriptor {
            name: "id".to_string(),
            data_type: "INTEGER".to_string(),
            notnull: true,
            default_value: None,
            is_primary_key: true,
        }
    }

    #[test]
    fn test_foreign_keys_omitted_when_absent() {
        let table = TableDescriptor::new(vec![sample_column()]);
        let json = serde_json::to_string(&table).unwrap();
        assert!(!json.contains("foreign_keys"));
    }

    #[test]
    fn test_empty_foreign_key_list_stays_omitted() {
        let table = TableDescriptor::new(vec![sample_column()]).with_foreign_keys(Vec::new());
        assert!(table.foreign_keys.is_none());
        let json = serde_json::to_string(&table).unwrap();
        assert!(!json.contains("foreign_keys"));
    }

    #[test]
    fn test_foreign_keys_serialized_when_present() {
        let table = TableDescriptor::new(vec![sample_column()]).with_foreign_keys(vec![
            ForeignKeyDescriptor {
                id: 0,
                seq: 0,
                referenced_table: "speakers".to_string(),
                from_column: "speaker_id".to_string(),
                to_column: Some("id".to_string()),
            },
        ]);
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"foreign_keys\""));
        assert!(json.contains("\"referenced_table\":\"speakers\""));
        assert!(json.contains("\"to_column\":\"id\""));
    }

    #[test]
    fn test_implicit_foreign_key_target_serializes_as_null() {
        let fk = ForeignKeyDescriptor {
            id: 0,
            seq: 0,
            referenced_table: "speakers".to_string(),
            from_column: "speaker_id".to_string(),
            to_column: None,
        };
        let json = serde_json::to_string(&fk).unwrap();
        assert!(json.contains("\"to_column\":null"));
    }

    #[test]
    fn test_column_serializes_declared_type_as_type() {
        let json = serde_json::to_string(&sample_column()).unwrap();
        assert!(json.contains("\"type\":\"INTEGER\""));
        assert!(!json.contains("data_type"));
    }

    #[test]
    fn test_column_default_serialized_as_null_when_absent() {
        let json = serde_json::to_string(&sample_column()).unwrap();
        assert!(json.contains("\"default_value\":null"));
    }

    #[test]
    fn test_column_summary_shape() {
        let summary = ColumnSummary {
            name: "title".to_string(),
            data_type: "TEXT".to_string(),
            notnull: false,
            default: Some("'untitled'".to_string()),
            pk: false,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["type"], "TEXT");
        assert_eq!(json["default"], "'untitled'");
        assert_eq!(json["pk"], false);
    }
}
