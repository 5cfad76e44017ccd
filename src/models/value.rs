//! Tagged SQL value type and row decoding.
//!
//! SQLite stores values by storage class, not by declared column type, so a
//! single column can hold integers in one row and text in the next. `SqlValue`
//! captures the value exactly as the engine reports it and converts to JSON
//! without coercing types.

use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// A single SQLite value, tagged by storage class.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Decode the value at `idx` from a fetched row.
    ///
    /// The storage class comes from the value itself, so dynamically typed
    /// columns decode per row rather than per declaration.
    pub fn decode(row: &SqliteRow, idx: usize) -> Self {
        let raw = match row.try_get_raw(idx) {
            Ok(raw) => raw,
            Err(_) => return Self::Null,
        };
        if raw.is_null() {
            return Self::Null;
        }
        let type_name = raw.type_info().name().to_uppercase();
        match type_name.as_str() {
            "INTEGER" | "INT" | "INT4" | "INT8" | "BIGINT" | "BOOLEAN" => row
                .try_get::<i64, _>(idx)
                .map(Self::Integer)
                .unwrap_or(Self::Null),
            "REAL" | "FLOAT" | "DOUBLE" | "NUMERIC" => row
                .try_get::<f64, _>(idx)
                .map(Self::Real)
                .unwrap_or(Self::Null),
            "BLOB" => row
                .try_get::<Vec<u8>, _>(idx)
                .map(Self::Blob)
                .unwrap_or(Self::Null),
            _ => row
                .try_get::<String, _>(idx)
                .map(Self::Text)
                .unwrap_or(Self::Null),
        }
    }

    /// Convert to a JSON value. Blobs become base64 text, the only
    /// JSON-safe encoding for arbitrary bytes.
    pub fn into_json(self) -> JsonValue {
        use base64::{Engine as _, engine::general_purpose::STANDARD};

        match self {
            Self::Null => JsonValue::Null,
            Self::Integer(v) => JsonValue::Number(v.into()),
            Self::Real(v) => serde_json::Number::from_f64(v)
                .map(JsonValue::Number)
                .unwrap_or_else(|| JsonValue::String(v.to_string())),
            Self::Text(v) => JsonValue::String(v),
            Self::Blob(bytes) => JsonValue::String(STANDARD.encode(bytes)),
        }
    }
}

/// Convert a fetched row into an ordered name→value JSON map.
///
/// Column order follows the engine's reported order; duplicate column names
/// keep the last occurrence, matching how dict-shaped row cursors behave.
pub fn row_to_json_map(row: &SqliteRow) -> serde_json::Map<String, JsonValue> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, col)| (col.name().to_string(), SqlValue::decode(row, idx).into_json()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_to_json() {
        assert_eq!(SqlValue::Null.into_json(), JsonValue::Null);
    }

    #[test]
    fn test_integer_to_json() {
        assert_eq!(SqlValue::Integer(42).into_json(), serde_json::json!(42));
        assert_eq!(SqlValue::Integer(-7).into_json(), serde_json::json!(-7));
    }

    #[test]
    fn test_real_to_json() {
        assert_eq!(SqlValue::Real(1.5).into_json(), serde_json::json!(1.5));
    }

    #[test]
    fn test_nan_real_falls_back_to_string() {
        let json = SqlValue::Real(f64::NAN).into_json();
        assert!(matches!(json, JsonValue::String(_)));
    }

    #[test]
    fn test_text_to_json() {
        assert_eq!(
            SqlValue::Text("keynote".to_string()).into_json(),
            serde_json::json!("keynote")
        );
    }

    #[test]
    fn test_blob_to_json_base64() {
        let json = SqlValue::Blob(b"hello world".to_vec()).into_json();
        assert_eq!(json, serde_json::json!("aGVsbG8gd29ybGQ="));
    }

    #[test]
    fn test_blob_preserves_non_utf8_bytes() {
        let json = SqlValue::Blob(vec![0xFF, 0xFE, 0x00, 0x01]).into_json();
        assert_eq!(json, serde_json::json!("//4AAQ=="));
    }
}
