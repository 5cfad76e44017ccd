//! Error types for the SQLite MCP Gateway.
//!
//! This module defines all error types using `thiserror` for ergonomic error
//! handling. Every failure surfaces to the caller as one of four kinds:
//! a missing table, a rejected query, an engine-side execution failure, or
//! a failure to open the database file.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Table '{table}' not found in database")]
    NotFound { table: String },

    #[error("Only SELECT queries are allowed for security reasons: {reason}")]
    PolicyViolation { reason: String },

    #[error("Database query error: {message}")]
    Execution { message: String },

    #[error("Failed to open database: {message}")]
    Connection { message: String },
}

impl GatewayError {
    /// Create a not-found error for a table name.
    pub fn not_found(table: impl Into<String>) -> Self {
        Self::NotFound {
            table: table.into(),
        }
    }

    /// Create a policy violation error.
    pub fn policy(reason: impl Into<String>) -> Self {
        Self::PolicyViolation {
            reason: reason.into(),
        }
    }

    /// Create an execution error embedding the engine's message.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Convert sqlx errors to GatewayError.
///
/// Engine-side failures (syntax errors, missing objects, type mismatches)
/// become `Execution` errors carrying the engine's own message; failures to
/// reach the database file become `Connection` errors.
impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => GatewayError::execution(db_err.message()),
            sqlx::Error::Configuration(msg) => GatewayError::connection(msg.to_string()),
            sqlx::Error::Io(io_err) => {
                GatewayError::connection(format!("I/O error: {}", io_err))
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                GatewayError::connection("Database connection unavailable")
            }
            other => GatewayError::execution(other.to_string()),
        }
    }
}

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Convert GatewayError to MCP ErrorData for semantic error categorization.
impl From<GatewayError> for rmcp::ErrorData {
    fn from(err: GatewayError) -> Self {
        match &err {
            GatewayError::NotFound { .. } => {
                rmcp::ErrorData::resource_not_found(err.to_string(), None)
            }
            GatewayError::PolicyViolation { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            GatewayError::Execution { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            GatewayError::Connection { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }
        }
    }
}
