//! SQLite MCP Gateway Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to explore and query a single SQLite database in a read-only fashion.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::GatewayError;
pub use mcp::GatewayService;
