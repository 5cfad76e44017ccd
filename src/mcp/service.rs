//! MCP service implementation using rmcp.
//!
//! This module defines the GatewayService struct with the database tools
//! exposed via the MCP protocol using the rmcp framework's macros, plus the
//! schema resource surface.

use crate::models::SchemaSnapshot;
use crate::tools::query::{QueryInput, QueryToolHandler};
use crate::tools::schema::{GetSchemaInput, SchemaToolHandler};
use rmcp::Json;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
        PaginatedRequestParam, ProtocolVersion, RawResource, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// URI of the schema overview resource.
pub const SCHEMA_RESOURCE_URI: &str = "db://schema";

#[derive(Clone)]
pub struct GatewayService {
    /// Path to the SQLite database file; each request opens its own connection
    db_path: PathBuf,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl GatewayService {
    /// Create a new GatewayService for the given database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl GatewayService {
    #[tool(
        description = "Get the database schema.\nWithout table_name, returns every user table with its columns and foreign keys.\nWith table_name, returns that single table or an error if it does not exist."
    )]
    async fn get_schema(
        &self,
        Parameters(input): Parameters<GetSchemaInput>,
    ) -> Result<Json<SchemaSnapshot>, McpError> {
        let handler = SchemaToolHandler::new(self.db_path.clone());
        handler.get_schema(input).await.map(Json).map_err(McpError::from)
    }

    #[tool(
        description = "Execute a SELECT query against the database and return matching rows.\nOnly SELECT statements are accepted; the text runs verbatim with no parameter binding.\nReturns a JSON array with one object per row."
    )]
    async fn query(
        &self,
        Parameters(input): Parameters<QueryInput>,
    ) -> Result<CallToolResult, McpError> {
        let handler = QueryToolHandler::new(self.db_path.clone());
        let rows = handler.query(input).await.map_err(McpError::from)?;
        let text = rows_to_text(&rows)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Serialize result rows as a JSON array string.
///
/// Tool output schemas must be object-rooted, so the row array travels as
/// text content rather than structured output, keeping the array shape on
/// the wire.
fn rows_to_text(rows: &[serde_json::Map<String, JsonValue>]) -> Result<String, McpError> {
    serde_json::to_string(rows).map_err(|e| McpError::internal_error(e.to_string(), None))
}

#[tool_handler]
impl ServerHandler for GatewayService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "sqlite-mcp-gateway".to_owned(),
                title: Some("SQLite MCP Gateway".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Read-only tools for exploring a SQLite database.\n\
                \n\
                ## Workflow\n\
                1. Call `get_schema` (or read the `db://schema` resource) to discover tables and columns\n\
                2. Call `query` with a SELECT statement to fetch rows\n\
                \n\
                ## Constraints\n\
                - Only SELECT statements are accepted; write operations are rejected\n\
                - Queries run verbatim with no parameter binding, so inline any literal values\n\
                - Results are JSON arrays with one object per row, in engine order"
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut resource = RawResource::new(SCHEMA_RESOURCE_URI, "schema");
        resource.description = Some(
            "Per-table column overview of the database: name, type, notnull, default, pk"
                .to_string(),
        );
        resource.mime_type = Some("application/json".to_string());
        Ok(ListResourcesResult {
            resources: vec![resource.no_annotation()],
            ..Default::default()
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        if request.uri != SCHEMA_RESOURCE_URI {
            return Err(McpError::resource_not_found(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        }
        let handler = SchemaToolHandler::new(self.db_path.clone());
        let overview = handler.schema_overview().await.map_err(McpError::from)?;
        let json = serde_json::to_string_pretty(&overview)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(json, request.uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> GatewayService {
        GatewayService::new("/tmp/test.db")
    }

    #[test]
    fn test_service_creation() {
        let _service = create_test_service();
    }

    #[test]
    fn test_tool_router_registers_both_tools() {
        // Router construction validates every tool's output schema; this
        // fails if either tool declares a non-object-rooted schema.
        let service = create_test_service();
        let tools = service.tool_router.list_all();
        assert_eq!(tools.len(), 2);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"get_schema"));
        assert!(names.contains(&"query"));
    }

    #[test]
    fn test_query_rows_serialize_as_array_text() {
        let mut row = serde_json::Map::new();
        row.insert("id".to_string(), serde_json::json!(1));
        row.insert("title".to_string(), serde_json::json!("Opening"));
        let text = rows_to_text(&[row]).unwrap();
        assert_eq!(text, r#"[{"id":1,"title":"Opening"}]"#);
    }

    #[test]
    fn test_query_rows_empty_result_is_empty_array() {
        assert_eq!(rows_to_text(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_server_info() {
        let service = create_test_service();
        let info = service.get_info();
        assert_eq!(info.server_info.name, "sqlite-mcp-gateway");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
    }

    #[test]
    fn test_instructions_mention_select_constraint() {
        let info = create_test_service().get_info();
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("SELECT"));
    }
}
