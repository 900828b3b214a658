//! MCP handler for the CRM tools.
//!
//! Tools are listed straight from the catalog, so the server needs no
//! per-tool code: every call goes through a `FrameworkTool`.

use crate::adapters::{FrameworkTool, ToolFailure};
use crate::error::ToolkitResult;
use crate::toolkit::Toolkit;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::sync::Arc;

/// The CRM MCP server.
#[derive(Clone)]
pub struct CrmMcpServer {
    tools: Arc<Vec<FrameworkTool>>,
}

/// Convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn failure_result(failure: &ToolFailure) -> CallToolResult {
    let payload = json!({"error": failure.message, "kind": failure.kind});
    CallToolResult::error(vec![Content::text(payload.to_string())])
}

impl CrmMcpServer {
    /// Create a server exposing the toolkit's framework tools.
    pub fn new(toolkit: &Toolkit) -> ToolkitResult<Self> {
        Ok(Self {
            tools: Arc::new(toolkit.framework_tools()?),
        })
    }

    pub fn tools(&self) -> &[FrameworkTool] {
        &self.tools
    }

    /// Tool definitions in catalog order.
    pub fn tool_definitions(&self) -> Vec<Tool> {
        self.tools.iter().map(FrameworkTool::to_mcp_tool).collect()
    }

    /// Run one tool call.
    ///
    /// Backend I/O is blocking, so invocation happens on the blocking pool.
    /// Tool failures are reported in-band with `is_error` set; only a
    /// panicked worker becomes a protocol error.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let Some(tool) = self.tools.iter().find(|t| t.name() == name).cloned() else {
            tracing::warn!(tool = %name, "Unknown tool requested");
            return Ok(failure_result(&ToolFailure {
                kind: "UnknownOperation".to_string(),
                message: name.to_string(),
                status: None,
            }));
        };

        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        let outcome = tokio::task::spawn_blocking(move || tool.invoke(&arguments))
            .await
            .map_err(to_mcp_error)?;

        Ok(match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(failure) => failure_result(&failure),
        })
    }
}

impl ServerHandler for CrmMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "crm-llm-tools".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("CRM tools - search, read, create and update contacts, log interactions, and summarize the pipeline.".into()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_definitions()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}
