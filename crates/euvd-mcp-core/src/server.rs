//! MCP server exposing the tool registry
//!
//! `EuvdMcpServer` implements rmcp's `ServerHandler`: `tools/list` returns the
//! registry's definitions and `tools/call` goes through
//! `ToolRegistry::dispatch`. Error envelopes are successful results; only
//! dispatch failures become JSON-RPC errors.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, ErrorData, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    RoleServer, ServerHandler,
};
use serde_json::Value;
use thiserror::Error;

use crate::api::{ClientError, EuvdClient};
use crate::config::ServerConfig;
use crate::logging::SharedLogger;
use crate::log_debug;
use crate::tools::{DispatchError, RegistryError, ToolInfo, ToolRegistry};
use crate::types::{ContentBlock, ToolInvocation, ToolResponse};

const INSTRUCTIONS: &str = "Query the ENISA EU Vulnerability Database (EUVD): latest, exploited \
and critical vulnerabilities, filtered search, and lookups of EUVD entries and advisories by ID.";

/// Errors while assembling the server from configuration
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// MCP server for the EUVD tools
#[derive(Clone)]
pub struct EuvdMcpServer {
    registry: Arc<ToolRegistry>,
    name: String,
    version: String,
    logger: SharedLogger,
}

impl EuvdMcpServer {
    /// Create a server around an existing registry
    pub fn new(config: &ServerConfig, registry: Arc<ToolRegistry>, logger: SharedLogger) -> Self {
        Self {
            registry,
            name: config.server_name.clone(),
            version: config.server_version.clone(),
            logger,
        }
    }

    /// Build the client, the default registry and the server from `config`
    pub fn from_config(config: &ServerConfig, logger: SharedLogger) -> Result<Self, ServerError> {
        let client = Arc::new(EuvdClient::new(config, Arc::clone(&logger))?);
        let registry = ToolRegistry::with_defaults(client, Arc::clone(&logger))?;
        Ok(Self::new(config, Arc::new(registry), logger))
    }

    /// Server identity announced in the handshake
    pub fn implementation(&self) -> Implementation {
        Implementation {
            name: self.name.clone(),
            title: Some("EUVD ENISA".to_string()),
            version: self.version.clone(),
            website_url: None,
            icons: None,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Tool list in MCP form
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list().into_iter().map(to_mcp_tool).collect()
    }

    /// Dispatch one call and map the result to MCP types
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let invocation = ToolInvocation {
            tool_name: name.to_string(),
            arguments: arguments.unwrap_or_default(),
        };

        match self.registry.dispatch(invocation).await {
            Ok(response) => Ok(to_call_tool_result(response)),
            Err(e) => {
                log_debug!(self.logger, "[EuvdMcpServer] tools/call {} rejected: {}", name, e);
                Err(to_error_data(e))
            }
        }
    }
}

fn to_mcp_tool(info: ToolInfo) -> Tool {
    let schema: JsonObject = match info.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(info.name, info.description, Arc::new(schema))
}

fn to_call_tool_result(response: ToolResponse) -> CallToolResult {
    let content = response
        .content
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => Content::text(text),
        })
        .collect();

    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

fn to_error_data(error: DispatchError) -> ErrorData {
    match error {
        DispatchError::ToolNotFound(name) => {
            ErrorData::invalid_params(format!("Tool not found: {}", name), None)
        }
        DispatchError::InvalidArguments(e) => {
            let data = e.to_json();
            ErrorData::invalid_params(e.to_string(), Some(data))
        }
        fault @ DispatchError::Fault { .. } => ErrorData::internal_error(fault.to_string(), None),
    }
}

impl ServerHandler for EuvdMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: self.implementation(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.invoke(&request.name, request.arguments).await
    }
}
