//! Tool registry
//!
//! The ToolRegistry is the central component for:
//! - Binding each tool name to its definition and handler
//! - Advertising tool schemas to the host
//! - Validating arguments before any handler runs
//! - Dispatching invocations and classifying their result
//!
//! The registry is filled once at startup and read-only afterwards, so it is
//! shared between concurrent invocations without locking.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::api::EuvdClient;
use crate::logging::SharedLogger;
use crate::types::{ToolInvocation, ToolResponse};
use crate::{log_debug, log_error, log_info, log_warn};

use super::catalog::{ToolInfo, CATALOG};
use super::handlers::{handler_for, HandlerError, ToolHandler};
use super::schema::ValidationError;

/// Errors while building the registry
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Why an invocation failed instead of producing an envelope
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No tool with that name; no handler ran
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments rejected by the schema; no remote call was made
    #[error(transparent)]
    InvalidArguments(#[from] ValidationError),

    /// The handler hit a fault outside the remote outcome taxonomy
    #[error("Tool {tool} failed: {source}")]
    Fault {
        tool: String,
        #[source]
        source: HandlerError,
    },
}

/// Registry of the tools this server exposes
pub struct ToolRegistry {
    /// Handlers by tool name
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    /// Registration order, used for listing
    order: Vec<String>,
    /// Logger
    logger: SharedLogger,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new(logger: SharedLogger) -> Self {
        Self {
            handlers: HashMap::new(),
            order: Vec::new(),
            logger,
        }
    }

    /// Create a registry holding every catalog tool, bound to `client`
    pub fn with_defaults(client: Arc<EuvdClient>, logger: SharedLogger) -> RegistryResult<Self> {
        let mut registry = Self::new(logger);
        for definition in CATALOG.iter() {
            registry.register(handler_for(definition, Arc::clone(&client)))?;
        }
        log_info!(
            registry.logger,
            "[ToolRegistry] Registered {} tools",
            registry.len()
        );
        Ok(registry)
    }

    /// Register a handler under its definition's name
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) -> RegistryResult<()> {
        let name = handler.definition().name.to_string();
        if self.handlers.contains_key(&name) {
            return Err(RegistryError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Tools in registration order
    pub fn list(&self) -> Vec<ToolInfo> {
        self.order
            .iter()
            .filter_map(|name| self.handlers.get(name))
            .map(|handler| ToolInfo::from(handler.definition()))
            .collect()
    }

    /// Get a handler by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Get count of registered tools
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route an invocation to its handler
    ///
    /// `Ok` covers every envelope, including `is_error` ones. `Err` means the
    /// invocation failed: unknown tool, rejected arguments, or a handler fault.
    pub async fn dispatch(&self, invocation: ToolInvocation) -> Result<ToolResponse, DispatchError> {
        let ToolInvocation { tool_name, arguments } = invocation;

        let handler = match self.handlers.get(&tool_name) {
            Some(handler) => handler,
            None => {
                log_warn!(self.logger, "[ToolRegistry] Unknown tool: {}", tool_name);
                return Err(DispatchError::ToolNotFound(tool_name));
            }
        };

        let args = handler
            .definition()
            .schema
            .validate(&tool_name, &arguments)
            .map_err(|e| {
                log_warn!(self.logger, "[ToolRegistry] {}", e);
                DispatchError::InvalidArguments(e)
            })?;

        log_info!(self.logger, "[ToolRegistry] Calling tool: {}", tool_name);
        match handler.handle(args).await {
            Ok(response) => {
                log_debug!(
                    self.logger,
                    "[ToolRegistry] {} completed (is_error: {})",
                    tool_name,
                    response.is_error
                );
                Ok(response)
            }
            Err(source) => {
                log_error!(self.logger, "[ToolRegistry] {} failed: {}", tool_name, source);
                Err(DispatchError::Fault {
                    tool: tool_name,
                    source,
                })
            }
        }
    }
}
