//! EUVD MCP Core
//!
//! Exposes the ENISA EU Vulnerability Database REST API as Model Context
//! Protocol tools.
//!
//! ## Dispatch
//!
//! A `tools/call` request is routed by name through the `ToolRegistry`,
//! validated against the tool's `ParamSchema`, turned into one GET against
//! the EUVD API, and shaped into a `ToolResponse` envelope. Remote failures
//! come back as envelopes with `is_error` set; unknown tools, invalid
//! arguments and unclassifiable faults fail the call.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use euvd_mcp_core::{EuvdMcpServer, ServerConfig, StderrLogger, transport};
//!
//! let logger = Arc::new(StderrLogger::new());
//! let server = EuvdMcpServer::from_config(&ServerConfig::default(), logger.clone())?;
//! transport::serve_stdio(server, logger).await?;
//! ```

pub mod logging;
pub mod config;
pub mod types;
pub mod api;
pub mod tools;
pub mod server;
pub mod transport;

// Re-export commonly used types
pub use types::{ToolInvocation, ToolResponse, ContentBlock};

pub use logging::{Logger, LogLevel, SharedLogger, NoOpLogger, StderrLogger, MemoryLogger};

pub use config::{ServerConfig, ConfigError, ConfigResult};

pub use api::{EuvdClient, Endpoint, RemoteRequest, RemoteOutcome, ClientError};

pub use tools::{ToolRegistry, ToolDefinition, ToolInfo, DispatchError, ValidationError};

pub use server::{EuvdMcpServer, ServerError};

pub use transport::{TransportError, TransportResult};
