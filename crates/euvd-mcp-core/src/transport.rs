//! Transport bootstrap
//!
//! Connects an `EuvdMcpServer` to a transport and keeps serving until the
//! host disconnects. A failed connect is the one unrecoverable startup
//! condition; callers are expected to report it and exit non-zero.

use rmcp::{transport::IntoTransport, RoleServer, ServiceExt};
use thiserror::Error;

use crate::logging::SharedLogger;
use crate::server::EuvdMcpServer;
use crate::{log_error, log_info};

/// Readiness line written once the host handshake completes
pub const READY_MESSAGE: &str = "EUVD ENISA MCP server running on stdio";

/// Prefix of the line written when startup fails
pub const FAILED_MESSAGE: &str = "EUVD ENISA MCP server failed to start";

/// Transport errors
#[derive(Error, Debug)]
pub enum TransportError {
    /// The protocol handshake with the host failed
    #[error("Connection failed: {0}")]
    Connect(String),

    /// The service loop terminated abnormally
    #[error("Service loop aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type TransportResult<T> = Result<T, TransportError>;

/// Serve `server` over `transport` until the peer disconnects
pub async fn serve<T, E, A>(
    server: EuvdMcpServer,
    transport: T,
    logger: SharedLogger,
) -> TransportResult<()>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let running = server.serve(transport).await.map_err(|e| {
        let error = TransportError::Connect(e.to_string());
        log_error!(logger, "{}: {}", FAILED_MESSAGE, error);
        error
    })?;

    log_info!(logger, "{}", READY_MESSAGE);
    running.waiting().await?;
    log_info!(logger, "Host disconnected, shutting down");
    Ok(())
}

/// Serve `server` on the process's stdin/stdout
pub async fn serve_stdio(server: EuvdMcpServer, logger: SharedLogger) -> TransportResult<()> {
    serve(server, rmcp::transport::stdio(), logger).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mockito::{Matcher, Server};
    use rmcp::model::{CallToolRequestParams, RawContent};
    use serde_json::{json, Value};

    use crate::config::ServerConfig;
    use crate::logging::{LogLevel, MemoryLogger, NoOpLogger};

    fn server_for(base_url: &str) -> EuvdMcpServer {
        let config = ServerConfig::default().with_base_url(base_url);
        EuvdMcpServer::from_config(&config, Arc::new(NoOpLogger::new())).unwrap()
    }

    fn call(name: &str, arguments: Value) -> CallToolRequestParams {
        CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        }
    }

    #[tokio::test]
    async fn test_connect_failure_is_reported() {
        // The host hangs up before the handshake
        let logger = Arc::new(MemoryLogger::new());
        let result = serve(
            server_for("http://127.0.0.1:1/api"),
            (tokio::io::empty(), tokio::io::sink()),
            logger.clone(),
        )
        .await;

        assert!(matches!(result, Err(TransportError::Connect(_))));
        assert!(logger.contains(LogLevel::Error, FAILED_MESSAGE));
        assert!(!logger.contains(LogLevel::Info, READY_MESSAGE));
    }

    #[tokio::test]
    async fn test_end_to_end_over_duplex() {
        let mut api = Server::new_async().await;
        api.mock("GET", "/enisaid")
            .match_query(Matcher::UrlEncoded("id".into(), "EUVD-2024-001".into()))
            .with_status(200)
            .with_body(r#"{"id": "EUVD-2024-001", "title": "Test EUVD Entry"}"#)
            .expect(1)
            .create_async()
            .await;

        let (server_io, client_io) = tokio::io::duplex(64 * 1024);
        let logger = Arc::new(MemoryLogger::new());
        let serving = tokio::spawn(serve(server_for(&api.url()), server_io, logger.clone()));

        let client = ().serve(client_io).await.unwrap();
        let peer = client.peer_info().unwrap();
        assert_eq!(peer.server_info.name, "euvd-enisa-mcp");

        let tools = client.list_tools(Default::default()).await.unwrap();
        assert_eq!(tools.tools.len(), 6);

        let result = client
            .call_tool(call("get_euvd_by_id", json!({"id": "EUVD-2024-001"})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        let text = match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        };
        assert!(text.contains(r#""id": "EUVD-2024-001""#));

        // Validation failures and unknown tools are protocol errors
        assert!(client.call_tool(call("get_advisory_by_id", json!({}))).await.is_err());
        assert!(client.call_tool(call("nope", json!({}))).await.is_err());

        // The server keeps serving after failed invocations
        let again = client.list_tools(Default::default()).await.unwrap();
        assert_eq!(again.tools.len(), 6);

        client.cancel().await.unwrap();
        serving.await.unwrap().unwrap();
        assert!(logger.contains(LogLevel::Info, READY_MESSAGE));
    }
}
