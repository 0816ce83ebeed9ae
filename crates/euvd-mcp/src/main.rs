//! `euvd-enisa-mcp`: EUVD tools over MCP on stdio
//!
//! Takes no flags and reads no environment. Exits 1 if the server cannot be
//! built, the host handshake fails, or the service loop aborts.

use std::process::ExitCode;
use std::sync::Arc;

use euvd_mcp_core::{
    log_error,
    transport::{self, FAILED_MESSAGE},
    EuvdMcpServer, ServerConfig, SharedLogger, StderrLogger, TransportError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let logger: SharedLogger = Arc::new(StderrLogger::new());

    let server = match EuvdMcpServer::from_config(&ServerConfig::default(), Arc::clone(&logger)) {
        Ok(server) => server,
        Err(e) => {
            log_error!(logger, "{}: {}", FAILED_MESSAGE, e);
            return ExitCode::FAILURE;
        }
    };

    match transport::serve_stdio(server, Arc::clone(&logger)).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already reported by the transport
        Err(TransportError::Connect(_)) => ExitCode::FAILURE,
        Err(e) => {
            log_error!(logger, "{}", e);
            ExitCode::FAILURE
        }
    }
}
