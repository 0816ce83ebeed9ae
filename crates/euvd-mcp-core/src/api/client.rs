//! HTTP client for the EUVD REST API
//!
//! One `get` is exactly one outbound GET: no retries, no caching.

use serde_json::Value;

use crate::config::ServerConfig;
use crate::logging::SharedLogger;
use crate::{log_debug, log_warn};

use super::endpoint::RemoteRequest;
use super::error::{ClientError, ClientResult};
use super::outcome::RemoteOutcome;

/// Client for the EUVD API, built once at startup and shared read-only
#[derive(Clone)]
pub struct EuvdClient {
    http: reqwest::Client,
    base_url: String,
    logger: SharedLogger,
}

impl EuvdClient {
    /// Create a client from the server configuration
    pub fn new(config: &ServerConfig, logger: SharedLogger) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            logger,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET for `request` and classify the result
    pub async fn get(&self, request: &RemoteRequest) -> ClientResult<RemoteOutcome> {
        let path = request.endpoint.path();
        let url = format!("{}{}", self.base_url, path);
        log_debug!(
            self.logger,
            "[EuvdClient] GET {} {}",
            path,
            Value::Object(request.params_json())
        );

        let response = match self.http.get(&url).query(&request.query_pairs()).send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() => {
                return Err(ClientError::InvalidRequest {
                    path: path.to_string(),
                    source: e,
                });
            }
            Err(e) => return Ok(self.transport_failure(path, e)),
        };

        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => return Ok(self.transport_failure(path, e)),
        };

        if !(200..300).contains(&status) {
            let message = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_else(|| RemoteOutcome::generic_status_message(status));
            log_warn!(self.logger, "[EuvdClient] {} answered {}: {}", path, status, message);
            return Ok(RemoteOutcome::HttpFailure { status, message });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RemoteOutcome::Success(Value::Null));
        }

        let parsed = serde_json::from_slice(&body).map_err(|source| ClientError::MalformedBody {
            path: path.to_string(),
            status,
            source,
        })?;
        Ok(RemoteOutcome::Success(parsed))
    }

    fn transport_failure(&self, path: &str, error: reqwest::Error) -> RemoteOutcome {
        let message = if error.is_timeout() {
            "Request timed out"
        } else if error.is_connect() {
            "Could not connect to the EUVD API"
        } else {
            "Network error while contacting the EUVD API"
        };
        log_warn!(self.logger, "[EuvdClient] {} failed: {}", path, error);

        RemoteOutcome::TransportFailure {
            message: message.to_string(),
            detail: error.to_string(),
        }
    }
}

impl std::fmt::Debug for EuvdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EuvdClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mockito::{Matcher, Server};
    use serde_json::json;

    use crate::api::{Endpoint, QueryValue};
    use crate::logging::NoOpLogger;

    fn client_for(base_url: &str) -> EuvdClient {
        let config = ServerConfig::default().with_base_url(base_url);
        EuvdClient::new(&config, Arc::new(NoOpLogger::new())).unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_parsed_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/lastvulnerabilities")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"foo": "bar"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let outcome = client
            .get(&RemoteRequest::new(Endpoint::LastVulnerabilities))
            .await
            .unwrap();

        assert_eq!(outcome, RemoteOutcome::Success(json!({"foo": "bar"})));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_query_parameters_are_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/enisaid")
            .match_query(Matcher::UrlEncoded("id".into(), "EUVD-2024-001".into()))
            .with_status(200)
            .with_body(r#"{"id": "EUVD-2024-001"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let request = RemoteRequest::new(Endpoint::EnisaId)
            .with_param("id", QueryValue::String("EUVD-2024-001".to_string()));
        let outcome = client.get(&request).await.unwrap();

        assert!(outcome.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_failure_uses_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/advisory")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Advisory not found"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let outcome = client.get(&RemoteRequest::new(Endpoint::Advisory)).await.unwrap();

        assert_eq!(
            outcome,
            RemoteOutcome::HttpFailure {
                status: 404,
                message: "Advisory not found".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_http_failure_without_message_is_generic() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/search")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let outcome = client.get(&RemoteRequest::new(Endpoint::Search)).await.unwrap();

        assert_eq!(
            outcome.failure_message(),
            Some("Request failed with status code 500")
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        // Reserve a port, then free it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client_for(&format!("http://127.0.0.1:{}/api", port));
        let outcome = client
            .get(&RemoteRequest::new(Endpoint::CriticalVulnerabilities))
            .await
            .unwrap();

        match outcome {
            RemoteOutcome::TransportFailure { message, detail } => {
                assert!(!message.is_empty());
                assert!(!message.contains("undefined"));
                assert!(!detail.is_empty());
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_unhandled() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/exploitedvulnerabilities")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client
            .get(&RemoteRequest::new(Endpoint::ExploitedVulnerabilities))
            .await;

        assert!(matches!(
            result,
            Err(ClientError::MalformedBody { status: 200, .. })
        ));
    }
}
