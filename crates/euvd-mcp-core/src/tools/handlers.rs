//! Tool handlers
//!
//! Every handler builds one `RemoteRequest` from validated arguments, issues
//! one client call and shapes the outcome into a `ToolResponse`. Remote
//! failures become error envelopes; client faults are returned as errors.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::api::{ClientError, EuvdClient, QueryValue, RemoteOutcome, RemoteRequest};
use crate::types::ToolResponse;

use super::catalog::{ToolDefinition, ToolKind};
use super::schema::ValidatedArgs;

/// Faults a handler does not turn into an envelope
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Validation let through arguments the handler cannot use
    #[error("{tool} received validated arguments without '{field}'")]
    MissingArgument { tool: &'static str, field: &'static str },
}

/// Map a classified remote outcome to the response envelope
pub fn envelope_for(outcome: RemoteOutcome) -> ToolResponse {
    match outcome {
        RemoteOutcome::Success(body) => ToolResponse::json(&body),
        RemoteOutcome::HttpFailure { message, .. } => ToolResponse::api_error(message),
        RemoteOutcome::TransportFailure { message, .. } => ToolResponse::api_error(message),
    }
}

/// A tool implementation bound to its definition and the shared client
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The definition this handler serves
    fn definition(&self) -> &ToolDefinition;

    /// Client used for the remote call
    fn client(&self) -> &EuvdClient;

    /// Build the outbound request from validated arguments
    fn build_request(&self, args: &ValidatedArgs) -> Result<RemoteRequest, HandlerError>;

    /// Run the tool
    async fn handle(&self, args: ValidatedArgs) -> Result<ToolResponse, HandlerError> {
        let request = self.build_request(&args)?;
        let outcome = self.client().get(&request).await?;
        Ok(envelope_for(outcome))
    }
}

/// Parameterless feed tools
pub struct FeedTool {
    definition: ToolDefinition,
    client: Arc<EuvdClient>,
}

impl FeedTool {
    pub fn new(definition: ToolDefinition, client: Arc<EuvdClient>) -> Self {
        Self { definition, client }
    }
}

#[async_trait]
impl ToolHandler for FeedTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn client(&self) -> &EuvdClient {
        &self.client
    }

    fn build_request(&self, _args: &ValidatedArgs) -> Result<RemoteRequest, HandlerError> {
        Ok(RemoteRequest::new(self.definition.endpoint))
    }
}

/// `search_vulnerabilities`: supplied fields pass through untouched
pub struct SearchTool {
    definition: ToolDefinition,
    client: Arc<EuvdClient>,
}

impl SearchTool {
    pub fn new(definition: ToolDefinition, client: Arc<EuvdClient>) -> Self {
        Self { definition, client }
    }
}

#[async_trait]
impl ToolHandler for SearchTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn client(&self) -> &EuvdClient {
        &self.client
    }

    fn build_request(&self, args: &ValidatedArgs) -> Result<RemoteRequest, HandlerError> {
        Ok(RemoteRequest::new(self.definition.endpoint).with_json_params(args.iter()))
    }
}

/// Lookup by `id` (EUVD entries and advisories)
pub struct LookupTool {
    definition: ToolDefinition,
    client: Arc<EuvdClient>,
}

impl LookupTool {
    pub fn new(definition: ToolDefinition, client: Arc<EuvdClient>) -> Self {
        Self { definition, client }
    }
}

#[async_trait]
impl ToolHandler for LookupTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn client(&self) -> &EuvdClient {
        &self.client
    }

    fn build_request(&self, args: &ValidatedArgs) -> Result<RemoteRequest, HandlerError> {
        let id = args.str("id").ok_or(HandlerError::MissingArgument {
            tool: self.definition.name,
            field: "id",
        })?;
        Ok(RemoteRequest::new(self.definition.endpoint)
            .with_param("id", QueryValue::String(id.to_string())))
    }
}

/// Build the handler matching a definition's kind
pub fn handler_for(definition: &ToolDefinition, client: Arc<EuvdClient>) -> Arc<dyn ToolHandler> {
    let definition = definition.clone();
    match definition.kind {
        ToolKind::Feed => Arc::new(FeedTool::new(definition, client)),
        ToolKind::Search => Arc::new(SearchTool::new(definition, client)),
        ToolKind::Lookup => Arc::new(LookupTool::new(definition, client)),
    }
}
