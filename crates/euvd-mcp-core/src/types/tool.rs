//! Tool invocation and response envelope types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix of every error envelope produced from a remote failure
pub const API_ERROR_PREFIX: &str = "EUVD API error: ";

/// A single tool call received from the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool being called
    #[serde(rename = "toolName")]
    pub tool_name: String,
    /// Arguments keyed by parameter name
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    /// Create an invocation without arguments
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: Map::new(),
        }
    }

    /// Create an invocation from a JSON value; non-object values yield no arguments
    pub fn with_arguments(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: match arguments {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    /// Add a single argument
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }
}

/// Content block inside a response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// Envelope every tool returns, success or failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Exactly one text block
    pub content: Vec<ContentBlock>,
    /// Whether this response represents an application-level error
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl ToolResponse {
    /// Successful response carrying `body` as indented JSON
    pub fn json(body: &Value) -> Self {
        // Serializing a `Value` cannot fail: all map keys are strings.
        let text = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: false,
        }
    }

    /// Error response for a failed remote call
    pub fn api_error(message: impl AsRef<str>) -> Self {
        Self {
            content: vec![ContentBlock::text(format!(
                "{}{}",
                API_ERROR_PREFIX,
                message.as_ref()
            ))],
            is_error: true,
        }
    }

    /// Text of the first content block
    pub fn text(&self) -> &str {
        match self.content.first() {
            Some(ContentBlock::Text { text }) => text,
            None => "",
        }
    }
}
