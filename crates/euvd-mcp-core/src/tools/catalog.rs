//! The six EUVD tool definitions

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Endpoint;

use super::schema::{FieldSpec, ParamSchema};

/// Stable tool names
pub mod names {
    pub const GET_LAST_VULNERABILITIES: &str = "get_last_vulnerabilities";
    pub const GET_EXPLOITED_VULNERABILITIES: &str = "get_exploited_vulnerabilities";
    pub const GET_CRITICAL_VULNERABILITIES: &str = "get_critical_vulnerabilities";
    pub const SEARCH_VULNERABILITIES: &str = "search_vulnerabilities";
    pub const GET_EUVD_BY_ID: &str = "get_euvd_by_id";
    pub const GET_ADVISORY_BY_ID: &str = "get_advisory_by_id";
}

/// How a tool turns its arguments into a remote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Fixed feed, no parameters
    Feed,
    /// Every supplied parameter passes through to the query string
    Search,
    /// Single required `id`
    Lookup,
}

/// A tool: name, description, parameter schema, and the endpoint it calls
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ToolKind,
    pub endpoint: Endpoint,
    pub schema: ParamSchema,
}

impl ToolDefinition {
    fn feed(name: &'static str, description: &'static str, endpoint: Endpoint) -> Self {
        Self {
            name,
            description,
            kind: ToolKind::Feed,
            endpoint,
            schema: ParamSchema::empty(),
        }
    }

    fn lookup(name: &'static str, description: &'static str, endpoint: Endpoint) -> Self {
        Self {
            name,
            description,
            kind: ToolKind::Lookup,
            endpoint,
            schema: ParamSchema::new([FieldSpec::string("id").required()]),
        }
    }
}

/// Name, description and JSON Schema, as advertised to the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for tool parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl From<&ToolDefinition> for ToolInfo {
    fn from(definition: &ToolDefinition) -> Self {
        Self {
            name: definition.name.to_string(),
            description: definition.description.to_string(),
            input_schema: Value::Object(definition.schema.to_json_schema()),
        }
    }
}

fn search_schema() -> ParamSchema {
    ParamSchema::new([
        FieldSpec::number("fromScore").range(0.0, 10.0).describe("Minimum CVSS score"),
        FieldSpec::number("toScore").range(0.0, 10.0).describe("Maximum CVSS score"),
        FieldSpec::number("fromEpss").range(0.0, 100.0).describe("Minimum EPSS percentage"),
        FieldSpec::number("toEpss").range(0.0, 100.0).describe("Maximum EPSS percentage"),
        FieldSpec::string("fromDate").describe("Earliest publication date (YYYY-MM-DD)"),
        FieldSpec::string("toDate").describe("Latest publication date (YYYY-MM-DD)"),
        FieldSpec::string("product"),
        FieldSpec::string("vendor"),
        FieldSpec::string("assigner"),
        FieldSpec::boolean("exploited").describe("Only actively exploited vulnerabilities"),
        FieldSpec::number("page").describe("Page number"),
        FieldSpec::string("text").describe("Free-text keywords"),
        FieldSpec::number("size").describe("Page size"),
    ])
}

/// All tool definitions, in registration order
pub static CATALOG: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    vec![
        ToolDefinition::feed(
            names::GET_LAST_VULNERABILITIES,
            "Retrieves the latest vulnerabilities",
            Endpoint::LastVulnerabilities,
        ),
        ToolDefinition::feed(
            names::GET_EXPLOITED_VULNERABILITIES,
            "Retrieves vulnerabilities that are being actively exploited",
            Endpoint::ExploitedVulnerabilities,
        ),
        ToolDefinition::feed(
            names::GET_CRITICAL_VULNERABILITIES,
            "Retrieves vulnerabilities with critical severity",
            Endpoint::CriticalVulnerabilities,
        ),
        ToolDefinition {
            name: names::SEARCH_VULNERABILITIES,
            description: "Searches for vulnerabilities based on various criteria",
            kind: ToolKind::Search,
            endpoint: Endpoint::Search,
            schema: search_schema(),
        },
        ToolDefinition::lookup(
            names::GET_EUVD_BY_ID,
            "Gets detailed information about a vulnerability by its EUVD ID",
            Endpoint::EnisaId,
        ),
        ToolDefinition::lookup(
            names::GET_ADVISORY_BY_ID,
            "Gets an advisory by its ID",
            Endpoint::Advisory,
        ),
    ]
});

/// Look up a definition by tool name
pub fn definition(name: &str) -> Option<&'static ToolDefinition> {
    CATALOG.iter().find(|d| d.name == name)
}
