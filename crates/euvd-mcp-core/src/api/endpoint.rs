//! Remote endpoints and request descriptions

use serde_json::{Map, Number, Value};

/// The fixed set of EUVD API endpoints this server calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    LastVulnerabilities,
    ExploitedVulnerabilities,
    CriticalVulnerabilities,
    Search,
    EnisaId,
    Advisory,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::LastVulnerabilities => "/lastvulnerabilities",
            Endpoint::ExploitedVulnerabilities => "/exploitedvulnerabilities",
            Endpoint::CriticalVulnerabilities => "/criticalvulnerabilities",
            Endpoint::Search => "/search",
            Endpoint::EnisaId => "/enisaid",
            Endpoint::Advisory => "/advisory",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// A primitive query-string value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    String(String),
    Number(Number),
    Bool(bool),
}

impl QueryValue {
    /// Convert a JSON primitive; null and composite values have no query form
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(QueryValue::String(s.clone())),
            Value::Number(n) => Some(QueryValue::Number(n.clone())),
            Value::Bool(b) => Some(QueryValue::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Textual form sent on the wire
    pub fn render(&self) -> String {
        match self {
            QueryValue::String(s) => s.clone(),
            QueryValue::Number(n) => n.to_string(),
            QueryValue::Bool(b) => b.to_string(),
        }
    }
}

/// One outbound GET: the endpoint plus the query parameters actually supplied
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRequest {
    pub endpoint: Endpoint,
    query: Vec<(String, QueryValue)>,
}

impl RemoteRequest {
    /// Request without query parameters
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            query: Vec::new(),
        }
    }

    /// Add a query parameter
    pub fn with_param(mut self, name: impl Into<String>, value: QueryValue) -> Self {
        self.query.push((name.into(), value));
        self
    }

    /// Add every primitive entry of `params` in iteration order, skipping the rest
    pub fn with_json_params<'a>(
        mut self,
        params: impl IntoIterator<Item = (&'a String, &'a Value)>,
    ) -> Self {
        for (name, value) in params {
            if let Some(value) = QueryValue::from_json(value) {
                self.query.push((name.clone(), value));
            }
        }
        self
    }

    /// The supplied parameters, in insertion order
    pub fn params(&self) -> &[(String, QueryValue)] {
        &self.query
    }

    /// Parameters rendered as `(name, value)` string pairs
    pub fn query_pairs(&self) -> Vec<(&str, String)> {
        self.query
            .iter()
            .map(|(name, value)| (name.as_str(), value.render()))
            .collect()
    }

    /// Parameters as a JSON object, for logging and inspection
    pub fn params_json(&self) -> Map<String, Value> {
        self.query
            .iter()
            .map(|(name, value)| {
                let json = match value {
                    QueryValue::String(s) => Value::String(s.clone()),
                    QueryValue::Number(n) => Value::Number(n.clone()),
                    QueryValue::Bool(b) => Value::Bool(*b),
                };
                (name.clone(), json)
            })
            .collect()
    }
}
