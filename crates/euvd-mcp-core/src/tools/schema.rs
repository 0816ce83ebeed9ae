//! Declarative parameter schemas
//!
//! A `ParamSchema` is a list of `FieldSpec` descriptors. The same descriptors
//! drive argument validation and the JSON Schema advertised to the host.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Primitive kind of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
}

impl FieldKind {
    /// JSON Schema `type` keyword
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// JSON type name of a value, for violation messages
fn json_type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Descriptor for one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Inclusive lower bound, numbers only
    pub min: Option<f64>,
    /// Inclusive upper bound, numbers only
    pub max: Option<f64>,
    pub description: Option<&'static str>,
}

impl FieldSpec {
    fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            min: None,
            max: None,
            description: None,
        }
    }

    /// Optional string parameter
    pub fn string(name: &'static str) -> Self {
        Self::optional(name, FieldKind::String)
    }

    /// Optional number parameter
    pub fn number(name: &'static str) -> Self {
        Self::optional(name, FieldKind::Number)
    }

    /// Optional boolean parameter
    pub fn boolean(name: &'static str) -> Self {
        Self::optional(name, FieldKind::Boolean)
    }

    /// Mark the parameter as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Constrain a number to `[min, max]`
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    fn check(&self, value: &Value) -> Result<(), Violation> {
        if !self.kind.accepts(value) {
            return Err(Violation {
                field: self.name.to_string(),
                kind: ViolationKind::WrongType {
                    expected: self.kind,
                    found: json_type_of(value),
                },
            });
        }

        if let Some(actual) = value.as_f64() {
            let below = self.min.map_or(false, |min| actual < min);
            let above = self.max.map_or(false, |max| actual > max);
            if below || above {
                return Err(Violation {
                    field: self.name.to_string(),
                    kind: ViolationKind::OutOfRange {
                        min: self.min,
                        max: self.max,
                        actual,
                    },
                });
            }
        }

        Ok(())
    }

    fn json_schema(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.kind.json_type()));
        if let Some(min) = self.min {
            property.insert("minimum".to_string(), json!(min));
        }
        if let Some(max) = self.max {
            property.insert("maximum".to_string(), json!(max));
        }
        if let Some(description) = self.description {
            property.insert("description".to_string(), json!(description));
        }
        Value::Object(property)
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Missing,
    WrongType {
        expected: FieldKind,
        found: &'static str,
    },
    OutOfRange {
        min: Option<f64>,
        max: Option<f64>,
        actual: f64,
    },
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: required", self.field),
            ViolationKind::WrongType { expected, found } => write!(
                f,
                "{}: expected {}, received {}",
                self.field,
                expected.json_type(),
                found
            ),
            ViolationKind::OutOfRange { min, max, actual } => match (min, max) {
                (Some(min), Some(max)) => write!(
                    f,
                    "{}: must be between {} and {}, received {}",
                    self.field, min, max, actual
                ),
                (Some(min), None) => write!(f, "{}: must be at least {}, received {}", self.field, min, actual),
                (None, Some(max)) => write!(f, "{}: must be at most {}, received {}", self.field, max, actual),
                (None, None) => write!(f, "{}: out of range, received {}", self.field, actual),
            },
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Arguments rejected before any remote call
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid arguments for {tool}: {}", summarize(.violations))]
pub struct ValidationError {
    pub tool: String,
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Names of the offending fields
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }

    /// Structured form attached to the protocol error
    pub fn to_json(&self) -> Value {
        json!({
            "tool": self.tool,
            "violations": self
                .violations
                .iter()
                .map(|v| json!({"field": v.field, "message": v.to_string()}))
                .collect::<Vec<_>>(),
        })
    }
}

/// Arguments that passed validation, in schema order, absent fields omitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedArgs {
    values: Vec<(String, Value)>,
}

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter().map(|(name, value)| (name, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered set of parameter descriptors for one tool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSchema {
    fields: Vec<FieldSpec>,
}

impl ParamSchema {
    /// Schema for a tool without parameters
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate `arguments` against the schema
    ///
    /// Keys the schema does not declare are dropped. Every violation is
    /// reported, not just the first.
    pub fn validate(&self, tool: &str, arguments: &Map<String, Value>) -> Result<ValidatedArgs, ValidationError> {
        let mut values = Vec::new();
        let mut violations = Vec::new();

        for field in &self.fields {
            match arguments.get(field.name) {
                None if field.required => violations.push(Violation {
                    field: field.name.to_string(),
                    kind: ViolationKind::Missing,
                }),
                None => {}
                Some(value) => match field.check(value) {
                    Ok(()) => values.push((field.name.to_string(), value.clone())),
                    Err(violation) => violations.push(violation),
                },
            }
        }

        if violations.is_empty() {
            Ok(ValidatedArgs { values })
        } else {
            Err(ValidationError {
                tool: tool.to_string(),
                violations,
            })
        }
    }

    /// JSON Schema object describing the parameters
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_schema() -> ParamSchema {
        ParamSchema::new([
            FieldSpec::number("fromScore").range(0.0, 10.0),
            FieldSpec::string("product"),
            FieldSpec::boolean("exploited"),
            FieldSpec::string("id").required(),
        ])
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_valid_arguments_keep_schema_order() {
        let validated = score_schema()
            .validate("t", &args(json!({"id": "X", "fromScore": 7, "extra": "dropped"})))
            .unwrap();

        let names: Vec<&String> = validated.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["fromScore", "id"]);
        assert_eq!(validated.get("fromScore"), Some(&json!(7)));
        assert_eq!(validated.str("id"), Some("X"));
        assert!(validated.get("extra").is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let err = score_schema().validate("get_euvd_by_id", &Map::new()).unwrap_err();

        assert_eq!(err.fields(), vec!["id"]);
        assert_eq!(err.violations[0].kind, ViolationKind::Missing);
        assert_eq!(err.to_string(), "Invalid arguments for get_euvd_by_id: id: required");
    }

    #[test]
    fn test_all_violations_reported() {
        let err = score_schema()
            .validate(
                "t",
                &args(json!({"fromScore": 11, "product": 3, "exploited": "yes", "id": null})),
            )
            .unwrap_err();

        assert_eq!(err.fields(), vec!["fromScore", "product", "exploited", "id"]);
        assert!(matches!(err.violations[0].kind, ViolationKind::OutOfRange { actual, .. } if actual == 11.0));
        assert_eq!(
            err.violations[2].to_string(),
            "exploited: expected boolean, received string"
        );
        assert_eq!(err.violations[3].to_string(), "id: expected string, received null");
        assert_eq!(err.to_json()["violations"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let schema = score_schema();
        for score in [0.0, 10.0] {
            assert!(schema
                .validate("t", &args(json!({"id": "X", "fromScore": score})))
                .is_ok());
        }
        assert!(schema
            .validate("t", &args(json!({"id": "X", "fromScore": -0.1})))
            .is_err());
    }

    #[test]
    fn test_json_schema() {
        let schema = score_schema().to_json_schema();

        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["properties"]["fromScore"]["minimum"], json!(0.0));
        assert_eq!(schema["properties"]["fromScore"]["maximum"], json!(10.0));
        assert_eq!(schema["properties"]["exploited"]["type"], json!("boolean"));
        assert_eq!(schema["required"], json!(["id"]));

        let empty = ParamSchema::empty().to_json_schema();
        assert_eq!(Value::Object(empty), json!({"type": "object", "properties": {}}));
    }
}
