//! Parameter validation against a declared schema.
//!
//! [`validate`] walks a schema depth-first and collects every finding into a
//! [`ValidationReport`]; it never raises. Matching is exact — a numeric
//! string is not an `int`, a `0`/`1` integer is not a `bool` — and keys
//! present in the parameters but absent from the schema are ignored: the
//! validator is schema-driven, not a strict no-extra-fields check.

use std::fmt;

use minimcp_core::diagnostics::{self, Diagnostic};
use minimcp_core::{DynamicValue, ValueMap};

use crate::schema::{PrimitiveKind, SchemaMap, SchemaNode};

/// What a single validation finding means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A declared parameter is absent.
    MissingParameter,
    /// The supplied value has the wrong dynamic type.
    TypeMismatch {
        /// The type the schema declared.
        expected: &'static str,
    },
    /// The schema itself is incomplete for its declared type.
    InvalidSchema {
        /// What the schema lacks.
        detail: &'static str,
    },
    /// The schema declares a type outside the grammar.
    UnsupportedSchemaType {
        /// The unrecognized type tag.
        found: String,
    },
    /// The schema is neither a bare tag nor a well-formed descriptor.
    InvalidSchemaDefinition,
}

/// A path-qualified validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location of the finding inside the parameter mapping.
    pub path: String,
    /// What went wrong there.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a finding at the given path.
    #[must_use]
    pub fn new(path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// The human-readable message for this finding.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.kind {
            ValidationErrorKind::MissingParameter => "missing parameter".to_owned(),
            ValidationErrorKind::TypeMismatch { expected } => {
                format!("expected {expected}")
            }
            ValidationErrorKind::InvalidSchema { detail } => {
                format!("invalid schema: {detail}")
            }
            ValidationErrorKind::UnsupportedSchemaType { found } => {
                format!("unsupported schema type \"{found}\"")
            }
            ValidationErrorKind::InvalidSchemaDefinition => {
                "invalid schema definition".to_owned()
            }
        }
    }

    /// This finding as a shared path-qualified diagnostic.
    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.path.clone(), self.message())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_diagnostic())
    }
}

/// The aggregated outcome of validating a parameter mapping.
///
/// Findings are data, not faults: validation always completes, and callers
/// decide whether a non-empty report is a hard failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Every finding, in discovery order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// True when no finding was recorded anywhere in the walk.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages, in discovery order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Structured `(path, message)` diagnostics for programmatic use.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ValidationError::to_diagnostic).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Validates a parameter mapping against the declared field schemas.
///
/// Depth-first over `expected`: every declared field is checked, all
/// findings across all fields are collected, and nothing short-circuits.
#[must_use]
pub fn validate(params: &ValueMap, expected: &SchemaMap) -> ValidationReport {
    let mut errors = Vec::new();
    validate_fields(params, expected, "", &mut errors);
    ValidationReport { errors }
}

/// Validates against a schema mapping still in wire form.
///
/// The degraded path for untrusted metadata: schema-authoring errors merge
/// into the report, path-qualified, and validation continues on the
/// remaining fields. Never panics.
#[must_use]
pub fn validate_raw(
    params: &ValueMap,
    expected: &serde_json::Map<String, serde_json::Value>,
) -> ValidationReport {
    let mut errors = Vec::new();
    for (name, raw_schema) in expected {
        let path = diagnostics::field("", name);
        let Some(value) = params.get(name) else {
            errors.push(ValidationError::new(
                path,
                ValidationErrorKind::MissingParameter,
            ));
            continue;
        };
        match SchemaNode::parse_at(raw_schema, &path) {
            Ok(node) => validate_node(value, &node, &path, &mut errors),
            Err(mut schema_errors) => errors.append(&mut schema_errors),
        }
    }
    ValidationReport { errors }
}

fn validate_fields(
    params: &ValueMap,
    expected: &SchemaMap,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for (name, schema) in expected {
        let path = diagnostics::field(prefix, name);
        match params.get(name) {
            None => errors.push(ValidationError::new(
                path,
                ValidationErrorKind::MissingParameter,
            )),
            Some(value) => validate_node(value, schema, &path, errors),
        }
    }
}

fn validate_node(
    value: &DynamicValue,
    schema: &SchemaNode,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    match schema {
        SchemaNode::Primitive(kind) => {
            let matches = match kind {
                PrimitiveKind::String => matches!(value, DynamicValue::String(_)),
                PrimitiveKind::Int => matches!(value, DynamicValue::Int(_)),
                PrimitiveKind::Bool => matches!(value, DynamicValue::Bool(_)),
            };
            if !matches {
                errors.push(ValidationError::new(
                    path,
                    ValidationErrorKind::TypeMismatch {
                        expected: kind.name(),
                    },
                ));
            }
        }
        SchemaNode::Object { properties } => match value.as_object() {
            Some(fields) => validate_fields(fields, properties, path, errors),
            None => errors.push(ValidationError::new(
                path,
                ValidationErrorKind::TypeMismatch { expected: "object" },
            )),
        },
        SchemaNode::Array { items } => match value.as_array() {
            Some(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    validate_node(element, items, &diagnostics::element(path, index), errors);
                }
            }
            None => errors.push(ValidationError::new(
                path,
                ValidationErrorKind::TypeMismatch { expected: "array" },
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimcp_core::decode;
    use serde_json::json;

    fn profile_schema() -> SchemaMap {
        [(
            "profile".to_owned(),
            SchemaNode::object([
                ("name".to_owned(), SchemaNode::string()),
                ("age".to_owned(), SchemaNode::int()),
            ]),
        )]
        .into_iter()
        .collect()
    }

    fn params_from(json: serde_json::Value) -> ValueMap {
        let value = decode(&serde_json::to_vec(&json).unwrap()).unwrap();
        match value {
            DynamicValue::Object(map) => map,
            other => panic!("expected object params, got {}", other.type_name()),
        }
    }

    #[test]
    fn well_typed_nested_object_is_valid() {
        let params = params_from(json!({ "profile": { "name": "Erio", "age": 33 } }));
        let report = validate(&params, &profile_schema());
        assert!(report.is_valid());
        assert!(report.messages().is_empty());
    }

    #[test]
    fn type_mismatches_collect_across_all_fields() {
        let params = params_from(json!({ "profile": { "name": 42, "age": "treinta" } }));
        let report = validate(&params, &profile_schema());

        assert!(!report.is_valid());
        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["profile.name", "profile.age"]);
        assert!(matches!(
            report.errors[0].kind,
            ValidationErrorKind::TypeMismatch { expected: "string" }
        ));
        assert!(matches!(
            report.errors[1].kind,
            ValidationErrorKind::TypeMismatch { expected: "int" }
        ));
    }

    #[test]
    fn missing_nested_field_is_reported_with_full_path() {
        let params = params_from(json!({ "profile": { "name": "Erio" } }));
        let report = validate(&params, &profile_schema());

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "profile.age");
        assert_eq!(
            report.errors[0].kind,
            ValidationErrorKind::MissingParameter
        );
        assert_eq!(report.messages(), vec!["profile.age: missing parameter"]);
    }

    #[test]
    fn array_element_errors_carry_bracketed_paths() {
        let schema: SchemaMap = [(
            "items".to_owned(),
            SchemaNode::array(SchemaNode::object([
                ("id".to_owned(), SchemaNode::int()),
                ("label".to_owned(), SchemaNode::string()),
            ])),
        )]
        .into_iter()
        .collect();

        let params = params_from(json!({
            "items": [
                { "id": 1, "label": "uno" },
                { "id": "dos", "label": 2 }
            ]
        }));
        let report = validate(&params, &schema);

        let paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["items[1].id", "items[1].label"]);
    }

    #[test]
    fn primitive_array_elements_use_element_paths() {
        let schema: SchemaMap = [("tags".to_owned(), SchemaNode::array(SchemaNode::string()))]
            .into_iter()
            .collect();

        let params = params_from(json!({ "tags": ["a", 3, "c"] }));
        let report = validate(&params, &schema);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "tags[1]");
    }

    #[test]
    fn no_coercion_between_primitives() {
        let schema: SchemaMap = [
            ("count".to_owned(), SchemaNode::int()),
            ("flag".to_owned(), SchemaNode::bool()),
            ("name".to_owned(), SchemaNode::string()),
        ]
        .into_iter()
        .collect();

        // Numeric string, 0/1 integer, and a float are not int/bool/string.
        let params = params_from(json!({ "count": "7", "flag": 1, "name": 33 }));
        let report = validate(&params, &schema);
        assert_eq!(report.errors.len(), 3);
    }

    #[test]
    fn float_is_not_an_int() {
        let schema: SchemaMap = [("n".to_owned(), SchemaNode::int())].into_iter().collect();
        let mut params = ValueMap::new();
        params.insert("n".to_owned(), DynamicValue::Float(2.5));
        assert!(!validate(&params, &schema).is_valid());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let params = params_from(json!({
            "profile": { "name": "Erio", "age": 33, "nickname": "E" },
            "unrelated": true
        }));
        assert!(validate(&params, &profile_schema()).is_valid());
    }

    #[test]
    fn wrong_container_types_are_reported_once() {
        let params = params_from(json!({ "profile": [1, 2] }));
        let report = validate(&params, &profile_schema());
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(
            report.errors[0].kind,
            ValidationErrorKind::TypeMismatch { expected: "object" }
        ));
    }

    #[test]
    fn raw_schemas_degrade_to_reported_errors() {
        let mut raw = serde_json::Map::new();
        raw.insert("age".to_owned(), json!({ "type": "years" }));
        raw.insert("name".to_owned(), json!("string"));

        let params = params_from(json!({ "age": 33, "name": 7 }));
        let report = validate_raw(&params, &raw);

        // The malformed schema is reported and validation continues.
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(
            &report.errors[0].kind,
            ValidationErrorKind::UnsupportedSchemaType { found } if found == "years"
        ));
        assert_eq!(report.errors[1].path, "name");
    }

    #[test]
    fn raw_missing_parameter_wins_over_schema_checking() {
        let mut raw = serde_json::Map::new();
        raw.insert("age".to_owned(), json!(42));

        let report = validate_raw(&ValueMap::new(), &raw);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].kind,
            ValidationErrorKind::MissingParameter
        );
    }

    #[test]
    fn report_display_joins_messages() {
        let params = params_from(json!({ "profile": { "name": "Erio" } }));
        let report = validate(&params, &profile_schema());
        assert_eq!(report.to_string(), "profile.age: missing parameter");
        assert!(validate(&params_from(json!({ "profile": { "name": "E", "age": 1 } })), &profile_schema())
            .to_string()
            .contains("valid"));
    }
}
