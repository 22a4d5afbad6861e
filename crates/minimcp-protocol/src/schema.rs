//! Parameter schema grammar.
//!
//! A schema is either a primitive type, an object with per-field schemas,
//! or an array with a single element schema. The grammar is its own tagged
//! type, so a schema is checked once when it is authored (or parsed from
//! metadata) rather than re-inspected on every validation call.
//!
//! On the wire a node is either a bare primitive tag (`"int"`) or a
//! descriptor object (`{"type": "object", "properties": {...}}`).

use indexmap::IndexMap;

use crate::validate::{ValidationError, ValidationErrorKind, ValidationReport};
use minimcp_core::diagnostics;

/// The primitive types a parameter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// UTF-8 string.
    String,
    /// 64-bit signed integer.
    Int,
    /// Boolean.
    Bool,
}

impl PrimitiveKind {
    /// The wire tag for this primitive.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Bool => "bool",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(PrimitiveKind::String),
            "int" => Some(PrimitiveKind::Int),
            "bool" => Some(PrimitiveKind::Bool),
            _ => None,
        }
    }
}

/// An order-preserving mapping from field name to schema.
pub type SchemaMap = IndexMap<String, SchemaNode>;

/// A recursive description of the expected shape of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A bare primitive type.
    Primitive(PrimitiveKind),
    /// A nested object; every declared field has its own schema.
    Object {
        /// Field name to schema, in declaration order.
        properties: SchemaMap,
    },
    /// A homogeneous sequence; `items` describes every element.
    Array {
        /// Schema for each element.
        items: Box<SchemaNode>,
    },
}

impl SchemaNode {
    /// A string schema.
    #[must_use]
    pub fn string() -> Self {
        SchemaNode::Primitive(PrimitiveKind::String)
    }

    /// An integer schema.
    #[must_use]
    pub fn int() -> Self {
        SchemaNode::Primitive(PrimitiveKind::Int)
    }

    /// A boolean schema.
    #[must_use]
    pub fn bool() -> Self {
        SchemaNode::Primitive(PrimitiveKind::Bool)
    }

    /// An object schema over the given field schemas.
    #[must_use]
    pub fn object<I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (String, SchemaNode)>,
    {
        SchemaNode::Object {
            properties: properties.into_iter().collect(),
        }
    }

    /// An array schema whose elements all match `items`.
    #[must_use]
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Box::new(items),
        }
    }

    /// The effective type tag of this schema.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaNode::Primitive(kind) => kind.name(),
            SchemaNode::Object { .. } => "object",
            SchemaNode::Array { .. } => "array",
        }
    }

    /// Returns the field schemas if this is an object schema.
    #[must_use]
    pub fn properties(&self) -> Option<&SchemaMap> {
        match self {
            SchemaNode::Object { properties } => Some(properties),
            _ => None,
        }
    }

    /// Parses a schema from its wire form.
    ///
    /// Malformed schemas degrade to a report; this never panics. Every
    /// finding is path-qualified relative to the node being parsed.
    pub fn parse(value: &serde_json::Value) -> Result<Self, ValidationReport> {
        Self::parse_at(value, "").map_err(|errors| ValidationReport { errors })
    }

    /// Parses a node, collecting all authoring errors under `path`.
    pub(crate) fn parse_at(
        value: &serde_json::Value,
        path: &str,
    ) -> Result<Self, Vec<ValidationError>> {
        match value {
            serde_json::Value::String(tag) => Self::parse_tag(tag, None, path),
            serde_json::Value::Object(descriptor) => {
                let Some(tag) = descriptor.get("type").and_then(serde_json::Value::as_str)
                else {
                    return Err(vec![ValidationError::new(
                        path,
                        ValidationErrorKind::InvalidSchemaDefinition,
                    )]);
                };
                Self::parse_tag(tag, Some(descriptor), path)
            }
            _ => Err(vec![ValidationError::new(
                path,
                ValidationErrorKind::InvalidSchemaDefinition,
            )]),
        }
    }

    fn parse_tag(
        tag: &str,
        descriptor: Option<&serde_json::Map<String, serde_json::Value>>,
        path: &str,
    ) -> Result<Self, Vec<ValidationError>> {
        if let Some(kind) = PrimitiveKind::from_tag(tag) {
            return Ok(SchemaNode::Primitive(kind));
        }
        match tag {
            "object" => {
                let Some(raw) = descriptor
                    .and_then(|d| d.get("properties"))
                    .and_then(serde_json::Value::as_object)
                else {
                    return Err(vec![ValidationError::new(
                        path,
                        ValidationErrorKind::InvalidSchema {
                            detail: "missing properties",
                        },
                    )]);
                };

                let mut properties = SchemaMap::with_capacity(raw.len());
                let mut errors = Vec::new();
                for (name, field_schema) in raw {
                    match Self::parse_at(field_schema, &diagnostics::field(path, name)) {
                        Ok(node) => {
                            properties.insert(name.clone(), node);
                        }
                        Err(mut field_errors) => errors.append(&mut field_errors),
                    }
                }
                if errors.is_empty() {
                    Ok(SchemaNode::Object { properties })
                } else {
                    Err(errors)
                }
            }
            "array" => {
                let Some(raw) = descriptor.and_then(|d| d.get("items")) else {
                    return Err(vec![ValidationError::new(
                        path,
                        ValidationErrorKind::InvalidSchema {
                            detail: "missing items",
                        },
                    )]);
                };
                let items = Self::parse_at(raw, path)?;
                Ok(SchemaNode::Array {
                    items: Box::new(items),
                })
            }
            other => Err(vec![ValidationError::new(
                path,
                ValidationErrorKind::UnsupportedSchemaType {
                    found: other.to_owned(),
                },
            )]),
        }
    }

    /// Renders this schema in descriptor form.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            SchemaNode::Primitive(kind) => {
                serde_json::json!({ "type": kind.name() })
            }
            SchemaNode::Object { properties } => {
                let mut fields = serde_json::Map::with_capacity(properties.len());
                for (name, node) in properties {
                    fields.insert(name.clone(), node.to_value());
                }
                serde_json::json!({ "type": "object", "properties": fields })
            }
            SchemaNode::Array { items } => {
                serde_json::json!({ "type": "array", "items": items.to_value() })
            }
        }
    }
}

impl serde::Serialize for SchemaNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for SchemaNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        SchemaNode::parse(&value).map_err(|report| {
            serde::de::Error::custom(format!("invalid schema: {report}"))
        })
    }
}
