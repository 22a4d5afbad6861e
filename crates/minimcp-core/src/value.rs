//! The dynamic value type carried by MCP message payloads.
//!
//! [`DynamicValue`] is a closed sum over the JSON data model. Every payload
//! that crosses a serialization boundary — tool arguments, handler results,
//! error data — is one of these variants, so consumption sites can match
//! exhaustively instead of downcasting.

use indexmap::IndexMap;

/// An order-preserving mapping from field name to value.
///
/// Insertion order is not semantically significant, but preserving it keeps
/// encoded output deterministic.
pub type ValueMap = IndexMap<String, DynamicValue>;

/// A dynamically typed, JSON-compatible value.
///
/// The structure is always a finite, acyclic tree: values own their children
/// outright, so a value cannot contain itself.
///
/// `Float` may hold NaN or ±Infinity in memory, but such values are rejected
/// by the codec — the JSON grammar has no token for non-finite numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// IEEE-754 double.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<DynamicValue>),
    /// String-keyed mapping, insertion order preserved.
    Object(ValueMap),
}

impl DynamicValue {
    /// Returns true if this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, DynamicValue::Null)
    }

    /// Returns the boolean if this value is a `Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DynamicValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this value is an `Int`.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DynamicValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this value is a `Float`.
    ///
    /// An `Int` is not coerced; the two variants are distinct dynamic types.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            DynamicValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string slice if this value is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this value is an `Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the field map if this value is an `Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            DynamicValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field by name if this value is an `Object`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DynamicValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Returns the dynamic type name of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            DynamicValue::Null => "null",
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Int(_) => "int",
            DynamicValue::Float(_) => "float",
            DynamicValue::String(_) => "string",
            DynamicValue::Array(_) => "array",
            DynamicValue::Object(_) => "object",
        }
    }
}

impl Default for DynamicValue {
    fn default() -> Self {
        DynamicValue::Null
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self {
        DynamicValue::Bool(b)
    }
}

impl From<i64> for DynamicValue {
    fn from(i: i64) -> Self {
        DynamicValue::Int(i)
    }
}

impl From<i32> for DynamicValue {
    fn from(i: i32) -> Self {
        DynamicValue::Int(i64::from(i))
    }
}

impl From<f64> for DynamicValue {
    fn from(f: f64) -> Self {
        DynamicValue::Float(f)
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_owned())
    }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self {
        DynamicValue::String(s)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(items: Vec<DynamicValue>) -> Self {
        DynamicValue::Array(items)
    }
}

impl From<ValueMap> for DynamicValue {
    fn from(map: ValueMap) -> Self {
        DynamicValue::Object(map)
    }
}

impl<T: Into<DynamicValue>> From<Option<T>> for DynamicValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DynamicValue::Null,
        }
    }
}

impl FromIterator<DynamicValue> for DynamicValue {
    fn from_iter<I: IntoIterator<Item = DynamicValue>>(iter: I) -> Self {
        DynamicValue::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, DynamicValue)> for DynamicValue {
    fn from_iter<I: IntoIterator<Item = (String, DynamicValue)>>(iter: I) -> Self {
        DynamicValue::Object(iter.into_iter().collect())
    }
}
