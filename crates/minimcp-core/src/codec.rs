//! JSON codec for [`DynamicValue`].
//!
//! Encoding maps each variant to its direct JSON equivalent. Decoding parses
//! a single JSON value and resolves its type with a fixed, first-match-wins
//! precedence: null, bool, int, float, string, array, object.
//!
//! The precedence is a policy, not an artifact: it decides whether a JSON
//! number becomes an `Int` or a `Float`, and downstream code branches on the
//! resulting dynamic type. Integer-valued numbers — including literals like
//! `2.0` — decode as `Int`; a number only decodes as `Float` when its value
//! cannot be represented as an `i64`. A number above `i64::MAX` therefore
//! falls through the `Int` attempt and lands on `Float`.

use serde::de::Error as _;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{DynamicValue, ValueMap};

/// First `f64` value above `i64::MAX` (2^63). Everything strictly below it,
/// down to `i64::MIN` inclusive, converts to `i64` without saturation.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;
const I64_LOWER_BOUND: f64 = -9_223_372_036_854_775_808.0;

/// Encodes a value to a JSON byte stream.
///
/// # Errors
///
/// Returns [`EncodeError::NonFinite`] when the value contains a NaN or
/// infinite `Float` — the JSON grammar has no token for non-finite numbers,
/// so such values are representable in memory but never encodable.
pub fn encode(value: &DynamicValue) -> Result<Vec<u8>, EncodeError> {
    if let Some(f) = first_non_finite(value) {
        return Err(EncodeError::NonFinite(f));
    }
    serde_json::to_vec(value).map_err(EncodeError::Json)
}

/// Coerces any serializable value into a [`DynamicValue`].
///
/// # Errors
///
/// Returns [`EncodeError::UnsupportedValue`] when the input has no JSON
/// representation (for example a map with non-string keys).
pub fn to_dynamic<T: Serialize>(value: &T) -> Result<DynamicValue, EncodeError> {
    let json =
        serde_json::to_value(value).map_err(|e| EncodeError::UnsupportedValue(e.to_string()))?;
    from_json(json).map_err(|e| EncodeError::UnsupportedValue(e.to_string()))
}

/// Coerces a serializable value into a [`DynamicValue`] and encodes it.
pub fn encode_value<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    encode(&to_dynamic(value)?)
}

/// Decodes a single JSON value from a byte stream.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] on malformed input (unterminated
/// structures, invalid tokens, trailing data) and never yields a partial
/// value. [`DecodeError::Unresolved`] is the defensive branch for a number
/// that matches neither `Int` nor `Float` after exhausting the resolution
/// order; well-formed streams do not reach it.
pub fn decode(bytes: &[u8]) -> Result<DynamicValue, DecodeError> {
    let json: serde_json::Value = serde_json::from_slice(bytes).map_err(DecodeError::Json)?;
    from_json(json)
}

/// Converts a parsed [`serde_json::Value`] into a [`DynamicValue`],
/// applying the numeric resolution policy.
pub fn from_json(value: serde_json::Value) -> Result<DynamicValue, DecodeError> {
    Ok(match value {
        serde_json::Value::Null => DynamicValue::Null,
        serde_json::Value::Bool(b) => DynamicValue::Bool(b),
        serde_json::Value::Number(n) => resolve_number(&n)?,
        serde_json::Value::String(s) => DynamicValue::String(s),
        serde_json::Value::Array(items) => DynamicValue::Array(
            items
                .into_iter()
                .map(from_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut fields = ValueMap::with_capacity(map.len());
            for (key, val) in map {
                fields.insert(key, from_json(val)?);
            }
            DynamicValue::Object(fields)
        }
    })
}

/// Converts a [`DynamicValue`] into a [`serde_json::Value`].
///
/// # Errors
///
/// Returns [`EncodeError::NonFinite`] for NaN or infinite floats.
pub fn to_json(value: &DynamicValue) -> Result<serde_json::Value, EncodeError> {
    Ok(match value {
        DynamicValue::Null => serde_json::Value::Null,
        DynamicValue::Bool(b) => serde_json::Value::Bool(*b),
        DynamicValue::Int(i) => serde_json::Value::Number((*i).into()),
        DynamicValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or(EncodeError::NonFinite(*f))?,
        DynamicValue::String(s) => serde_json::Value::String(s.clone()),
        DynamicValue::Array(items) => serde_json::Value::Array(
            items.iter().map(to_json).collect::<Result<Vec<_>, _>>()?,
        ),
        DynamicValue::Object(map) => {
            let mut fields = serde_json::Map::with_capacity(map.len());
            for (key, val) in map {
                fields.insert(key.clone(), to_json(val)?);
            }
            serde_json::Value::Object(fields)
        }
    })
}

/// Ordered resolution for JSON numbers: `Int` first, then `Float`.
fn resolve_number(n: &serde_json::Number) -> Result<DynamicValue, DecodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(DynamicValue::Int(i));
    }
    if let Some(f) = n.as_f64() {
        // Integer-valued literals like 2.0 take the Int branch; the range
        // guard keeps `f as i64` from saturating at the boundaries.
        if f.fract() == 0.0 && (I64_LOWER_BOUND..I64_UPPER_BOUND).contains(&f) {
            return Ok(DynamicValue::Int(f as i64));
        }
        return Ok(DynamicValue::Float(f));
    }
    Err(DecodeError::Unresolved(n.to_string()))
}

/// Depth-first search for a non-finite float, the one unencodable shape.
fn first_non_finite(value: &DynamicValue) -> Option<f64> {
    match value {
        DynamicValue::Float(f) if !f.is_finite() => Some(*f),
        DynamicValue::Array(items) => items.iter().find_map(first_non_finite),
        DynamicValue::Object(map) => map.values().find_map(first_non_finite),
        _ => None,
    }
}

impl Serialize for DynamicValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DynamicValue::Null => serializer.serialize_unit(),
            DynamicValue::Bool(b) => serializer.serialize_bool(*b),
            DynamicValue::Int(i) => serializer.serialize_i64(*i),
            DynamicValue::Float(f) => {
                if f.is_finite() {
                    serializer.serialize_f64(*f)
                } else {
                    Err(S::Error::custom(format!(
                        "non-finite number {f} has no JSON representation"
                    )))
                }
            }
            DynamicValue::String(s) => serializer.serialize_str(s),
            DynamicValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DynamicValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, val) in fields {
                    map.serialize_entry(key, val)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for DynamicValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        from_json(json).map_err(D::Error::custom)
    }
}

/// Encode-time failures.
#[derive(Debug)]
pub enum EncodeError {
    /// The input could not be coerced into the closed variant set.
    UnsupportedValue(String),
    /// A float in the value is NaN or ±Infinity.
    NonFinite(f64),
    /// The underlying JSON writer failed.
    Json(serde_json::Error),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnsupportedValue(detail) => {
                write!(f, "unsupported value: {detail}")
            }
            EncodeError::NonFinite(value) => {
                write!(f, "non-finite number {value} has no JSON representation")
            }
            EncodeError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Decode-time failures.
#[derive(Debug)]
pub enum DecodeError {
    /// The byte stream is not a single well-formed JSON value.
    Json(serde_json::Error),
    /// A parsed value matched no variant after exhausting the resolution
    /// order.
    Unresolved(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Json(e) => write!(f, "JSON error: {e}"),
            DecodeError::Unresolved(repr) => {
                write!(f, "value {repr} matches no dynamic type")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(e) => Some(e),
            DecodeError::Unresolved(_) => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: &DynamicValue) -> DynamicValue {
        decode(&encode(value).unwrap()).unwrap()
    }

    #[test]
    fn roundtrip_scalars() {
        assert_eq!(roundtrip(&DynamicValue::Null), DynamicValue::Null);
        assert_eq!(roundtrip(&DynamicValue::Bool(true)), DynamicValue::Bool(true));
        assert_eq!(roundtrip(&DynamicValue::Int(-42)), DynamicValue::Int(-42));
        assert_eq!(
            roundtrip(&DynamicValue::Float(3.25)),
            DynamicValue::Float(3.25)
        );
        assert_eq!(
            roundtrip(&DynamicValue::from("héllo\n")),
            DynamicValue::from("héllo\n")
        );
    }

    #[test]
    fn roundtrip_nested_structure() {
        let value: DynamicValue = vec![
            ("id".to_owned(), DynamicValue::Int(7)),
            (
                "tags".to_owned(),
                DynamicValue::Array(vec![DynamicValue::from("a"), DynamicValue::from("b")]),
            ),
            (
                "meta".to_owned(),
                vec![("score".to_owned(), DynamicValue::Float(0.5))]
                    .into_iter()
                    .collect(),
            ),
        ]
        .into_iter()
        .collect();

        assert_eq!(roundtrip(&value), value);
    }

    #[test]
    fn integral_number_decodes_as_int() {
        assert_eq!(decode(b"5").unwrap(), DynamicValue::Int(5));
        // Value-based rule: a fractional literal with an integral value is
        // still an Int.
        assert_eq!(decode(b"2.0").unwrap(), DynamicValue::Int(2));
        assert_eq!(decode(b"1e3").unwrap(), DynamicValue::Int(1000));
        assert_eq!(decode(b"-0.0").unwrap(), DynamicValue::Int(0));
    }

    #[test]
    fn fractional_number_decodes_as_float() {
        assert_eq!(decode(b"2.5").unwrap(), DynamicValue::Float(2.5));
        assert_eq!(decode(b"1e-3").unwrap(), DynamicValue::Float(0.001));
    }

    #[test]
    fn boolean_literal_never_falls_through_to_int() {
        assert_eq!(decode(b"true").unwrap(), DynamicValue::Bool(true));
        assert_eq!(decode(b"false").unwrap(), DynamicValue::Bool(false));
    }

    #[test]
    fn number_beyond_i64_range_decodes_as_float() {
        // 2^64 exceeds i64, so the Int attempt fails and Float matches.
        let v = decode(b"18446744073709551616").unwrap();
        assert_eq!(v, DynamicValue::Float(18_446_744_073_709_551_616.0));
        assert_eq!(decode(b"1e300").unwrap(), DynamicValue::Float(1e300));
    }

    #[test]
    fn i64_boundaries_stay_int() {
        assert_eq!(
            decode(b"9223372036854775807").unwrap(),
            DynamicValue::Int(i64::MAX)
        );
        assert_eq!(
            decode(b"-9223372036854775808").unwrap(),
            DynamicValue::Int(i64::MIN)
        );
    }

    #[test]
    fn non_finite_floats_never_encode() {
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = encode(&DynamicValue::Float(f)).unwrap_err();
            assert!(matches!(err, EncodeError::NonFinite(_)), "{err}");
        }

        // Deeply nested non-finite values are found too.
        let nested = DynamicValue::Array(vec![
            DynamicValue::Int(1),
            vec![("bad".to_owned(), DynamicValue::Float(f64::NAN))]
                .into_iter()
                .collect(),
        ]);
        assert!(matches!(
            encode(&nested),
            Err(EncodeError::NonFinite(_))
        ));
    }

    #[test]
    fn malformed_streams_never_yield_partial_values() {
        for bytes in [&b"{"[..], b"[1, 2", b"\"unterminated", b"nul", b""] {
            assert!(matches!(decode(bytes), Err(DecodeError::Json(_))));
        }
    }

    #[test]
    fn trailing_data_is_rejected() {
        assert!(decode(b"1 2").is_err());
        assert!(decode(b"{} garbage").is_err());
    }

    #[test]
    fn unsupported_values_fail_coercion() {
        use std::collections::BTreeMap;

        let mut map: BTreeMap<Vec<u8>, i32> = BTreeMap::new();
        map.insert(vec![1, 2], 3);
        let err = to_dynamic(&map).unwrap_err();
        assert!(matches!(err, EncodeError::UnsupportedValue(_)), "{err}");
    }

    #[test]
    fn encode_value_coerces_native_types() {
        #[derive(serde::Serialize)]
        struct Payload {
            name: &'static str,
            count: u8,
        }

        let bytes = encode_value(&Payload {
            name: "x",
            count: 3,
        })
        .unwrap();
        assert_eq!(
            decode(&bytes).unwrap(),
            vec![
                ("name".to_owned(), DynamicValue::from("x")),
                ("count".to_owned(), DynamicValue::Int(3)),
            ]
            .into_iter()
            .collect::<DynamicValue>()
        );
    }

    #[test]
    fn serde_embedding_applies_the_same_policy() {
        #[derive(serde::Deserialize)]
        struct Envelope {
            payload: DynamicValue,
        }

        let env: Envelope = serde_json::from_str(r#"{"payload": [2.0, 2.5]}"#).unwrap();
        assert_eq!(
            env.payload,
            DynamicValue::Array(vec![DynamicValue::Int(2), DynamicValue::Float(2.5)])
        );
    }

    #[test]
    fn serializing_non_finite_through_serde_fails() {
        let value = DynamicValue::Float(f64::INFINITY);
        assert!(serde_json::to_string(&value).is_err());
    }

    #[test]
    fn object_key_order_survives_roundtrip() {
        let value: DynamicValue = vec![
            ("z".to_owned(), DynamicValue::Int(1)),
            ("a".to_owned(), DynamicValue::Int(2)),
        ]
        .into_iter()
        .collect();

        let bytes = encode(&value).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"z":1,"a":2}"#);
    }
}
