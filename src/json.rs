//! Deep JSON conversion
//!
//! One recursive algorithm with two leniency levels, exposed as two entry
//! points. [`deep_convert_to_json`] is the strict export path used by
//! `toJSON()`: `undefined`, symbols and bigints fail with
//! [`DomainError::InvalidInput`]. [`deep_jsonify`] is the lenient variant for
//! arbitrary object graphs: `undefined` passes through unchanged and
//! symbols/bigints collapse to the empty-object marker. Both treat maps and
//! sets as `{}` — collections are not part of the serializable domain
//! vocabulary — and both delegate to a nested domain object's own `toJSON`
//! capability without recursing into its result.

use chrono::SecondsFormat;
use serde_json::Map;

use crate::errors::{DomainError, DomainResult};
use crate::value::Value;

/// JSON-safe structural value
pub type JsonValue = serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leniency {
    Strict,
    Lenient,
}

/// Strictly convert a value graph into JSON-safe data
///
/// Fails with [`DomainError::InvalidInput`] for `undefined`, symbols and
/// bigints anywhere in the graph.
pub fn deep_convert_to_json(value: &Value) -> DomainResult<JsonValue> {
    match convert(value, Leniency::Strict)? {
        Some(json) => Ok(json),
        // Strict conversion already rejected Undefined; kept for totality
        None => Err(DomainError::invalid_input("Cannot convert undefined to JSON")),
    }
}

/// Leniently convert a value graph into JSON-safe data
///
/// Returns `None` for a top-level `undefined`; `undefined` object fields are
/// omitted from the output and `undefined` array elements become JSON `null`.
pub fn deep_jsonify(value: &Value) -> DomainResult<Option<JsonValue>> {
    convert(value, Leniency::Lenient)
}

fn convert(value: &Value, leniency: Leniency) -> DomainResult<Option<JsonValue>> {
    match value {
        Value::Undefined => match leniency {
            Leniency::Strict => Err(DomainError::invalid_input("Cannot convert undefined to JSON")),
            Leniency::Lenient => Ok(None),
        },
        Value::Symbol(_) => match leniency {
            Leniency::Strict => Err(DomainError::invalid_input(
                "Cannot convert a Symbol value to JSON",
            )),
            Leniency::Lenient => Ok(Some(empty_object())),
        },
        Value::BigInt(_) => match leniency {
            Leniency::Strict => Err(DomainError::invalid_input(
                "Cannot convert a BigInt value to JSON",
            )),
            Leniency::Lenient => Ok(Some(empty_object())),
        },
        Value::Null => Ok(Some(JsonValue::Null)),
        Value::Bool(b) => Ok(Some(JsonValue::Bool(*b))),
        // Non-finite numbers have no JSON representation and become null
        Value::Number(n) => Ok(Some(
            serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        )),
        Value::String(s) => Ok(Some(JsonValue::String(s.clone()))),
        Value::Date(d) => Ok(Some(JsonValue::String(
            d.to_rfc3339_opts(SecondsFormat::Millis, true),
        ))),
        Value::Map(_) | Value::Set(_) => Ok(Some(empty_object())),
        Value::Array(values) => {
            let mut result = Vec::with_capacity(values.len());
            for element in values.iter() {
                // A lenient undefined element serializes as null so length
                // and order are preserved
                result.push(convert(element, leniency)?.unwrap_or(JsonValue::Null));
            }
            Ok(Some(JsonValue::Array(result)))
        }
        Value::Object(props) => {
            let mut result = Map::with_capacity(props.len());
            for (key, element) in props.iter() {
                if let Some(json) = convert(element, leniency)? {
                    result.insert(key.clone(), json);
                }
            }
            Ok(Some(JsonValue::Object(result)))
        }
        // Delegate to the instance's own toJSON capability, verbatim
        Value::Domain(object) => Ok(Some(object.to_json()?)),
    }
}

fn empty_object() -> JsonValue {
    JsonValue::Object(Map::new())
}
