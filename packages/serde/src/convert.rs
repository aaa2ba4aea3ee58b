//! Conversions between mapping results and `serde_json::Value`.

use serde::Serialize;
use structmap_core::{Mapped, Mapper, Reflect, Shape, Value};

use crate::error::Error;

/// Convert a mapping result to JSON.
///
/// Never fails: keys of passed-through maps that are not strings are
/// rendered with `Value::to_key`, and non-finite floats become `null`.
pub fn to_json(mapped: &Mapped) -> serde_json::Value {
    match mapped {
        Mapped::Mapping(mapping) => serde_json::Value::Object(
            mapping
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect(),
        ),
        Mapped::Sequence(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Mapped::Value(value) => value_to_json(value),
    }
}

/// Convert a typed value to JSON.
///
/// Records become objects and optionals collapse to their pointee or
/// `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Unsigned(u) => serde_json::Value::Number((*u).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Optional(optional) => optional
            .get()
            .map(value_to_json)
            .unwrap_or(serde_json::Value::Null),
        Value::Record(record) => serde_json::Value::Object(
            record
                .fields()
                .map(|(field, v)| (field.name().to_string(), value_to_json(v)))
                .collect(),
        ),
        Value::Map(map) => serde_json::Value::Object(
            map.entries()
                .iter()
                .map(|(k, v)| (k.to_key().into_owned(), value_to_json(v)))
                .collect(),
        ),
        Value::Sequence(sequence) => {
            serde_json::Value::Array(sequence.items().iter().map(value_to_json).collect())
        }
    }
}

/// Convert JSON to a value the mapper can walk.
///
/// Objects become string-keyed maps and arrays become sequences, both with
/// dynamic (`Shape::Any`) members. A mapper converts the objects; arrays
/// are passed through since their element shape is not known.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(u) = n.as_u64() {
                Value::Unsigned(u)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Sequence(structmap_core::Sequence::new(
            Shape::Any,
            arr.into_iter().map(json_to_value).collect(),
        )),
        serde_json::Value::Object(map) => Value::Map(structmap_core::Map::with_string_keys(
            Shape::Any,
            map.into_iter().map(|(k, v)| (k, json_to_value(v))),
        )),
    }
}

/// Encode a mapping result as compact JSON text.
///
/// Unlike [`to_json`], this goes through `Serialize` and fails on
/// passed-through maps whose keys are not strings.
pub fn to_json_string(mapped: &Mapped) -> Result<String, Error> {
    encode(mapped, false)
}

/// Encode a mapping result as indented JSON text.
pub fn to_json_string_pretty(mapped: &Mapped) -> Result<String, Error> {
    encode(mapped, true)
}

/// Map a typed value and convert the result to JSON.
///
/// # Example
///
/// ```rust
/// use structmap_core::{reflect_record, Mapper};
/// use structmap_serde::map_to_json;
///
/// struct User {
///     name: String,
///     password: String,
/// }
///
/// reflect_record!(User { name, password });
///
/// let mapper = Mapper::builder()
///     .filter(|path, _| Ok(path != ".password"))
///     .build();
/// let user = User { name: "ada".to_string(), password: "hunter2".to_string() };
///
/// let json = map_to_json(&mapper, &user).unwrap();
/// assert_eq!(json, serde_json::json!({ "name": "ada" }));
/// ```
pub fn map_to_json<T: Reflect + ?Sized>(mapper: &Mapper, value: &T) -> Result<serde_json::Value, Error> {
    let mapped = mapper.map(value)?;
    Ok(to_json(&mapped))
}

fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, Error> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
