//! Tolerant field decoders for the host payload.
//!
//! Hosts are not consistent about scalar encodings: 64-bit timestamps arrive
//! as strings, enums as numeric codes, and unset fields as `null`. These
//! decoders accept every such encoding for a field and only reject values
//! whose shape cannot be read as that field at all (an object where a string
//! belongs, for example).

use serde::de::{Deserialize, DeserializeOwned, Deserializer, Error as _};
use serde_json::Value;

// Field-specific deserializers for `#[serde(deserialize_with = "...")]`.

/// `null` becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(D::Error::custom)
}

/// Strings, numbers and booleans as text; `null` as the empty string.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "invalid type: {}, expected a string",
            kind(&other)
        ))),
    }
}

/// Like [`string`], but `null` is `None`.
pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => string(value).map(Some).map_err(D::Error::custom),
    }
}

/// Booleans, `"true"`/`"false"` and `0`/`1`; `null` as `false`.
pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim() {
            "" | "false" | "0" => Ok(false),
            "true" | "1" => Ok(true),
            other => Err(D::Error::custom(format!(
                "invalid value: {:?}, expected a boolean",
                other
            ))),
        },
        other => Err(D::Error::custom(format!(
            "invalid type: {}, expected a boolean",
            kind(&other)
        ))),
    }
}

/// Integers as numbers or decimal strings; `null` as `0`.
pub(crate) fn int64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| D::Error::custom(format!("invalid value: {}, expected i64", n))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid value: {:?}, expected i64", s))),
        other => Err(D::Error::custom(format!(
            "invalid type: {}, expected i64",
            kind(&other)
        ))),
    }
}

/// An enum given either by numeric code or by name.
pub(crate) enum EnumRepr {
    Unset,
    Code(i64),
    Name(String),
}

/// Reads an enum field as a code or a name; `null` is [`EnumRepr::Unset`].
pub(crate) fn enum_repr<'de, D>(deserializer: D) -> Result<EnumRepr, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(EnumRepr::Unset),
        Value::Number(n) => n
            .as_i64()
            .map(EnumRepr::Code)
            .ok_or_else(|| D::Error::custom(format!("invalid enum code: {}", n))),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(code) => Ok(EnumRepr::Code(code)),
            Err(_) => Ok(EnumRepr::Name(s)),
        },
        other => Err(D::Error::custom(format!(
            "invalid type: {}, expected an enum code or name",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}
