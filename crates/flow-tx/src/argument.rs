//! Typed script arguments (JSON-Cadence).
//!
//! Native values are wrapped in `Value`, then encoded to the tagged form
//! `{"type": <tag>, "value": <value>}`:
//!
//! | `Value`      | tag          | value                       |
//! |--------------|--------------|-----------------------------|
//! | `String`     | `String`     | the text                    |
//! | `Bool`       | `Bool`       | JSON boolean                |
//! | `BigInt`     | `Int64`      | decimal string              |
//! | `Int`        | `Int`        | decimal string              |
//! | `Number`     | `Int`/`Fix64`| `Int` if integral           |
//! | `Array`      | `Array`      | encoded elements            |
//! | `Dictionary` | `Dictionary` | `{key, value}` entries      |
//! | `Other`      | `String`     | the value's text form       |
//!
//! Unknown kinds never fail; they go through `Other` and come out as
//! `String`. Arguments are independent of signing: the payload carries the
//! JSON bytes, the REST request carries them base64-encoded.

use crate::TxError;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A native argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    /// Integer tagged `Int64`. Cadence rejects values outside the `i64`
    /// range, so only `From<i128>` produces this variant.
    BigInt(i128),
    /// Integer tagged `Int` (arbitrary precision on chain).
    Int(i128),
    Number(f64),
    Array(Vec<Value>),
    Dictionary(Vec<(Value, Value)>),
    /// Anything else, kept as its text form.
    Other(String),
}

impl Value {
    /// Fallback for kinds without a dedicated variant.
    pub fn other(value: impl Display) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Self::Int(i128::from(n))
            }
        })*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::Dictionary(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Tagged JSON-Cadence argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Argument {
    String(String),
    Bool(bool),
    Int(String),
    Int64(String),
    Fix64(String),
    Array(Vec<Argument>),
    Dictionary(Vec<DictionaryEntry>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub key: Argument,
    pub value: Argument,
}

/// Encode one value into its tagged form.
pub fn encode_argument(value: &Value) -> Argument {
    match value {
        Value::String(s) => Argument::String(s.clone()),
        Value::Bool(b) => Argument::Bool(*b),
        Value::BigInt(n) => Argument::Int64(n.to_string()),
        Value::Int(n) => Argument::Int(n.to_string()),
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Argument::Int(n.to_string()),
        Value::Number(n) => Argument::Fix64(n.to_string()),
        Value::Array(items) => Argument::Array(items.iter().map(encode_argument).collect()),
        Value::Dictionary(entries) => Argument::Dictionary(
            entries
                .iter()
                .map(|(k, v)| DictionaryEntry {
                    key: encode_argument(k),
                    value: encode_argument(v),
                })
                .collect(),
        ),
        Value::Other(text) => Argument::String(text.clone()),
    }
}

/// Encode an ordered collection as an `Array` argument.
pub fn encode_sequence<I>(items: I) -> Argument
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Argument::Array(
        items
            .into_iter()
            .map(|item| encode_argument(&item.into()))
            .collect(),
    )
}

/// Encode key/value pairs as a `Dictionary` argument, in iteration order.
pub fn encode_map<I, K, V>(entries: I) -> Argument
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Value>,
    V: Into<Value>,
{
    Argument::Dictionary(
        entries
            .into_iter()
            .map(|(k, v)| DictionaryEntry {
                key: encode_argument(&k.into()),
                value: encode_argument(&v.into()),
            })
            .collect(),
    )
}

/// JSON bytes of an encoded argument, as carried in the payload.
pub fn argument_json(argument: &Argument) -> Result<Vec<u8>, TxError> {
    serde_json::to_vec(argument).map_err(|e| TxError::Serialize(e.to_string()))
}

/// JSON bytes of a value's tagged form.
pub fn argument_bytes(value: &Value) -> Result<Vec<u8>, TxError> {
    argument_json(&encode_argument(value))
}

/// Base64 of each value's tagged JSON, ready for a REST request.
pub fn encode_arguments(values: &[Value]) -> Result<Vec<String>, TxError> {
    values
        .iter()
        .map(|value| {
            let json = argument_bytes(value)?;
            Ok(base64::engine::general_purpose::STANDARD.encode(json))
        })
        .collect()
}
