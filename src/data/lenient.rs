//! Per-record decoding of the data documents.
//!
//! A document that is not valid JSON fails the whole load. Below that, each
//! record is decoded on its own: an entry of the wrong shape is logged and
//! skipped, so it only drops its own fragment of the page.

use super::error::{LoadError, SourceKind};
use super::types::Personal;
use crate::log;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// A data document decoded from the raw bytes of one source.
pub trait Document: Sized {
    fn from_json(kind: SourceKind, bytes: &[u8]) -> Result<Self, LoadError>;
}

impl Document for Personal {
    fn from_json(kind: SourceKind, bytes: &[u8]) -> Result<Self, LoadError> {
        let value: Value = parse(kind, bytes)?;
        Ok(record(kind.name(), value).unwrap_or_default())
    }
}

impl<T: DeserializeOwned> Document for Vec<T> {
    fn from_json(kind: SourceKind, bytes: &[u8]) -> Result<Self, LoadError> {
        let values: Vec<Value> = parse(kind, bytes)?;
        Ok(records(kind.name(), values))
    }
}

fn parse<T: DeserializeOwned>(kind: SourceKind, bytes: &[u8]) -> Result<T, LoadError> {
    serde_json::from_slice(bytes).map_err(|cause| LoadError::Parse { kind, cause })
}

fn record<T: DeserializeOwned>(context: &str, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            log!("data"; "skipped malformed {context} entry: {err}");
            None
        }
    }
}

fn records<T: DeserializeOwned>(context: &str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| record(context, value))
        .collect()
}

/// `deserialize_with` for nested arrays.
///
/// Entries of the wrong shape are dropped; anything but an array reads as empty.
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => records("nested", values),
        Value::Null => Vec::new(),
        other => {
            log!("data"; "expected a list, found `{other}`");
            Vec::new()
        }
    })
}

/// `deserialize_with` for nested objects; a value of the wrong shape reads as the default.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(record("nested", Value::deserialize(deserializer)?).unwrap_or_default())
}
