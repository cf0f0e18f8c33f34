//! Persisted container layout.
//!
//! Every collection is stored as
//! `{ "<collection>": [...], "lastUpdated": "<ISO-8601>", "version": "1.0" }`.
//! The array is the payload; the other two keys are metadata only.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::constants::ENVELOPE_VERSION;
use crate::error::{StoreError, StoreResult};
use crate::utils::datetime;

/// A decoded collection plus its envelope metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub items: Vec<T>,
    pub last_updated: Option<String>,
    pub version: Option<String>,
}

/// Serialize `items` under `collection`, stamping the current time and version.
pub fn encode<T: Serialize>(collection: &str, items: &[T]) -> StoreResult<String> {
    let mut map = Map::new();
    map.insert(collection.to_string(), serde_json::to_value(items)?);
    map.insert("lastUpdated".to_string(), Value::String(datetime::now_iso()));
    map.insert("version".to_string(), Value::String(ENVELOPE_VERSION.to_string()));
    Ok(serde_json::to_string(&Value::Object(map))?)
}

/// Parse a stored envelope. A missing or null collection decodes as empty.
pub fn decode<T: DeserializeOwned>(collection: &str, raw: &str) -> StoreResult<Envelope<T>> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(mut map) = value else {
        return Err(StoreError::InvalidData(format!(
            "stored {} envelope is not a JSON object",
            collection
        )));
    };

    let items = match map.remove(collection) {
        None | Some(Value::Null) => Vec::new(),
        Some(items) => serde_json::from_value(items)?,
    };

    let text = |v: Option<Value>| match v {
        Some(Value::String(s)) => Some(s),
        _ => None,
    };

    Ok(Envelope {
        items,
        last_updated: text(map.remove("lastUpdated")),
        version: text(map.remove("version")),
    })
}
