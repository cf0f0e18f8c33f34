//! Shallow partial-field merging.
//!
//! Updates are applied by overwriting top-level keys of a record's JSON form.
//! Nested objects and arrays in the patch replace the existing value wholesale;
//! they are never merged recursively.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::{StoreError, StoreResult};

/// Partial set of top-level fields to overwrite on a record.
pub type Patch = Map<String, Value>;

/// Build a [`Patch`] from a JSON value, which must be an object.
pub fn patch_from(value: Value) -> StoreResult<Patch> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidData(format!("patch must be a JSON object, got {}", other))),
    }
}

/// Overwrite the top-level fields of `record` with those in `patch`.
///
/// Patch keys listed in `aliases` as `(alias, canonical)` are written under
/// their canonical name, so an aliased key replaces the existing field.
///
/// Fails with [`StoreError::InvalidData`] if the merged value no longer
/// deserializes into `T` (for example an unknown status string).
pub fn shallow_merge<T>(record: &T, patch: &Patch, aliases: &[(&str, &str)]) -> StoreResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(record)?;
    let fields = value
        .as_object_mut()
        .ok_or_else(|| StoreError::InvalidData("record does not serialize to an object".to_string()))?;

    for (key, new_value) in patch {
        let canonical = aliases
            .iter()
            .find(|(alias, _)| *alias == key.as_str())
            .map_or(key.as_str(), |(_, canonical)| *canonical);
        fields.insert(canonical.to_string(), new_value.clone());
    }

    Ok(serde_json::from_value(value)?)
}
