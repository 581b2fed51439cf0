//! Submitted data and partial updates
//!
//! Create and update calls receive the caller's JSON object as-is. The keys of
//! that object are what field-restricted rules check, so the services keep it
//! untyped until authorization has passed.

use crate::error::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A submitted JSON object
pub type Data = Map<String, Value>;

const ID: &str = "id";

/// Reject data that tries to choose its own id
pub(crate) fn reject_id(data: &Data) -> Result<()> {
    match data.get(ID) {
        None | Some(Value::Null) => Ok(()),
        Some(_) => Err(CatalogError::illegal("IDs are assigned automatically")),
    }
}

/// Reject data whose `id` differs from the id in the path
pub(crate) fn check_id(data: &Data, expected: i64, kind: &str) -> Result<()> {
    let Some(value) = data.get(ID).filter(|v| !v.is_null()) else {
        return Ok(());
    };
    let id = value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| CatalogError::validation(format!("{} id must be an integer", kind)))?;

    if id != expected {
        return Err(CatalogError::illegal(format!("Cannot update {} id", kind)));
    }
    Ok(())
}

/// Read an integer reference such as `team_id`, accepting numeric strings
pub(crate) fn get_i64(data: &Data, key: &str) -> Result<Option<i64>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .map(Some)
            .ok_or_else(|| CatalogError::validation(format!("{} must be an integer", key))),
    }
}

/// Build a new object from submitted data
pub(crate) fn from_data<T: DeserializeOwned>(data: &Data) -> Result<T> {
    serde_json::from_value(Value::Object(data.clone()))
        .map_err(|e| CatalogError::validation(e.to_string()))
}

/// Apply a partial update to `current`
///
/// Keys in `skip_keys` and `id` are ignored. Any other key must name a field
/// of the object. The merged object is validated by deserializing it again,
/// so `current` is untouched when the update is rejected.
pub(crate) fn merge<T>(current: &T, data: &Data, skip_keys: &[&str]) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(current).map_err(|e| CatalogError::validation(e.to_string()))?;
    let fields = value
        .as_object_mut()
        .ok_or_else(|| CatalogError::validation("only objects can be updated"))?;

    for (key, new_value) in data {
        if key == ID || skip_keys.contains(&key.as_str()) {
            continue;
        }
        if !fields.contains_key(key) {
            return Err(CatalogError::validation(format!("unknown field '{}'", key)));
        }
        fields.insert(key.clone(), new_value.clone());
    }

    serde_json::from_value(value).map_err(|e| CatalogError::validation(e.to_string()))
}
