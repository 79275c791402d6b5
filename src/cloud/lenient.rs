//! Field decoders that never reject the document.
//!
//! The catalogue is only required to be well-formed JSON. A field holding a
//! value of the wrong type is decoded as if it were absent, and mapping entries
//! that do not decode are dropped.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(super) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

pub(super) fn entries<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(optional_entries(deserializer)?.unwrap_or_default())
}

/// Like [`entries`], but keeps "not a mapping at all" distinguishable from an
/// empty mapping.
pub(super) fn optional_entries<'de, D, T>(
    deserializer: D,
) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Object(map) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };

    Ok(Some(
        map.into_iter()
            .filter_map(|(key, value)| serde_json::from_value(value).ok().map(|v| (key, v)))
            .collect(),
    ))
}
