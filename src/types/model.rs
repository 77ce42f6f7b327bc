//! Model-list records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a raw model list.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub id: String,
    pub raw: Map<String, Value>,
}

impl ModelRecord {
    /// Returns `None` for entries that are not objects or lack a string `id`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let raw = value.as_object()?;
        let id = raw.get("id")?.as_str()?;
        Some(Self {
            id: id.to_string(),
            raw: raw.clone(),
        })
    }
}

/// Model entry exposed to the caller (dropdown-shaped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub label: String,
    pub value: String,
}

impl DisplayModel {
    pub fn from_id(id: &str) -> Self {
        Self {
            label: id.to_string(),
            value: id.to_string(),
        }
    }
}
