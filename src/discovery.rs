//! 模型过滤与排序：从原始模型列表中挑出兼容模型并按 id 排序。
//!
//! Model filter/sorter for discovery results.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::commands::OpenAiCommand;
use crate::types::{DisplayModel, ModelRecord};
use crate::{Error, Result};

/// Field of the model-list payload holding the model array.
pub const DATA_FIELD: &str = "data";

/// Turn a raw model-list payload into the caller-facing list.
///
/// Entries without a string `id` are skipped. The result holds exactly the
/// compatible ids, sorted ascending (byte order, case-sensitive); duplicate
/// ids collapse to one record and the last occurrence wins.
pub fn compatible_models(payload: &Value, command: &dyn OpenAiCommand) -> Result<Vec<DisplayModel>> {
    let models = payload
        .get(DATA_FIELD)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::DiscoveryStructure {
            message: format!("expected an array at '{}'", DATA_FIELD),
        })?;

    let compatible: BTreeMap<String, ModelRecord> = models
        .iter()
        .filter_map(ModelRecord::from_value)
        .filter(|m| command.is_model_compatible(m))
        .map(|m| (m.id.clone(), m))
        .collect();

    Ok(compatible
        .values()
        .map(|m| command.to_display_record(m))
        .collect())
}
