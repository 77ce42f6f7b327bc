//! Text edit command (legacy `/v1/edits` endpoint).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    check_temperature, decode_config, require, require_model, to_body, CommandKind, OpenAiCommand,
};
use crate::types::ModelRecord;
use crate::Result;

const SOURCE: &str = "edit_command";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditConfig {
    model: String,
    instruction: String,
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    temperature: Option<f64>,
}

#[derive(Debug, Serialize)]
struct EditRequest {
    model: String,
    instruction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

/// `POST /v1/edits`
#[derive(Debug, Clone, Copy, Default)]
pub struct EditCommand;

impl OpenAiCommand for EditCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Edit
    }

    fn path(&self) -> &'static str {
        "/v1/edits"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: EditConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(
            !cfg.instruction.trim().is_empty(),
            "instruction",
            "instruction must not be empty",
            SOURCE,
        )?;
        check_temperature(cfg.temperature, SOURCE)?;

        to_body(&EditRequest {
            model: cfg.model,
            instruction: cfg.instruction,
            input: cfg.input,
            temperature: cfg.temperature,
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        model.id.contains("edit")
    }
}
