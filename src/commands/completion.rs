//! Legacy text completion command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    check_temperature, decode_config, require, require_model, to_body, CommandKind, OpenAiCommand,
};
use crate::types::ModelRecord;
use crate::Result;

const SOURCE: &str = "text_completion_command";

const BASE_COMPLETION_MODELS: &[&str] = &["davinci-002", "babbage-002"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompletionConfig {
    model: String,
    prompt: String,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    max_tokens: Option<u32>,
    #[serde(default)]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

/// `POST /v1/completions`
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCompletionCommand;

impl OpenAiCommand for TextCompletionCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::TextCompletion
    }

    fn path(&self) -> &'static str {
        "/v1/completions"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: CompletionConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(!cfg.prompt.is_empty(), "prompt", "prompt must not be empty", SOURCE)?;
        check_temperature(cfg.temperature, SOURCE)?;

        to_body(&CompletionRequest {
            model: cfg.model,
            prompt: cfg.prompt,
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            stop: cfg.stop.filter(|s| !s.is_empty()),
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        model.id.contains("instruct") || BASE_COMPLETION_MODELS.contains(&model.id.as_str())
    }
}
