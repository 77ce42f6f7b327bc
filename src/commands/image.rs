//! Image generation command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_config, require, require_model, to_body, CommandKind, OpenAiCommand};
use crate::types::ModelRecord;
use crate::Result;

const SOURCE: &str = "image_generation_command";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    model: String,
    prompt: String,
    #[serde(default)]
    n: Option<u32>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    response_format: Option<String>,
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<String>,
}

/// `POST /v1/images/generations`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageGenerationCommand;

impl OpenAiCommand for ImageGenerationCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::ImageGeneration
    }

    fn path(&self) -> &'static str {
        "/v1/images/generations"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: ImageConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(!cfg.prompt.trim().is_empty(), "prompt", "prompt must not be empty", SOURCE)?;
        require(cfg.n != Some(0), "n", "n must be at least 1", SOURCE)?;

        to_body(&ImageRequest {
            model: cfg.model,
            prompt: cfg.prompt,
            n: cfg.n,
            size: cfg.size,
            quality: cfg.quality,
            response_format: cfg.response_format,
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        model.id.starts_with("dall-e") || model.id.starts_with("gpt-image")
    }
}
