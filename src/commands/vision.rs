//! Vision command: chat completion with image content blocks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::chat::WireMessage;
use super::{
    check_temperature, decode_config, require, require_model, to_body, CommandKind, OpenAiCommand,
};
use crate::types::{ContentBlock, Message, MessageContent, ModelRecord};
use crate::Result;

const SOURCE: &str = "vision_command";

/// The vision endpoint truncates replies aggressively without an explicit limit.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Model id fragments of `gpt-4o*` variants that take no image input.
const NON_VISION_MARKERS: &[&str] = &["audio", "realtime", "transcribe", "tts", "search"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisionConfig {
    model: String,
    messages: Vec<Message>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct VisionRequest {
    model: String,
    messages: Vec<WireMessage<Vec<WirePart>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
}

fn to_parts(content: &MessageContent) -> Vec<WirePart> {
    match content {
        MessageContent::Text(text) => vec![WirePart::Text { text: text.clone() }],
        MessageContent::Blocks(blocks) => blocks
            .iter()
            .map(|b| match b {
                ContentBlock::Text { text } => WirePart::Text { text: text.clone() },
                ContentBlock::Image { url } => WirePart::ImageUrl {
                    image_url: ImageUrl { url: url.clone() },
                },
            })
            .collect(),
    }
}

/// `POST /v1/chat/completions` with multimodal content parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisionCommand;

impl OpenAiCommand for VisionCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Vision
    }

    fn path(&self) -> &'static str {
        "/v1/chat/completions"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: VisionConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(
            !cfg.messages.is_empty(),
            "messages",
            "at least one message is required",
            SOURCE,
        )?;
        require(
            cfg.messages.iter().all(|m| !m.content.is_empty()),
            "messages",
            "message content must not be empty",
            SOURCE,
        )?;
        check_temperature(cfg.temperature, SOURCE)?;

        let messages = cfg
            .messages
            .iter()
            .map(|m| WireMessage {
                role: m.role,
                content: to_parts(&m.content),
            })
            .collect();

        to_body(&VisionRequest {
            model: cfg.model,
            messages,
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        let id = model.id.as_str();
        let family =
            id.contains("vision") || id.starts_with("gpt-4o") || id.starts_with("gpt-4-turbo");
        family && !NON_VISION_MARKERS.iter().any(|m| id.contains(m))
    }
}
