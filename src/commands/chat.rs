//! Chat completion command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    check_temperature, decode_config, require, require_model, to_body, CommandKind, OpenAiCommand,
};
use crate::types::{Message, MessageRole, ModelRecord};
use crate::Result;

const SOURCE: &str = "chat_command";

/// Model id fragments that mark a `gpt*` model as unsuitable for plain chat.
const NON_CHAT_MARKERS: &[&str] = &[
    "instruct",
    "vision",
    "audio",
    "realtime",
    "image",
    "transcribe",
    "tts",
    "search",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatConfig {
    model: String,
    messages: Vec<Message>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<C> {
    pub role: MessageRole,
    pub content: C,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// `POST /v1/chat/completions` with text-only messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatCommand;

impl OpenAiCommand for ChatCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Chat
    }

    fn path(&self) -> &'static str {
        "/v1/chat/completions"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: ChatConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(
            !cfg.messages.is_empty(),
            "messages",
            "at least one message is required",
            SOURCE,
        )?;
        require(
            !cfg.messages.iter().any(Message::contains_image),
            "messages",
            "image content is not supported by CHAT; use VISION",
            SOURCE,
        )?;
        require(
            cfg.messages.iter().all(|m| !m.text().trim().is_empty()),
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
                content: m.text(),
            })
            .collect();

        to_body(&ChatCompletionRequest {
            model: cfg.model,
            messages,
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        model.id.starts_with("gpt") && !NON_CHAT_MARKERS.iter().any(|m| model.id.contains(m))
    }
}
