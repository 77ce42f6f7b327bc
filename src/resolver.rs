//! 命令解析：根据声明的操作类型选择唯一的命令变体。
//!
//! Command resolution. Selection is a pure function of the declared kind;
//! unknown kinds fail with `UnsupportedOperation` and nothing is guessed.

use serde::{Deserialize, Serialize};

use crate::commands::{create_command, CommandKind, ModelListCommand, OpenAiCommand};
use crate::types::{ActionRequest, TriggerRequest};
use crate::{Error, Result};

/// Discovery request kinds, each bound to one generation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerKind {
    ChatModels,
    CompletionModels,
    EmbeddingModels,
    ImageModels,
    EditModels,
    VisionModels,
}

impl TriggerKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim().to_ascii_uppercase().as_str() {
            "CHAT_MODELS" => Self::ChatModels,
            "COMPLETION_MODELS" => Self::CompletionModels,
            "EMBEDDING_MODELS" => Self::EmbeddingModels,
            "IMAGE_MODELS" => Self::ImageModels,
            "EDIT_MODELS" => Self::EditModels,
            "VISION_MODELS" => Self::VisionModels,
            _ => return None,
        };
        Some(kind)
    }

    /// The generation command whose compatibility filter applies.
    pub fn target(&self) -> CommandKind {
        match self {
            Self::ChatModels => CommandKind::Chat,
            Self::CompletionModels => CommandKind::TextCompletion,
            Self::EmbeddingModels => CommandKind::Embedding,
            Self::ImageModels => CommandKind::ImageGeneration,
            Self::EditModels => CommandKind::Edit,
            Self::VisionModels => CommandKind::Vision,
        }
    }
}

/// Select the command for a normal execution.
pub fn resolve(request: &ActionRequest) -> Result<Box<dyn OpenAiCommand>> {
    let tag = request
        .declared_command()
        .ok_or_else(|| Error::UnsupportedOperation {
            kind: "<missing>".to_string(),
        })?;
    resolve_kind(tag).map(create_command)
}

/// Map a declared tag to an executable kind.
pub fn resolve_kind(tag: &str) -> Result<CommandKind> {
    CommandKind::from_tag(tag).ok_or_else(|| Error::UnsupportedOperation {
        kind: tag.to_string(),
    })
}

/// Select the model-list command for a discovery call.
pub fn resolve_trigger(request: &TriggerRequest) -> Result<ModelListCommand> {
    let kind = TriggerKind::from_tag(&request.request_type).ok_or_else(|| {
        Error::UnsupportedOperation {
            kind: request.request_type.clone(),
        }
    })?;
    Ok(ModelListCommand::for_target(kind.target()))
}
