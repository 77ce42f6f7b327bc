//! 命令变体：每个 OpenAI 操作一个实现，通过显式枚举标签选择
//!
//! Command variants. Each supported API operation has a concrete type that
//! knows its endpoint path, HTTP method and wire body, and which models it is
//! compatible with when used as a discovery target. Variants are stateless and
//! constructed fresh per request via [`create_command`].

pub mod chat;
pub mod completion;
pub mod edit;
pub mod embedding;
pub mod image;
pub mod models;
pub mod vision;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Error, ErrorContext};
use crate::types::{DisplayModel, ModelRecord};
use crate::Result;

pub use chat::ChatCommand;
pub use completion::TextCompletionCommand;
pub use edit::EditCommand;
pub use embedding::EmbeddingCommand;
pub use image::ImageGenerationCommand;
pub use models::ModelListCommand;
pub use vision::VisionCommand;

/// Explicit tag for every operation the connector can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    Chat,
    TextCompletion,
    Embedding,
    ImageGeneration,
    Edit,
    Vision,
    ModelList,
}

impl CommandKind {
    /// Kinds a caller may request through `execute`.
    pub const EXECUTABLE: [CommandKind; 6] = [
        CommandKind::Chat,
        CommandKind::TextCompletion,
        CommandKind::Embedding,
        CommandKind::ImageGeneration,
        CommandKind::Edit,
        CommandKind::Vision,
    ];

    /// Parse a declared operation tag. Matching is exact after upper-casing;
    /// there is no prefix or fuzzy matching.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag.trim().to_ascii_uppercase().as_str() {
            "CHAT" => Self::Chat,
            "COMPLETION" | "TEXT_COMPLETION" => Self::TextCompletion,
            "EMBEDDING" | "EMBEDDINGS" => Self::Embedding,
            "IMAGE" | "IMAGE_GENERATION" => Self::ImageGeneration,
            "EDIT" => Self::Edit,
            "VISION" => Self::Vision,
            _ => return None,
        };
        Some(kind)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Chat => "CHAT",
            Self::TextCompletion => "TEXT_COMPLETION",
            Self::Embedding => "EMBEDDING",
            Self::ImageGeneration => "IMAGE_GENERATION",
            Self::Edit => "EDIT",
            Self::Vision => "VISION",
            Self::ModelList => "MODEL_LIST",
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Capability set every command variant exposes.
///
/// The trait is object-safe; the resolver hands out `Box<dyn OpenAiCommand>`.
pub trait OpenAiCommand: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> CommandKind;

    /// Endpoint path relative to the base URL, e.g. `/v1/chat/completions`.
    fn path(&self) -> &'static str;

    fn http_method(&self) -> Method {
        Method::POST
    }

    /// Full endpoint URL. Pure; performs no network access.
    fn build_uri(&self, base_url: &Url) -> Result<Url> {
        join_path(base_url, self.path())
    }

    /// Map the generic configuration into the wire schema of this operation.
    /// `None` means the request carries no body.
    fn build_body(&self, config: &Value) -> Result<Option<Value>>;

    /// Whether a listed model can be used with this operation.
    fn is_model_compatible(&self, model: &ModelRecord) -> bool;

    fn to_display_record(&self, model: &ModelRecord) -> DisplayModel {
        DisplayModel::from_id(&model.id)
    }
}

/// Factory from the explicit tag to a fresh command instance.
///
/// `ModelList` is built with the chat variant as its compatibility target;
/// use [`ModelListCommand::for_target`] for other targets.
pub fn create_command(kind: CommandKind) -> Box<dyn OpenAiCommand> {
    match kind {
        CommandKind::Chat => Box::new(ChatCommand),
        CommandKind::TextCompletion => Box::new(TextCompletionCommand),
        CommandKind::Embedding => Box::new(EmbeddingCommand),
        CommandKind::ImageGeneration => Box::new(ImageGenerationCommand),
        CommandKind::Edit => Box::new(EditCommand),
        CommandKind::Vision => Box::new(VisionCommand),
        CommandKind::ModelList => Box::new(ModelListCommand::for_target(CommandKind::Chat)),
    }
}

pub(crate) fn join_path(base_url: &Url, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|e| {
        Error::malformed(
            format!("cannot build endpoint url '{}': {}", joined, e),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_source("command_uri"),
        )
    })
}

/// Keys that may sit next to `data` in a form-style field wrapper.
const FORM_WRAPPER_KEYS: &[&str] = &["data", "viewType", "componentData"];

/// Decode a command's configuration, unwrapping form-style `{"data": v}` fields.
pub(crate) fn decode_config<T: DeserializeOwned>(config: &Value, source: &str) -> Result<T> {
    let obj = config.as_object().ok_or_else(|| {
        Error::malformed(
            "configuration must be a JSON object",
            ErrorContext::new().with_source(source),
        )
    })?;

    let mut flat = Map::with_capacity(obj.len());
    for (k, v) in obj {
        if k == "command" {
            continue;
        }
        flat.insert(k.clone(), unwrap_form_field(v).clone());
    }

    serde_json::from_value(Value::Object(flat)).map_err(|e| {
        Error::malformed(e.to_string(), ErrorContext::new().with_source(source))
    })
}

fn unwrap_form_field(v: &Value) -> &Value {
    match v {
        Value::Object(o)
            if o.contains_key("data") && o.keys().all(|k| FORM_WRAPPER_KEYS.contains(&k.as_str())) =>
        {
            &o["data"]
        }
        _ => v,
    }
}

pub(crate) fn require(cond: bool, field: &str, msg: &str, source: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::malformed(
            msg,
            ErrorContext::new().with_field_path(field).with_source(source),
        ))
    }
}

pub(crate) fn require_model(model: &str, source: &str) -> Result<()> {
    require(!model.trim().is_empty(), "model", "model must not be empty", source)
}

pub(crate) fn check_temperature(temperature: Option<f64>, source: &str) -> Result<()> {
    match temperature {
        Some(t) => require(
            (0.0..=2.0).contains(&t),
            "temperature",
            "temperature must be between 0 and 2",
            source,
        ),
        None => Ok(()),
    }
}

/// Serialize a wire struct into the body value.
pub(crate) fn to_body<T: Serialize>(wire: &T) -> Result<Option<Value>> {
    Ok(Some(serde_json::to_value(wire)?))
}
