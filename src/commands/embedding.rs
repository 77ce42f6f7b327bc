//! Embedding command.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_config, require, require_model, to_body, CommandKind, OpenAiCommand};
use crate::types::ModelRecord;
use crate::Result;

const SOURCE: &str = "embedding_command";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

impl EmbeddingInput {
    fn is_empty(&self) -> bool {
        match self {
            EmbeddingInput::Single(s) => s.is_empty(),
            EmbeddingInput::Batch(v) => v.is_empty() || v.iter().any(|s| s.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingConfig {
    model: String,
    input: EmbeddingInput,
    #[serde(default)]
    encoding_format: Option<String>,
    #[serde(default)]
    dimensions: Option<usize>,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: EmbeddingInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

/// `POST /v1/embeddings`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddingCommand;

impl OpenAiCommand for EmbeddingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::Embedding
    }

    fn path(&self) -> &'static str {
        "/v1/embeddings"
    }

    fn build_body(&self, config: &Value) -> Result<Option<Value>> {
        let cfg: EmbeddingConfig = decode_config(config, SOURCE)?;
        require_model(&cfg.model, SOURCE)?;
        require(!cfg.input.is_empty(), "input", "input must not be empty", SOURCE)?;
        if let Some(fmt) = cfg.encoding_format.as_deref() {
            require(
                matches!(fmt, "float" | "base64"),
                "encodingFormat",
                "encodingFormat must be 'float' or 'base64'",
                SOURCE,
            )?;
        }

        to_body(&EmbeddingRequest {
            model: cfg.model,
            input: cfg.input,
            encoding_format: cfg.encoding_format,
            dimensions: cfg.dimensions,
        })
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        model.id.contains("embedding")
    }
}
