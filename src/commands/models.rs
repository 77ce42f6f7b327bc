//! Model-list command used by discovery triggers.

use reqwest::Method;
use serde_json::Value;

use super::{create_command, CommandKind, OpenAiCommand};
use crate::types::{DisplayModel, ModelRecord};
use crate::Result;

/// `GET /v1/models`, filtered for one generation command.
///
/// Compatibility is delegated to the target command because "compatible"
/// differs between chat, embedding, image and the other listings.
#[derive(Debug)]
pub struct ModelListCommand {
    target: Box<dyn OpenAiCommand>,
}

impl ModelListCommand {
    pub fn for_target(target: CommandKind) -> Self {
        let target = match target {
            // A model listing cannot be its own filter.
            CommandKind::ModelList => CommandKind::Chat,
            other => other,
        };
        Self {
            target: create_command(target),
        }
    }

    pub fn target(&self) -> CommandKind {
        self.target.kind()
    }
}

impl OpenAiCommand for ModelListCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::ModelList
    }

    fn path(&self) -> &'static str {
        "/v1/models"
    }

    fn http_method(&self) -> Method {
        Method::GET
    }

    fn build_body(&self, _config: &Value) -> Result<Option<Value>> {
        Ok(None)
    }

    fn is_model_compatible(&self, model: &ModelRecord) -> bool {
        self.target.is_model_compatible(model)
    }

    fn to_display_record(&self, model: &ModelRecord) -> DisplayModel {
        self.target.to_display_record(model)
    }
}
