//! 类型模块：连接器的输入、输出与模型记录类型。
//!
//! # Types Module
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Credential`] | Bearer-token secret, redacted in `Debug` |
//! | [`ActionRequest`] | Operation kind + opaque configuration payload |
//! | [`TriggerRequest`] | Model-discovery request |
//! | [`ExecutionResult`] | Uniform outcome of `execute` |
//! | [`RequestEcho`] | Redacted copy of the outbound request |
//! | [`ModelRecord`] / [`DisplayModel`] | Raw and caller-facing model entries |
//! | [`Message`] | Chat message accepted in configuration |

pub mod action;
pub mod message;
pub mod model;
pub mod result;

pub use action::{ActionRequest, Credential, TriggerRequest};
pub use message::{ContentBlock, Message, MessageContent, MessageRole};
pub use model::{DisplayModel, ModelRecord};
pub use result::{ExecutionResult, RequestEcho};
