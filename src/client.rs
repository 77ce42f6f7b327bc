//! 连接器客户端：执行、模型发现、连通性测试与凭证校验的统一入口。
//!
//! Connector entry points. Implementation details are split into submodules
//! under `src/client/`.

pub mod builder;
mod classify;
pub mod core;
mod execution;
mod trigger;
mod validation;

pub use builder::ConnectorBuilder;
pub use core::Connector;
pub use validation::validate_credential;
