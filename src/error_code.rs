//! 连接器错误分类：定义调用方可见的错误种类及其稳定错误码。
//!
//! Connector error taxonomy.
//!
//! Every failure the connector reports to a caller is tagged with exactly one
//! [`ErrorKind`]. The kind carries a stable code string that result sinks can
//! switch on; it is also what `Display` prints.
//!
//! | Prefix | Description                              |
//! |--------|------------------------------------------|
//! | C1xxx  | Rejected credentials or request shape    |
//! | C2xxx  | Upstream answered but could not be used  |
//! | C3xxx  | Model-list lookups                       |
//! | C9xxx  | Catch-all                                |
//!
//! ## Example
//!
//! ```rust
//! use openai_connector::error_code::ErrorKind;
//!
//! let kind = ErrorKind::from_http_status(401);
//! assert_eq!(kind, Some(ErrorKind::Authentication));
//! assert_eq!(ErrorKind::Authentication.code(), "C1001");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// C1001: 401 from the API, or the credential was rejected
    Authentication,
    /// C1002: Any other 4xx from the API
    Datasource,
    /// C1003: Operation kind could not be mapped to a command
    UnsupportedOperation,
    /// C1004: Required configuration fields are absent or mistyped
    MalformedConfiguration,
    /// C2001: Response body is not valid JSON
    ResponseParse,
    /// C2002: Non-2xx response with a parseable body
    RemoteExecution,
    /// C3001: Model-list endpoint answered with a non-2xx status
    Discovery,
    /// C3002: Model-list payload lacks the model array
    DiscoveryStructure,
    /// C9999: Anything else
    Plugin,
}

impl ErrorKind {
    /// Returns the stable code string (e.g. `"C1001"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication => "C1001",
            Self::Datasource => "C1002",
            Self::UnsupportedOperation => "C1003",
            Self::MalformedConfiguration => "C1004",
            Self::ResponseParse => "C2001",
            Self::RemoteExecution => "C2002",
            Self::Discovery => "C3001",
            Self::DiscoveryStructure => "C3002",
            Self::Plugin => "C9999",
        }
    }

    /// Maps an HTTP status to the kind it forces regardless of the body.
    ///
    /// Only 4xx statuses have a body-independent kind; everything else is
    /// decided after the body has been parsed.
    pub fn from_http_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(Self::Authentication),
            400..=499 => Some(Self::Datasource),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
