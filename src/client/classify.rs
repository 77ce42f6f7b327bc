//! Response classification.

use serde_json::Value;

use crate::error_code::ErrorKind;
use crate::transport::HttpResponse;
use crate::{Error, Result};

/// Classify an execution response, in strict priority order:
///
/// 1. 401 → authentication error (raw body as detail)
/// 2. other 4xx → datasource error (raw body as detail)
/// 3. unparseable body → parse error, even for 2xx
/// 4. non-2xx → remote execution error carrying the parsed body
/// 5. otherwise the parsed body
pub(crate) fn classify_execution(resp: &HttpResponse) -> Result<Value> {
    match ErrorKind::from_http_status(resp.status) {
        Some(ErrorKind::Authentication) => {
            return Err(Error::Authentication {
                message: resp.text(),
            })
        }
        Some(_) => {
            return Err(Error::Datasource {
                message: resp.text(),
            })
        }
        None => {}
    }

    let body = parse_body(resp)?;

    if !resp.is_success() {
        return Err(Error::RemoteExecution {
            status: resp.status,
            body,
        });
    }
    Ok(body)
}

/// Classify a model-list response. Any 4xx means the credential was rejected.
pub(crate) fn classify_discovery(resp: &HttpResponse) -> Result<Value> {
    if resp.is_client_error() {
        return Err(Error::Authentication {
            message: resp.text(),
        });
    }
    if !resp.is_success() {
        return Err(Error::Discovery {
            status: resp.status,
        });
    }
    parse_body(resp)
}

fn parse_body(resp: &HttpResponse) -> Result<Value> {
    serde_json::from_slice(&resp.body).map_err(|e| Error::ResponseParse {
        message: e.to_string(),
    })
}
