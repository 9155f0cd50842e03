//! Application status classification

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// The one `status` value that counts as success.
pub const SUCCESS: &str = "SUCCESS";

/// Accept the payload only if `status` is exactly `"SUCCESS"`.
///
/// Anything else, including a missing or null status, fails with the whole
/// payload so the caller can read fields such as `error`.
pub fn classify(response: Map<String, Value>) -> Result<Map<String, Value>> {
    match response.get("status") {
        Some(Value::String(status)) if status == SUCCESS => Ok(response),
        _ => Err(Error::KeepAlive { response }),
    }
}
