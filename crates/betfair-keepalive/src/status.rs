//! HTTP status validation
//!
//! Runs before decoding so that HTML error pages from gateways surface as
//! status failures, not as invalid JSON.

use crate::error::{Error, Result};
use crate::transport::RawResponse;

/// Reject any response outside the 2xx range, keeping the body for diagnostics.
pub fn check_status_code(response: &RawResponse) -> Result<()> {
    if response.status.is_success() {
        return Ok(());
    }
    Err(Error::Status {
        status: response.status,
        body: response.text.clone(),
    })
}
