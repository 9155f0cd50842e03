//! Sending the request and timing it

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::error::{Error, Result};

/// Status and full body text of a response, before any validation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub text: String,
}

/// POST with no body and return the raw response plus elapsed time.
///
/// The clock starts just before sending and stops once the body has been
/// read. Send and body-read failures both become `Error::Transport`.
pub async fn post(
    client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
) -> Result<(RawResponse, Duration)> {
    let sent_at = Instant::now();
    debug!(url, "sending keepAlive");

    let response = client
        .post(url)
        .headers(headers)
        .send()
        .await
        .map_err(Error::transport)?;
    let status = response.status();
    // A body cut short is a transport failure whatever the status line said.
    let text = response.text().await.map_err(Error::transport)?;

    Ok((RawResponse { status, text }, sent_at.elapsed()))
}
