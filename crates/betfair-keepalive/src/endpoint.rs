//! The keepAlive endpoint
//!
//! Orchestrates one attempt: send, check status, decode, classify, then
//! rotate the session token. Each stage's failure is returned unchanged and
//! leaves the token untouched.

use std::sync::Arc;

use betfair_session::SessionState;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::classify::classify;
use crate::decode::decode;
use crate::error::{Error, FailureKind, Result};
use crate::metrics;
use crate::resource::KeepAliveResource;
use crate::status::check_status_code;
use crate::transport;

/// Keep-alive operations against the identity service.
#[derive(Debug, Clone)]
pub struct KeepAlive {
    session: Arc<SessionState>,
}

impl KeepAlive {
    pub fn new(session: Arc<SessionState>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// `<identity_uri>keepAlive`
    pub fn url(&self) -> String {
        format!("{}keepAlive", self.session.identity_uri())
    }

    /// Send a keep-alive and return the typed result with elapsed seconds.
    ///
    /// `client` overrides the session's default connection pool.
    pub async fn execute(
        &self,
        client: Option<&reqwest::Client>,
    ) -> Result<(KeepAliveResource, f64)> {
        let (response, elapsed) = self.request(client).await?;
        Ok((KeepAliveResource::from_response(response, elapsed), elapsed))
    }

    /// Same as `execute` but returns the decoded payload untouched.
    pub async fn execute_raw(
        &self,
        client: Option<&reqwest::Client>,
    ) -> Result<(Map<String, Value>, f64)> {
        self.request(client).await
    }

    #[instrument(skip_all, fields(url = %self.url()))]
    async fn request(&self, client: Option<&reqwest::Client>) -> Result<(Map<String, Value>, f64)> {
        let client = client.unwrap_or_else(|| self.session.default_client());

        let headers = self.session.keep_alive_headers().await.map_err(|e| {
            warn!(error = %e, "could not build keepAlive headers");
            metrics::record_failure(FailureKind::Transport, None);
            Error::transport(e)
        })?;

        let (raw, elapsed) = match transport::post(client, &self.url(), headers).await {
            Ok(sent) => sent,
            Err(e) => {
                warn!(error = %e, "keepAlive transport failure");
                metrics::record_failure(e.kind(), None);
                return Err(e);
            }
        };
        let elapsed = elapsed.as_secs_f64();

        let response = check_status_code(&raw)
            .and_then(|()| decode(&raw.text))
            .and_then(classify)
            .inspect_err(|e| {
                warn!(
                    kind = %e.kind(),
                    requires_login = e.requires_login(),
                    elapsed_secs = elapsed,
                    error = %e,
                    "keepAlive rejected"
                );
                metrics::record_failure(e.kind(), Some(elapsed));
            })?;

        // A success without a token still overwrites: the absence is state too.
        let token = response
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let rotated = token.is_some();
        self.session.set_session_token(token).await;

        metrics::record_outcome(metrics::SUCCESS_OUTCOME, Some(elapsed));
        info!(elapsed_secs = elapsed, rotated, "keepAlive succeeded");
        Ok((response, elapsed))
    }
}
