//! Shared session state
//!
//! `SessionState` is the handle endpoints receive. Immutable parts (app key,
//! identity URI, connection pool) are plain fields; the session token and the
//! time it was last written sit behind a tokio Mutex so that a keep-alive
//! running in a background task can rotate the token while request handlers
//! read it.

use std::fmt;
use std::time::{Duration, Instant};

use common::Secret;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::sync::Mutex;
use tracing::debug;

use crate::constants::SESSION_TIMEOUT;
use crate::error::{Error, Result};

const X_APPLICATION: &str = "x-application";
const X_AUTHENTICATION: &str = "x-authentication";

struct TokenSlot {
    token: Option<Secret<String>>,
    /// When the token was last written, used for staleness checks only.
    written_at: Option<Instant>,
}

/// Application key, session token and connection pool for one logged-in client.
pub struct SessionState {
    app_key: Secret<String>,
    identity_uri: String,
    client: reqwest::Client,
    slot: Mutex<TokenSlot>,
}

impl SessionState {
    /// Build session state around a fresh connection pool.
    ///
    /// `identity_uri` gets a trailing `/` if it lacks one. `timeout` applies
    /// to every request sent through `default_client()`. An initial token
    /// counts as freshly written.
    pub fn new(
        app_key: impl Into<String>,
        session_token: Option<String>,
        identity_uri: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self::with_client(app_key, session_token, identity_uri, client))
    }

    /// Build session state around an existing connection pool.
    pub fn with_client(
        app_key: impl Into<String>,
        session_token: Option<String>,
        identity_uri: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        let mut identity_uri = identity_uri.into();
        if !identity_uri.ends_with('/') {
            identity_uri.push('/');
        }
        let written_at = session_token.as_ref().map(|_| Instant::now());
        Self {
            app_key: Secret::new(app_key.into()),
            identity_uri,
            client,
            slot: Mutex::new(TokenSlot {
                token: session_token.map(Secret::new),
                written_at,
            }),
        }
    }

    /// Base URI for identity calls, ending in `/`.
    pub fn identity_uri(&self) -> &str {
        &self.identity_uri
    }

    /// The persistent connection pool used when a caller passes no client.
    pub fn default_client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Current session token, if any.
    pub async fn session_token(&self) -> Option<String> {
        let slot = self.slot.lock().await;
        slot.token.as_ref().map(|t| t.expose().clone())
    }

    /// Overwrite the session token. `None` clears it.
    ///
    /// Always records the write time, including for `None`.
    pub async fn set_session_token(&self, token: Option<String>) {
        let mut slot = self.slot.lock().await;
        slot.token = token.map(Secret::new);
        slot.written_at = Some(Instant::now());
        debug!(has_token = slot.token.is_some(), "session token updated");
    }

    /// Whether the session should be considered stale.
    ///
    /// True with no token, or when the token was written more than
    /// `SESSION_TIMEOUT` ago.
    pub async fn session_expired(&self) -> bool {
        let slot = self.slot.lock().await;
        match (&slot.token, slot.written_at) {
            (Some(_), Some(at)) => at.elapsed() > SESSION_TIMEOUT,
            _ => true,
        }
    }

    /// Headers for a keep-alive call.
    ///
    /// `X-Authentication` is left out when no token is held. Credential
    /// values are flagged sensitive so they are hidden from `Debug`.
    pub async fn keep_alive_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(X_APPLICATION, sensitive_value(X_APPLICATION, self.app_key.expose())?);

        let slot = self.slot.lock().await;
        if let Some(token) = &slot.token {
            headers.insert(X_AUTHENTICATION, sensitive_value(X_AUTHENTICATION, token.expose())?);
        }
        Ok(headers)
    }
}

fn sensitive_value(name: &str, value: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader(name.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("app_key", &self.app_key)
            .field("identity_uri", &self.identity_uri)
            .finish_non_exhaustive()
    }
}
