//! Keep-alive health tracking
//!
//! Records the outcome of every keep-alive so `/health` can report whether
//! the session is being held open.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use betfair_keepalive::Error;
use betfair_session::SessionState;
use serde::Serialize;
use tokio::sync::Mutex;

/// Result of the most recent keep-alive.
#[derive(Debug, Clone, Serialize)]
pub struct LastOutcome {
    /// "success" or a failure kind label
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unix seconds
    pub at: u64,
}

#[derive(Debug, Default)]
struct Counters {
    keepalives_total: u64,
    failures_total: u64,
    login_required: bool,
    last: Option<LastOutcome>,
}

/// Shared keep-alive health, updated by the runner and read by `/health`.
pub struct Health {
    session: Arc<SessionState>,
    counters: Mutex<Counters>,
}

impl Health {
    pub fn new(session: Arc<SessionState>) -> Self {
        Self {
            session,
            counters: Mutex::new(Counters::default()),
        }
    }

    pub async fn record_success(&self, elapsed_secs: f64) {
        let mut c = self.counters.lock().await;
        c.keepalives_total += 1;
        c.login_required = false;
        c.last = Some(LastOutcome {
            outcome: "success",
            elapsed_secs: Some(elapsed_secs),
            error: None,
            at: unix_now(),
        });
    }

    pub async fn record_failure(&self, error: &Error) {
        let mut c = self.counters.lock().await;
        c.keepalives_total += 1;
        c.failures_total += 1;
        c.login_required = error.requires_login();
        c.last = Some(LastOutcome {
            outcome: error.kind().as_str(),
            elapsed_secs: None,
            error: Some(error.to_string()),
            at: unix_now(),
        });
    }

    /// "unhealthy" once login is required, "healthy" after a successful
    /// keep-alive, "degraded" otherwise (no attempt yet or a retryable failure).
    pub async fn status(&self) -> &'static str {
        let c = self.counters.lock().await;
        if c.login_required {
            "unhealthy"
        } else if c.last.as_ref().is_some_and(|l| l.outcome == "success") {
            "healthy"
        } else {
            "degraded"
        }
    }

    /// Body of the `/health` response.
    pub async fn snapshot(&self) -> serde_json::Value {
        let status = self.status().await;
        let session_expired = self.session.session_expired().await;
        let c = self.counters.lock().await;
        serde_json::json!({
            "status": status,
            "session_expired": session_expired,
            "keepalives_total": c.keepalives_total,
            "failures_total": c.failures_total,
            "last_outcome": c.last,
        })
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
