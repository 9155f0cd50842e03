//! Periodic keep-alive loop
//!
//! Fires one keep-alive immediately and then on every interval tick. Each
//! outcome is mapped to an action: keep going, or stop because the session
//! was rejected and only a new login can recover it.

use std::sync::Arc;
use std::time::Duration;

use betfair_keepalive::{Error, KeepAlive};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::health::Health;
use crate::metrics;

/// What the loop does after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Wait for the next tick.
    Continue,
    /// Session is dead; the runner returns.
    Stop,
}

/// Decide the next step from one attempt's result.
pub fn next_action<T>(result: &betfair_keepalive::Result<T>) -> Action {
    match result {
        Err(e) if e.requires_login() => Action::Stop,
        _ => Action::Continue,
    }
}

/// Run keep-alives until the session is rejected.
///
/// Returns the error that ended the loop. Transport, decode and non-auth
/// HTTP failures are logged and retried on the next tick.
pub async fn run(keep_alive: KeepAlive, health: Arc<Health>, interval: Duration) -> Error {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let result = keep_alive.execute(None).await;
        let action = next_action(&result);
        match result {
            Ok((resource, elapsed)) => {
                health.record_success(elapsed).await;
                metrics::set_login_required(false);
                info!(
                    elapsed_secs = elapsed,
                    product = resource.product.as_deref().unwrap_or(""),
                    "session extended"
                );
            }
            Err(e) => {
                health.record_failure(&e).await;
                if action == Action::Stop {
                    metrics::set_login_required(true);
                    error!(
                        kind = %e.kind(),
                        error_code = e.error_code().unwrap_or(""),
                        error = %e,
                        "session rejected, login required"
                    );
                    return e;
                }
                warn!(
                    kind = %e.kind(),
                    error = %e,
                    retry_in_secs = interval.as_secs(),
                    "keep-alive failed, will retry"
                );
            }
        }
    }
}
