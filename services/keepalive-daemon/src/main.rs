//! Betfair session keep-alive daemon
//!
//! Single-binary service that:
//! 1. Loads an app key and an existing session token
//! 2. Sends keepAlive on a fixed interval, rotating the token when asked
//! 3. Exposes /health and /metrics
//! 4. Exits non-zero once the session is rejected, so a supervisor can log in again

mod config;
mod health;
mod metrics;
mod runner;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use betfair_keepalive::KeepAlive;
use betfair_session::SessionState;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::health::Health;

/// Shared application state accessible from all handlers
#[derive(Clone)]
struct AppState {
    health: Arc<Health>,
    prometheus: PrometheusHandle,
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// 200 while the session can still be kept alive, 503 once login is required.
async fn health_handler(State(state): State<AppState>) -> Response {
    let body = state.health.snapshot().await;
    let code = if body["status"] == "unhealthy" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (code, axum::Json(body)).into_response()
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.prometheus.render(),
    )
        .into_response()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("starting betfair-keepalive-daemon");

    let prometheus_handle = metrics::install_recorder();

    // CLI: simple --config flag parsing
    let args: Vec<String> = std::env::args().collect();
    let cli_config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str());

    let config_path = Config::resolve_path(cli_config_path);
    info!(path = %config_path.display(), "loading configuration");

    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    let identity_uri = config.identity_uri();
    info!(
        identity_uri = %identity_uri,
        interval_secs = config.keepalive.interval_secs,
        timeout_secs = config.keepalive.timeout_secs,
        has_session_token = config.session.session_token.is_some(),
        "configuration loaded"
    );

    let session = Arc::new(
        SessionState::new(
            config.session.app_key.expose().clone(),
            config
                .session
                .session_token
                .as_ref()
                .map(|t| t.expose().clone()),
            identity_uri,
            config.timeout(),
        )
        .context("failed to build session state")?,
    );

    let health = Arc::new(Health::new(session.clone()));
    let app = build_router(AppState {
        health: health.clone(),
        prometheus: prometheus_handle,
    });

    let listener = TcpListener::bind(config.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.server.listen_addr))?;
    info!(addr = %config.server.listen_addr, "serving /health and /metrics");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
    });

    let runner = runner::run(KeepAlive::new(session), health, config.interval());
    let exit_code = supervise(runner, shutdown_signal(), server_handle, shutdown_tx).await;

    info!(exit_code, "shutdown complete");
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Run until the runner gives up or a signal arrives. An early server exit
/// also ends the daemon. Returns the process exit code.
async fn supervise(
    runner: impl Future<Output = betfair_keepalive::Error>,
    shutdown: impl Future<Output = ()>,
    mut server: JoinHandle<std::io::Result<()>>,
    shutdown_tx: oneshot::Sender<()>,
) -> i32 {
    let (exit_code, server_done) = tokio::select! {
        err = runner => {
            error!(error = %err, "keep-alive stopped, shutting down");
            (1, false)
        }
        () = shutdown => (0, false),
        result = &mut server => {
            error!("server exited unexpectedly, shutting down");
            log_server_exit(result);
            (1, true)
        }
    };

    if !server_done {
        let _ = shutdown_tx.send(());
        log_server_exit(server.await);
    }
    exit_code
}

fn log_server_exit(result: Result<std::io::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "server error"),
        Err(e) => error!(error = %e, "server task panicked"),
    }
}

/// Wait for SIGTERM or SIGINT (Ctrl+C).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
