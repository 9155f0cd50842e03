//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The session token is loaded from BETFAIR_SESSION_TOKEN or
//! session_token_file, never from the TOML body, so the config file can be
//! checked in without a live credential.

use common::Secret;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SESSION_TOKEN_ENV: &str = "BETFAIR_SESSION_TOKEN";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    #[serde(default)]
    pub keepalive: KeepAliveConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Identity service and credentials
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    pub app_key: Secret<String>,
    /// Jurisdiction selecting the identity host (e.g. "italy", "australia")
    #[serde(default)]
    pub locale: Option<String>,
    /// Overrides the locale-derived identity URI
    #[serde(default)]
    pub identity_uri: Option<String>,
    #[serde(skip)]
    pub session_token: Option<Secret<String>>,
    /// Path to a file containing the session token (alternative to the env var)
    #[serde(default)]
    pub session_token_file: Option<PathBuf>,
}

/// Keep-alive schedule
#[derive(Debug, Deserialize)]
pub struct KeepAliveConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Health and metrics listener
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_interval() -> u64 {
    900
}

fn default_timeout() -> u64 {
    30
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9464))
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Session token resolution order:
    /// 1. BETFAIR_SESSION_TOKEN env var
    /// 2. session_token_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if config.session.app_key.expose().trim().is_empty() {
            return Err(common::Error::Config("app_key must not be empty".into()));
        }

        if let Some(uri) = &config.session.identity_uri {
            if !uri.starts_with("http://") && !uri.starts_with("https://") {
                return Err(common::Error::Config(format!(
                    "identity_uri must start with http:// or https://, got: {uri}"
                )));
            }
        }

        if config.keepalive.interval_secs == 0 {
            return Err(common::Error::Config(
                "interval_secs must be greater than 0".into(),
            ));
        }

        if config.keepalive.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        // An empty or whitespace-only env var counts as unset.
        let env_token = std::env::var(SESSION_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty());

        if let Some(token) = env_token {
            config.session.session_token = Some(Secret::new(token));
        } else if let Some(ref token_file) = config.session.session_token_file {
            let token = std::fs::read_to_string(token_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read session_token_file {}: {e}",
                    token_file.display()
                ))
            })?;
            let token = token.trim().to_owned();
            if !token.is_empty() {
                config.session.session_token = Some(Secret::new(token));
            }
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("betfair-keepalive.toml")
    }

    /// Explicit identity URI, or the one for the configured locale.
    pub fn identity_uri(&self) -> String {
        match &self.session.identity_uri {
            Some(uri) => uri.clone(),
            None => betfair_session::identity_uri_for_locale(self.session.locale.as_deref()),
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.keepalive.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.keepalive.timeout_secs)
    }
}
