//! Client-wide settings, shared by every request a `WebClient` sends.

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::error::{Result, WebError};

pub const USER_AGENT_ENV: &str = "WEBCLIENT_USER_AGENT";
pub const CONNECT_TIMEOUT_ENV: &str = "WEBCLIENT_CONNECT_TIMEOUT_MS";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// TCP connect timeout. `None` waits for the OS to give up.
    pub connect_timeout: Option<Duration>,
    /// Idle keep-alive connections kept per host. `0` closes each connection
    /// once its response has been read.
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            pool_max_idle_per_host: usize::MAX,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            user_agent: concat!("webclient/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `WEBCLIENT_USER_AGENT` and
    /// `WEBCLIENT_CONNECT_TIMEOUT_MS` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(agent) = lookup(USER_AGENT_ENV).filter(|a| !a.trim().is_empty()) {
            config.user_agent = agent;
        }

        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.connect_timeout = Some(Duration::from_millis(ms)),
                Err(e) => warn!(
                    key = CONNECT_TIMEOUT_ENV,
                    value = %raw,
                    error = %e,
                    "ignoring unparsable connect timeout"
                ),
            }
        }

        config
    }

    pub(crate) fn build_client(&self) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(&self.user_agent)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout);

        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| WebError::Request(format!("failed to build HTTP client: {e}")))
    }
}
