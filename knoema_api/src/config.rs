//! Client configuration, read from the environment.

use std::time::Duration;

use crate::transport::DEFAULT_TIMEOUT;

/// Host used when `KNOEMA_HOST` is not set.
pub const DEFAULT_HOST: &str = "knoema.com";

/// Connection settings for [`crate::Client`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Host name, optionally with a scheme (`knoema.com`, `https://example.org`).
    pub host: String,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            app_id: None,
            app_secret: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Reads `KNOEMA_HOST`, `KNOEMA_APP_ID`, `KNOEMA_APP_SECRET` and
    /// `KNOEMA_TIMEOUT_SECS`. Empty values count as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            host: get("KNOEMA_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            app_id: get("KNOEMA_APP_ID"),
            app_secret: get("KNOEMA_APP_SECRET"),
            timeout: get("KNOEMA_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_credentials(mut self, app_id: &str, app_secret: &str) -> Self {
        self.app_id = Some(app_id.to_string());
        self.app_secret = Some(app_secret.to_string());
        self
    }

    /// Base URL for API paths. Bare hosts are reached over plain `http://`.
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        }
    }
}
