use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::worker::constants::{
    API_PREFIX, API_TIMEOUT_MS, DEFAULT_CACHE_NAME, DEFAULT_NOTIFICATION_TITLE, DEFAULT_ORIGIN,
    NOTIFICATION_ICON, OFFLINE_PAGE, STATIC_ASSETS,
};
use crate::worker::error::{invalid_argument, WorkerResult};

/// Immutable configuration for one worker version.
///
/// The cache name doubles as the version tag: deploying a changed manifest or
/// caching policy means shipping a config with a new `cache_name`, which
/// supersedes every older cache at activation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub cache_name: String,
    /// Origin the root-relative paths below are resolved against.
    pub origin: String,
    /// App shell paths that must all be cached before install completes.
    pub static_assets: Vec<String>,
    pub offline_path: String,
    pub api_prefix: String,
    pub api_timeout_ms: u64,
    pub notification_icon: String,
    pub default_notification_title: String,
    /// Request immediate activation at install instead of waiting for every
    /// controlled tab to close.
    pub skip_waiting: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            static_assets: STATIC_ASSETS.iter().map(|path| path.to_string()).collect(),
            offline_path: OFFLINE_PAGE.to_string(),
            api_prefix: API_PREFIX.to_string(),
            api_timeout_ms: API_TIMEOUT_MS,
            notification_icon: NOTIFICATION_ICON.to_string(),
            default_notification_title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            skip_waiting: true,
        }
    }
}

impl WorkerConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    /// Parses and checks the scope origin.
    pub fn origin_url(&self) -> WorkerResult<Url> {
        let url = Url::parse(&self.origin)
            .map_err(|err| invalid_argument(format!("origin {}: {err}", self.origin)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid_argument(format!(
                "origin must be http(s), got {}",
                self.origin
            )));
        }
        Ok(url)
    }

    pub fn validate(&self) -> WorkerResult<()> {
        self.origin_url()?;
        if self.cache_name.is_empty() {
            return Err(invalid_argument("cache_name must not be empty"));
        }
        if self.static_assets.is_empty() {
            return Err(invalid_argument("static asset manifest must not be empty"));
        }
        for path in &self.static_assets {
            if !path.starts_with('/') {
                return Err(invalid_argument(format!(
                    "manifest paths must be root-relative, got {path}"
                )));
            }
        }
        if !self.static_assets.contains(&self.offline_path) {
            return Err(invalid_argument(format!(
                "offline fallback {} must be part of the static asset manifest",
                self.offline_path
            )));
        }
        if !self.api_prefix.starts_with('/') {
            return Err(invalid_argument(format!(
                "api_prefix must be root-relative, got {}",
                self.api_prefix
            )));
        }
        if self.api_timeout_ms == 0 {
            return Err(invalid_argument("api_timeout_ms must be positive"));
        }
        Ok(())
    }
}
