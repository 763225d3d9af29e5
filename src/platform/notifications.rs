use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::error::PlatformResult;

/// Notification permission states as exposed by the Web Notifications API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionState {
    /// The user has not decided whether to allow notifications.
    Default,
    /// The user granted notification permissions.
    Granted,
    /// The user denied notification permissions.
    Denied,
}

/// A button attached to a displayed notification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Display options for a system notification. Every field carries the
/// documented default applied when the push payload omits it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    /// Opaque routing payload, commonly `{"url": "/events/5"}`.
    pub data: Value,
    /// Dedup/replace key: a new notification with the same tag replaces the
    /// one on screen.
    pub tag: String,
    pub actions: Vec<NotificationAction>,
}

/// A notification as handed back to click handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct ShownNotification {
    pub title: String,
    pub options: NotificationOptions,
}

impl ShownNotification {
    pub fn new(title: impl Into<String>, options: NotificationOptions) -> Self {
        Self {
            title: title.into(),
            options,
        }
    }

    /// The navigation target carried in `data.url`, when present.
    pub fn target_url(&self) -> Option<&str> {
        self.options.data.get("url").and_then(Value::as_str)
    }
}

/// Host access to system notifications and the permission flow.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait NotificationCenter: Send + Sync + 'static {
    /// Displays a notification. Resolves only once the notification is
    /// actually on screen.
    async fn show(&self, title: &str, options: &NotificationOptions) -> PlatformResult<()>;

    /// Dismisses the notification carrying `tag`.
    async fn close(&self, tag: &str) -> PlatformResult<()>;

    /// Current permission state without prompting.
    fn permission(&self) -> PermissionState;

    /// Prompts the user for notification permission.
    async fn request_permission(&self) -> PlatformResult<PermissionState>;
}
