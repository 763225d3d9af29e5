use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::platform::NotificationAction;

/// Wire schema of a push message payload. Every field is optional; the
/// router applies documented defaults for whatever is missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushMessage {
    pub title: Option<String>,
    pub body: Option<String>,
    pub data: Option<Value>,
    pub tag: Option<String>,
    pub actions: Option<Vec<NotificationAction>>,
}

/// What the click router did with a notification click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// An already-open window contained the target URL and was focused.
    FocusedExisting { client_id: String },
    /// No open window matched; a new one was opened at the target.
    OpenedWindow { url: String },
}
