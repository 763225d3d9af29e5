use serde_json::{Map, Value};

use crate::platform::{Clients, NotificationCenter, NotificationOptions};
use crate::worker::api::OfflineWorker;
use crate::worker::constants::{DEFAULT_NOTIFICATION_TAG, PUSH_FALLBACK_BODY, PUSH_FALLBACK_TITLE};
use crate::worker::error::{notification_failed, WorkerResult};
use crate::worker::events::{NotificationClickEvent, PushEvent};
use crate::worker::types::{ClickAction, PushMessage};

/// Interprets a raw push payload.
///
/// JSON payloads are taken as-is; anything unparsable degrades to a
/// plain-text body under the generic fallback title. A push without data
/// yields an all-defaults message. The notification is never dropped over a
/// malformed payload.
fn parse_push_data(data: Option<&[u8]>) -> PushMessage {
    let Some(raw) = data else {
        return PushMessage::default();
    };
    match serde_json::from_slice::<PushMessage>(raw) {
        Ok(message) => message,
        Err(err) => {
            log::debug!("push payload is not JSON ({err}); treating as text");
            PushMessage {
                title: Some(PUSH_FALLBACK_TITLE.to_string()),
                body: Some(String::from_utf8_lossy(raw).into_owned()),
                ..PushMessage::default()
            }
        }
    }
}

impl OfflineWorker {
    /// Displays a system notification for a push message.
    ///
    /// Resolves only after the notification is on screen, so the host keeps
    /// the worker alive until then.
    pub async fn handle_push(&self, event: PushEvent) -> WorkerResult<()> {
        let message = parse_push_data(event.data());

        let title = message
            .title
            .unwrap_or_else(|| self.config().default_notification_title.clone());
        let options = NotificationOptions {
            body: message.body.unwrap_or_else(|| PUSH_FALLBACK_BODY.to_string()),
            icon: self.config().notification_icon.clone(),
            badge: self.config().notification_icon.clone(),
            data: message.data.unwrap_or_else(|| Value::Object(Map::new())),
            tag: message
                .tag
                .unwrap_or_else(|| DEFAULT_NOTIFICATION_TAG.to_string()),
            actions: message.actions.unwrap_or_default(),
        };

        self.inner()
            .notifications
            .show(&title, &options)
            .await
            .map_err(|err| notification_failed(format!("showing \"{title}\": {err}")))?;
        Ok(())
    }

    /// Routes a notification click: close the notification, then focus an
    /// open window already showing the target URL, or open a new one.
    /// Never a no-op: a click always lands the user somewhere.
    pub async fn handle_notification_click(
        &self,
        event: NotificationClickEvent,
    ) -> WorkerResult<ClickAction> {
        let notification = &event.notification;
        if let Err(err) = self
            .inner()
            .notifications
            .close(&notification.options.tag)
            .await
        {
            log::warn!("closing notification {}: {err}", notification.options.tag);
        }

        let target = notification.target_url().unwrap_or("/").to_string();

        let windows = match self.inner().clients.match_all().await {
            Ok(windows) => windows,
            Err(err) => {
                log::warn!("window enumeration failed: {err}");
                Vec::new()
            }
        };
        for window in windows {
            if window.url.contains(&target) {
                match self.inner().clients.focus(&window.id).await {
                    Ok(true) => {
                        return Ok(ClickAction::FocusedExisting {
                            client_id: window.id,
                        })
                    }
                    Ok(false) => continue,
                    Err(err) => {
                        log::warn!("focusing window {}: {err}", window.id);
                        continue;
                    }
                }
            }
        }

        self.inner().clients.open_window(&target).await?;
        Ok(ClickAction::OpenedWindow { url: target })
    }
}
