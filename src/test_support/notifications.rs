use std::sync::Mutex;

use async_trait::async_trait;

use crate::platform::error::PlatformResult;
use crate::platform::{
    NotificationCenter, NotificationOptions, PermissionState, ShownNotification,
};

/// Records displayed and closed notifications instead of hitting the OS.
/// Permission starts at [`PermissionState::Default`] and a prompt grants it
/// unless a test pins it to denied first.
pub struct MockNotificationCenter {
    shown: Mutex<Vec<ShownNotification>>,
    closed: Mutex<Vec<String>>,
    permission: Mutex<PermissionState>,
}

impl MockNotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<ShownNotification> {
        self.shown.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }

    pub fn set_permission(&self, permission: PermissionState) {
        *self.permission.lock().unwrap() = permission;
    }
}

impl Default for MockNotificationCenter {
    fn default() -> Self {
        Self {
            shown: Mutex::new(Vec::new()),
            closed: Mutex::new(Vec::new()),
            permission: Mutex::new(PermissionState::Default),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl NotificationCenter for MockNotificationCenter {
    async fn show(&self, title: &str, options: &NotificationOptions) -> PlatformResult<()> {
        self.shown
            .lock()
            .unwrap()
            .push(ShownNotification::new(title, options.clone()));
        Ok(())
    }

    async fn close(&self, tag: &str) -> PlatformResult<()> {
        self.closed.lock().unwrap().push(tag.to_string());
        Ok(())
    }

    fn permission(&self) -> PermissionState {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> PlatformResult<PermissionState> {
        let mut permission = self.permission.lock().unwrap();
        if *permission == PermissionState::Default {
            *permission = PermissionState::Granted;
        }
        Ok(*permission)
    }
}
