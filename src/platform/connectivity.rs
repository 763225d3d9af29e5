use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::util::{ListenerSet, Unsubscribe};

/// Tracks the browser's online/offline status for UI collaborators.
///
/// The host feeds `online`/`offline` edges in; subscribers are notified only
/// when the flag actually changes. Starts online, matching `navigator.onLine`
/// before any event has fired.
#[derive(Clone, Default)]
pub struct ConnectivityMonitor {
    inner: Arc<ConnectivityInner>,
}

struct ConnectivityInner {
    online: AtomicBool,
    listeners: ListenerSet<bool>,
}

impl Default for ConnectivityInner {
    fn default() -> Self {
        Self {
            online: AtomicBool::new(true),
            listeners: ListenerSet::new(),
        }
    }
}

impl ConnectivityMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Records a connectivity edge reported by the host.
    pub fn set_online(&self, online: bool) {
        let previous = self.inner.online.swap(online, Ordering::SeqCst);
        if previous != online {
            log::debug!("connectivity changed: online={online}");
            self.inner.listeners.notify(&online);
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.inner.listeners.subscribe(callback)
    }
}
