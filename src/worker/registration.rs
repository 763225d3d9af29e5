use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::cache::CacheStorage;
use crate::net::Network;
use crate::platform::{Clients, ConnectivityMonitor, NotificationCenter, PermissionState};
use crate::util::{ListenerSet, Unsubscribe};
use crate::worker::api::OfflineWorker;
use crate::worker::config::WorkerConfig;
use crate::worker::error::{
    internal_error, invalid_state, no_update_pending, permission_blocked, WorkerResult,
};
use crate::worker::events::{FetchDecision, FetchEvent, NotificationClickEvent, PushEvent};
use crate::worker::lifecycle::WorkerState;
use crate::worker::types::ClickAction;

/// Outcome of the host's install prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallChoice {
    Accepted,
    Dismissed,
}

/// The host-facing handle around worker versions.
///
/// Owns the active and waiting versions, routes events to whichever version
/// is in control, and surfaces the signals UI collaborators consume: update
/// availability, connectivity and installability. Cheap to clone; clones
/// share state.
#[derive(Clone)]
pub struct Registration {
    inner: Arc<RegistrationInner>,
}

struct RegistrationInner {
    caches: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
    clients: Arc<dyn Clients>,
    notifications: Arc<dyn NotificationCenter>,
    active: Mutex<Option<OfflineWorker>>,
    waiting: Mutex<Option<OfflineWorker>>,
    update_listeners: ListenerSet<String>,
    installable: AtomicBool,
    installable_listeners: ListenerSet<bool>,
    connectivity: ConnectivityMonitor,
    /// Version tag the controlled windows were last reloaded for.
    reloaded_for: Mutex<Option<String>>,
}

impl Registration {
    pub fn new(
        caches: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
        clients: Arc<dyn Clients>,
        notifications: Arc<dyn NotificationCenter>,
    ) -> Self {
        Self {
            inner: Arc::new(RegistrationInner {
                caches,
                network,
                clients,
                notifications,
                active: Mutex::new(None),
                waiting: Mutex::new(None),
                update_listeners: ListenerSet::new(),
                installable: AtomicBool::new(false),
                installable_listeners: ListenerSet::new(),
                connectivity: ConnectivityMonitor::new(),
                reloaded_for: Mutex::new(None),
            }),
        }
    }

    /// Installs a worker version for `config` and places it.
    ///
    /// The first version activates immediately. A later version becomes the
    /// waiting worker and fires the update-available signal; when its config
    /// requests skip-waiting it is promoted on the spot as well, leaving the
    /// reload to [`apply_update`](Registration::apply_update).
    ///
    /// An install failure leaves the registration untouched; the host simply
    /// retries on next load.
    pub async fn register(&self, config: WorkerConfig) -> WorkerResult<OfflineWorker> {
        let worker = OfflineWorker::new(
            config,
            Arc::clone(&self.inner.caches),
            Arc::clone(&self.inner.network),
            Arc::clone(&self.inner.clients),
            Arc::clone(&self.inner.notifications),
        )?;
        worker.install().await?;

        let has_active = self.inner.active.lock().unwrap().is_some();
        if !has_active {
            self.promote(worker.clone()).await?;
        } else {
            *self.inner.waiting.lock().unwrap() = Some(worker.clone());
            log::info!("worker {} installed and waiting", worker.version());
            self.inner
                .update_listeners
                .notify(&worker.version().to_string());
            if worker.skip_waiting_requested() {
                self.activate_waiting().await?;
            }
        }
        Ok(worker)
    }

    async fn promote(&self, worker: OfflineWorker) -> WorkerResult<()> {
        worker.activate().await?;
        let previous = self.inner.active.lock().unwrap().replace(worker);
        if let Some(old) = previous {
            old.set_state(WorkerState::Redundant);
        }
        Ok(())
    }

    /// Forces the waiting version into control.
    pub async fn activate_waiting(&self) -> WorkerResult<OfflineWorker> {
        let waiting = self
            .inner
            .waiting
            .lock()
            .unwrap()
            .take()
            .ok_or_else(no_update_pending)?;
        self.promote(waiting.clone()).await?;
        Ok(waiting)
    }

    /// The UI's "Update Now": activate the waiting version when there is
    /// one, then reload every controlled window. Windows reload at most once per
    /// activated version, no matter how often this is called.
    pub async fn apply_update(&self) -> WorkerResult<()> {
        if self.update_available() {
            self.activate_waiting().await?;
        }
        let version = self
            .active()
            .map(|worker| worker.version().to_string())
            .ok_or_else(|| invalid_state("no worker version is active"))?;
        self.reload_clients_once(&version).await
    }

    async fn reload_clients_once(&self, version: &str) -> WorkerResult<()> {
        {
            let mut reloaded = self.inner.reloaded_for.lock().unwrap();
            if reloaded.as_deref() == Some(version) {
                log::debug!("windows already reloaded for {version}");
                return Ok(());
            }
            *reloaded = Some(version.to_string());
        }
        let windows = self.inner.clients.match_all().await?;
        for window in windows {
            if let Err(err) = self.inner.clients.reload(&window.id).await {
                log::warn!("reloading window {}: {err}", window.id);
            }
        }
        Ok(())
    }

    pub fn active(&self) -> Option<OfflineWorker> {
        self.inner.active.lock().unwrap().clone()
    }

    pub fn waiting(&self) -> Option<OfflineWorker> {
        self.inner.waiting.lock().unwrap().clone()
    }

    /// Whether a newer version is installed and waiting to take over.
    pub fn update_available(&self) -> bool {
        self.inner.waiting.lock().unwrap().is_some()
    }

    /// Fires with the incoming version tag whenever a new version lands in
    /// the waiting slot.
    pub fn on_update_available<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&String) + Send + Sync + 'static,
    {
        self.inner.update_listeners.subscribe(callback)
    }

    // ---- connectivity -------------------------------------------------

    pub fn online(&self) -> bool {
        self.inner.connectivity.online()
    }

    /// Host feed for `online`/`offline` events.
    pub fn set_online(&self, online: bool) {
        self.inner.connectivity.set_online(online);
    }

    pub fn on_connectivity_change<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.inner.connectivity.subscribe(callback)
    }

    // ---- installability ----------------------------------------------

    pub fn installable(&self) -> bool {
        self.inner.installable.load(Ordering::SeqCst)
    }

    /// Host feed for the install-prompt-available signal.
    pub fn set_installable(&self, installable: bool) {
        let previous = self.inner.installable.swap(installable, Ordering::SeqCst);
        if previous != installable {
            self.inner.installable_listeners.notify(&installable);
        }
    }

    pub fn on_installable_change<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&bool) + Send + Sync + 'static,
    {
        self.inner.installable_listeners.subscribe(callback)
    }

    /// Records the user's answer to the install prompt; the prompt is spent
    /// either way.
    pub fn report_install_choice(&self, choice: InstallChoice) {
        log::info!("install prompt outcome: {choice:?}");
        self.set_installable(false);
    }

    // ---- notification permission -------------------------------------

    pub fn notification_permission(&self) -> PermissionState {
        self.inner.notifications.permission()
    }

    /// Requests notification permission, reporting an already-denied
    /// permission as blocked instead of prompting again.
    pub async fn request_notification_permission(&self) -> WorkerResult<PermissionState> {
        match self.inner.notifications.permission() {
            PermissionState::Granted => Ok(PermissionState::Granted),
            PermissionState::Denied => Err(permission_blocked(
                "Notification permission was previously blocked by the user.",
            )),
            PermissionState::Default => self
                .inner
                .notifications
                .request_permission()
                .await
                .map_err(|err| internal_error(format!("requesting permission: {err}"))),
        }
    }

    // ---- event routing ------------------------------------------------

    /// Routes a fetch event to the version in control, if any.
    pub async fn handle_fetch(&self, event: &mut FetchEvent) -> FetchDecision {
        match self.active() {
            Some(worker) => worker.handle_fetch(event).await,
            None => FetchDecision::Passthrough,
        }
    }

    pub async fn handle_push(&self, event: PushEvent) -> WorkerResult<()> {
        self.active()
            .ok_or_else(|| invalid_state("no worker version is active"))?
            .handle_push(event)
            .await
    }

    pub async fn handle_notification_click(
        &self,
        event: NotificationClickEvent,
    ) -> WorkerResult<ClickAction> {
        self.active()
            .ok_or_else(|| invalid_state("no worker version is active"))?
            .handle_notification_click(event)
            .await
    }
}
