use std::sync::{Arc, RwLock};

use url::Url;

use crate::cache::{Cache, CacheStorage};
use crate::net::{FetchRequest, Network};
use crate::platform::{Clients, NotificationCenter};
use crate::util::{ListenerSet, Unsubscribe};
use crate::worker::config::WorkerConfig;
use crate::worker::error::{invalid_argument, WorkerResult};
use crate::worker::lifecycle::WorkerState;

/// One worker version: owns a versioned cache, intercepts fetches and routes
/// push notifications. Cheap to clone; clones share state.
///
/// Construction validates the configuration but performs no I/O; the host
/// drives the lifecycle explicitly through [`install`](OfflineWorker::install)
/// and [`activate`](OfflineWorker::activate), normally via
/// [`Registration`](crate::worker::Registration).
#[derive(Clone)]
pub struct OfflineWorker {
    inner: Arc<WorkerInner>,
}

pub(crate) struct WorkerInner {
    pub(crate) config: WorkerConfig,
    pub(crate) origin: Url,
    pub(crate) caches: Arc<dyn CacheStorage>,
    pub(crate) network: Arc<dyn Network>,
    pub(crate) clients: Arc<dyn Clients>,
    pub(crate) notifications: Arc<dyn NotificationCenter>,
    state: RwLock<WorkerState>,
    state_listeners: ListenerSet<WorkerState>,
}

impl OfflineWorker {
    pub fn new(
        config: WorkerConfig,
        caches: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
        clients: Arc<dyn Clients>,
        notifications: Arc<dyn NotificationCenter>,
    ) -> WorkerResult<Self> {
        config.validate()?;
        let origin = config.origin_url()?;
        Ok(Self {
            inner: Arc::new(WorkerInner {
                config,
                origin,
                caches,
                network,
                clients,
                notifications,
                state: RwLock::new(WorkerState::Parsed),
                state_listeners: ListenerSet::new(),
            }),
        })
    }

    pub(crate) fn inner(&self) -> &WorkerInner {
        &self.inner
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.inner.config
    }

    /// The cache name doubles as the worker's version tag.
    pub fn version(&self) -> &str {
        &self.inner.config.cache_name
    }

    pub fn state(&self) -> WorkerState {
        *self.inner.state.read().unwrap()
    }

    pub fn skip_waiting_requested(&self) -> bool {
        self.inner.config.skip_waiting
    }

    pub fn on_state_change<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&WorkerState) + Send + Sync + 'static,
    {
        self.inner.state_listeners.subscribe(callback)
    }

    pub(crate) fn set_state(&self, new_state: WorkerState) {
        let changed = {
            let mut state = self.inner.state.write().unwrap();
            if *state == new_state {
                false
            } else {
                *state = new_state;
                true
            }
        };
        if changed {
            log::debug!("worker {} is now {new_state}", self.version());
            self.inner.state_listeners.notify(&new_state);
        }
    }

    /// Builds a GET request for a root-relative manifest path.
    pub(crate) fn request_for_path(&self, path: &str) -> WorkerResult<FetchRequest> {
        let url = self
            .inner
            .origin
            .join(path)
            .map_err(|err| invalid_argument(format!("asset path {path}: {err}")))?;
        Ok(FetchRequest::get(url))
    }

    /// Opens this version's cache store.
    pub(crate) async fn open_cache(&self) -> WorkerResult<Arc<dyn Cache>> {
        Ok(self
            .inner
            .caches
            .open(&self.inner.config.cache_name)
            .await?)
    }
}

impl std::fmt::Debug for OfflineWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineWorker")
            .field("version", &self.version())
            .field("state", &self.state())
            .finish()
    }
}
