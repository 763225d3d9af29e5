use futures::future::try_join_all;

use crate::cache::{Cache, CacheStorage};
use crate::net::{FetchRequest, Network};
use crate::platform::Clients;
use crate::worker::api::OfflineWorker;
use crate::worker::error::{activation_failed, precache_failed, WorkerResult};

/// Lifecycle states of a worker version, in transition order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Constructed, lifecycle not yet started.
    Parsed,
    Installing,
    /// Install finished; the version may wait here until promoted.
    Installed,
    Activating,
    /// In control: fetches are intercepted from here on.
    Activated,
    /// Superseded by a newer version.
    Redundant,
}

impl WorkerState {
    pub fn can_intercept_fetch(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        };
        f.write_str(label)
    }
}

impl OfflineWorker {
    /// Install: pre-cache the entire static asset manifest.
    ///
    /// All asset fetches run concurrently and the batch is committed only
    /// when every one produced a cacheable response; a single failure fails
    /// the install with nothing written, and the host retries the lifecycle
    /// on next load.
    pub async fn install(&self) -> WorkerResult<()> {
        self.set_state(WorkerState::Installing);
        log::info!("installing worker {}", self.version());

        let requests: Vec<FetchRequest> = self
            .config()
            .static_assets
            .iter()
            .map(|path| self.request_for_path(path))
            .collect::<WorkerResult<_>>()?;

        let fetches = requests.iter().map(|request| {
            let network = self.inner().network.clone();
            async move {
                let response = network
                    .fetch(request)
                    .await
                    .map_err(|err| precache_failed(format!("{}: {err}", request.url)))?;
                if !response.is_cacheable() {
                    return Err(precache_failed(format!(
                        "{} answered {} ({})",
                        request.url,
                        response.status,
                        response.kind.as_str()
                    )));
                }
                Ok(response)
            }
        });
        let responses = try_join_all(fetches).await.map_err(|err| {
            log::warn!("install of {} failed: {err}", self.version());
            err
        })?;

        let cache = self.open_cache().await?;
        let batch = requests.into_iter().zip(responses).collect();
        cache.put_all(batch).await?;

        self.set_state(WorkerState::Installed);
        Ok(())
    }

    /// Activate: sweep every cache version except this worker's own, then
    /// claim all open windows so fetches are intercepted without a reload.
    pub async fn activate(&self) -> WorkerResult<()> {
        self.set_state(WorkerState::Activating);
        log::info!("activating worker {}", self.version());

        let names = self.inner().caches.keys().await?;
        for name in names {
            if name != self.config().cache_name {
                log::info!("removing old cache {name}");
                self.inner().caches.delete(&name).await?;
            }
        }

        self.inner()
            .clients
            .claim()
            .await
            .map_err(|err| activation_failed(format!("claiming clients: {err}")))?;

        self.set_state(WorkerState::Activated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::WorkerState;
    use crate::cache::{Cache, CacheStorage, MemoryCaches};
    use crate::net::FetchResponse;
    use crate::test_support::{MockClients, MockNetwork, MockNotificationCenter};
    use crate::worker::{OfflineWorker, WorkerConfig};

    fn worker_with(network: MockNetwork, caches: MemoryCaches) -> OfflineWorker {
        OfflineWorker::new(
            WorkerConfig::default(),
            Arc::new(caches),
            Arc::new(network),
            Arc::new(MockClients::new()),
            Arc::new(MockNotificationCenter::new()),
        )
        .unwrap()
    }

    fn network_with_full_manifest() -> MockNetwork {
        let network = MockNetwork::new();
        for path in &WorkerConfig::default().static_assets {
            network.respond(path, FetchResponse::ok(format!("asset {path}")));
        }
        network
    }

    #[tokio::test(flavor = "current_thread")]
    async fn install_caches_every_manifest_path() {
        let caches = MemoryCaches::new();
        let worker = worker_with(network_with_full_manifest(), caches.clone());

        worker.install().await.unwrap();
        assert_eq!(worker.state(), WorkerState::Installed);

        let cache = caches.open("npo-event-manager-v1").await.unwrap();
        for path in &worker.config().static_assets {
            let request = worker.request_for_path(path).unwrap();
            assert!(
                cache.match_request(&request).await.unwrap().is_some(),
                "{path} missing after install"
            );
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_asset_fails_install_with_no_partial_commit() {
        let caches = MemoryCaches::new();
        let network = network_with_full_manifest();
        network.fail("/offline.html");
        let worker = worker_with(network, caches.clone());

        let err = worker.install().await.unwrap_err();
        assert_eq!(err.code_str(), "worker/precache-failed");
        assert_eq!(worker.state(), WorkerState::Installing);

        // Nothing was committed for the version that failed to install.
        if let Some(name) = caches.keys().await.unwrap().first() {
            let cache = caches.open(name).await.unwrap();
            assert!(cache.keys().await.unwrap().is_empty());
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn non_cacheable_asset_response_fails_install() {
        let caches = MemoryCaches::new();
        let network = network_with_full_manifest();
        network.respond("/manifest.json", FetchResponse::new(404, "gone"));
        let worker = worker_with(network, caches);

        let err = worker.install().await.unwrap_err();
        assert_eq!(err.code_str(), "worker/precache-failed");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn activate_sweeps_every_other_version_and_claims() {
        let caches = MemoryCaches::new();
        caches.open("npo-event-manager-v0").await.unwrap();
        caches.open("someone-elses-cache").await.unwrap();

        let clients = Arc::new(MockClients::new());
        let worker = OfflineWorker::new(
            WorkerConfig::default(),
            Arc::new(caches.clone()),
            Arc::new(network_with_full_manifest()),
            clients.clone(),
            Arc::new(MockNotificationCenter::new()),
        )
        .unwrap();

        worker.install().await.unwrap();
        worker.activate().await.unwrap();

        assert_eq!(worker.state(), WorkerState::Activated);
        assert_eq!(
            caches.keys().await.unwrap(),
            vec!["npo-event-manager-v1".to_string()]
        );
        assert_eq!(clients.claim_count(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn state_changes_notify_listeners() {
        let worker = worker_with(network_with_full_manifest(), MemoryCaches::new());
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _keep = worker.on_state_change(move |state| {
            sink.lock().unwrap().push(*state);
        });

        worker.install().await.unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![WorkerState::Installing, WorkerState::Installed]
        );
    }
}
