use std::time::Duration;

use futures::future::{self, BoxFuture, Either};

use crate::cache::{Cache, CacheStorage};
use crate::net::error::timed_out;
use crate::net::{FetchRequest, FetchResponse, Method, Network, NetworkResult};
use crate::platform::runtime;
use crate::worker::api::OfflineWorker;
use crate::worker::events::{FetchDecision, FetchEvent};

fn service_unavailable() -> FetchResponse {
    FetchResponse::new(503, "offline").with_header("content-type", "text/plain")
}

impl OfflineWorker {
    /// Routes one fetch event.
    ///
    /// Only GET over HTTP(S) is intercepted, and only once this version is
    /// activated; everything else passes through to the host's default
    /// handling. Interception never fails: every error path resolves to a
    /// cached response or the offline fallback document.
    pub async fn handle_fetch(&self, event: &mut FetchEvent) -> FetchDecision {
        let request = event.request.clone();
        if request.method != Method::Get || !request.is_http() {
            return FetchDecision::Passthrough;
        }
        if !self.state().can_intercept_fetch() {
            log::debug!(
                "worker {} is {} and cannot intercept {}",
                self.version(),
                self.state(),
                request.url
            );
            return FetchDecision::Passthrough;
        }

        let response = if request.path().starts_with(&self.config().api_prefix) {
            self.network_first(&request).await
        } else {
            self.stale_while_revalidate(request, event).await
        };
        FetchDecision::Respond(response)
    }

    /// API policy: live network bounded by the configured deadline, offline
    /// fallback otherwise. API responses are never cached.
    async fn network_first(&self, request: &FetchRequest) -> FetchResponse {
        match self
            .fetch_with_timeout(request, self.config().api_timeout())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                log::debug!("api fetch {} fell back offline: {err}", request.url);
                self.offline_fallback().await
            }
        }
    }

    /// Races the network fetch against a timer; whichever settles first
    /// wins and the loser is dropped with it, so the timer cannot leak.
    /// A fetch that loses the race is left running detached: abandoned,
    /// not aborted.
    pub(crate) async fn fetch_with_timeout(
        &self,
        request: &FetchRequest,
        timeout: Duration,
    ) -> NetworkResult<FetchResponse> {
        let network = self.inner().network.clone();
        let owned = request.clone();
        let fetch: BoxFuture<'static, NetworkResult<FetchResponse>> =
            Box::pin(async move { network.fetch(&owned).await });
        let timer = Box::pin(runtime::sleep(timeout));

        match future::select(fetch, timer).await {
            Either::Left((result, _timer)) => result,
            Either::Right(((), fetch)) => {
                runtime::spawn_detached(async move {
                    let _ = fetch.await;
                });
                Err(timed_out(format!(
                    "no response within {} ms",
                    timeout.as_millis()
                )))
            }
        }
    }

    /// Asset policy: serve a cache hit immediately and refresh the cache in
    /// the background; on a miss wait for the network, then fall back to the
    /// offline document.
    async fn stale_while_revalidate(
        &self,
        request: FetchRequest,
        event: &mut FetchEvent,
    ) -> FetchResponse {
        let cached = match self.open_cache().await {
            Ok(cache) => match cache.match_request(&request).await {
                Ok(hit) => hit,
                Err(err) => {
                    log::warn!("cache lookup for {} failed: {err}", request.url);
                    None
                }
            },
            Err(err) => {
                log::warn!("cache unavailable for {}: {err}", request.url);
                None
            }
        };

        let revalidate = self.revalidate(request.clone());
        match cached {
            Some(response) => {
                // Answer from cache now; the network round-trip only serves
                // the next request.
                event.wait_until(async move {
                    if let Err(err) = revalidate.await {
                        log::debug!("background revalidation failed: {err}");
                    }
                });
                response
            }
            None => match revalidate.await {
                Ok(response) => response,
                Err(err) => {
                    log::debug!("fetch {} failed; serving offline page: {err}", request.url);
                    self.offline_fallback().await
                }
            },
        }
    }

    /// Live fetch that writes cacheable responses through to this version's
    /// cache. Non-200 and cross-origin responses are returned but never
    /// stored.
    fn revalidate(&self, request: FetchRequest) -> BoxFuture<'static, NetworkResult<FetchResponse>> {
        let network = self.inner().network.clone();
        let caches = self.inner().caches.clone();
        let cache_name = self.config().cache_name.clone();
        Box::pin(async move {
            let response = network.fetch(&request).await?;
            if response.is_cacheable() {
                match caches.open(&cache_name).await {
                    Ok(cache) => {
                        if let Err(err) = cache.put(&request, response.clone()).await {
                            log::warn!("caching {} failed: {err}", request.url);
                        }
                    }
                    Err(err) => log::warn!("opening cache {cache_name} failed: {err}"),
                }
            }
            Ok(response)
        })
    }

    /// The reserved offline document, or a synthetic 503 if even that is
    /// missing from the cache.
    pub(crate) async fn offline_fallback(&self) -> FetchResponse {
        let request = match self.request_for_path(&self.config().offline_path) {
            Ok(request) => request,
            Err(err) => {
                log::error!("offline fallback path unusable: {err}");
                return service_unavailable();
            }
        };
        match self.open_cache().await {
            Ok(cache) => match cache.match_request(&request).await {
                Ok(Some(response)) => response,
                Ok(None) => {
                    log::error!("offline fallback {} missing from cache", request.url);
                    service_unavailable()
                }
                Err(err) => {
                    log::error!("offline fallback lookup failed: {err}");
                    service_unavailable()
                }
            },
            Err(err) => {
                log::error!("offline fallback cache unavailable: {err}");
                service_unavailable()
            }
        }
    }
}
