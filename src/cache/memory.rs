use std::collections::BTreeMap;
use std::sync::Arc;

use async_lock::Mutex;
use async_trait::async_trait;

use crate::cache::error::{unsupported_method, CacheResult};
use crate::cache::{Cache, CacheStorage};
use crate::net::{FetchRequest, FetchResponse, Method};

/// In-memory [`CacheStorage`]: the default backing store for tests and for
/// hosts without durable storage. Stores are created lazily on `open` and
/// shared between handles.
#[derive(Clone, Default)]
pub struct MemoryCaches {
    caches: Arc<Mutex<BTreeMap<String, Arc<MemoryCache>>>>,
}

impl MemoryCaches {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CacheStorage for MemoryCaches {
    async fn open(&self, name: &str) -> CacheResult<Arc<dyn Cache>> {
        let mut caches = self.caches.lock().await;
        let cache = caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryCache::default()));
        Ok(Arc::clone(cache) as Arc<dyn Cache>)
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        let caches = self.caches.lock().await;
        Ok(caches.keys().cloned().collect())
    }

    async fn delete(&self, name: &str) -> CacheResult<bool> {
        let mut caches = self.caches.lock().await;
        Ok(caches.remove(name).is_some())
    }
}

#[derive(Default)]
struct MemoryCache {
    entries: Mutex<BTreeMap<String, FetchResponse>>,
}

fn require_get(request: &FetchRequest) -> CacheResult<String> {
    if request.method != Method::Get {
        return Err(unsupported_method(format!(
            "cannot cache {} {}",
            request.method, request.url
        )));
    }
    Ok(request.cache_key())
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Cache for MemoryCache {
    async fn match_request(&self, request: &FetchRequest) -> CacheResult<Option<FetchResponse>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&request.cache_key()).cloned())
    }

    async fn put(&self, request: &FetchRequest, response: FetchResponse) -> CacheResult<()> {
        let key = require_get(request)?;
        let mut entries = self.entries.lock().await;
        entries.insert(key, response);
        Ok(())
    }

    async fn put_all(&self, batch: Vec<(FetchRequest, FetchResponse)>) -> CacheResult<()> {
        // Validate the whole batch before touching the store so a bad entry
        // cannot leave a partial commit behind.
        let mut keyed = Vec::with_capacity(batch.len());
        for (request, response) in batch {
            let key = require_get(&request)?;
            keyed.push((key, response));
        }
        let mut entries = self.entries.lock().await;
        for (key, response) in keyed {
            entries.insert(key, response);
        }
        Ok(())
    }

    async fn delete(&self, request: &FetchRequest) -> CacheResult<bool> {
        let mut entries = self.entries.lock().await;
        Ok(entries.remove(&request.cache_key()).is_some())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryCaches;
    use crate::cache::{Cache, CacheStorage};
    use crate::net::{FetchRequest, FetchResponse, Method};

    fn get(url: &str) -> FetchRequest {
        FetchRequest::get_str(url).unwrap()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn open_creates_and_shares_stores() {
        let caches = MemoryCaches::new();
        let first = caches.open("app-v1").await.unwrap();
        let request = get("https://app.example.org/index.html");
        first
            .put(&request, FetchResponse::ok("shell"))
            .await
            .unwrap();

        let second = caches.open("app-v1").await.unwrap();
        let hit = second.match_request(&request).await.unwrap().unwrap();
        assert_eq!(hit.body_text(), "shell");
        assert_eq!(caches.keys().await.unwrap(), vec!["app-v1".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn put_rejects_non_get_requests() {
        let caches = MemoryCaches::new();
        let cache = caches.open("app-v1").await.unwrap();
        let mut request = get("https://app.example.org/api/events");
        request.method = Method::Post;
        let err = cache
            .put(&request, FetchResponse::ok("{}"))
            .await
            .unwrap_err();
        assert_eq!(err.code_str(), "cache/unsupported-method");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn put_all_commits_nothing_on_invalid_entry() {
        let caches = MemoryCaches::new();
        let cache = caches.open("app-v1").await.unwrap();
        let good = get("https://app.example.org/");
        let mut bad = get("https://app.example.org/api/events");
        bad.method = Method::Post;

        let result = cache
            .put_all(vec![
                (good.clone(), FetchResponse::ok("shell")),
                (bad, FetchResponse::ok("{}")),
            ])
            .await;
        assert!(result.is_err());
        assert!(cache.match_request(&good).await.unwrap().is_none());
        assert!(cache.keys().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn delete_sweeps_a_whole_version() {
        let caches = MemoryCaches::new();
        caches.open("app-v1").await.unwrap();
        caches.open("app-v2").await.unwrap();

        assert!(caches.delete("app-v1").await.unwrap());
        assert!(!caches.delete("app-v1").await.unwrap());
        assert_eq!(caches.keys().await.unwrap(), vec!["app-v2".to_string()]);
    }
}
