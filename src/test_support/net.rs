use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::net::error::{request_failed, NetworkResult};
use crate::net::{FetchRequest, FetchResponse, Network};
use crate::platform::runtime;

#[derive(Clone)]
struct MockRoute {
    /// `None` simulates a network failure for this route.
    response: Option<FetchResponse>,
    delay: Option<Duration>,
}

/// Scriptable [`Network`]: routes are keyed by full URL or by path, answers
/// can be delayed to exercise timeout races, and every request is recorded.
#[derive(Clone, Default)]
pub struct MockNetwork {
    inner: Arc<MockNetworkInner>,
}

#[derive(Default)]
struct MockNetworkInner {
    routes: Mutex<HashMap<String, MockRoute>>,
    calls: Mutex<Vec<FetchRequest>>,
    fail_all: AtomicBool,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for `key`, either a path (`/index.html`) or a full URL.
    pub fn respond(&self, key: &str, response: FetchResponse) {
        self.inner.routes.lock().unwrap().insert(
            key.to_string(),
            MockRoute {
                response: Some(response),
                delay: None,
            },
        );
    }

    pub fn respond_with_delay(&self, key: &str, response: FetchResponse, delay: Duration) {
        self.inner.routes.lock().unwrap().insert(
            key.to_string(),
            MockRoute {
                response: Some(response),
                delay: Some(delay),
            },
        );
    }

    /// Makes this route fail like a dead connection.
    pub fn fail(&self, key: &str) {
        self.inner.routes.lock().unwrap().insert(
            key.to_string(),
            MockRoute {
                response: None,
                delay: None,
            },
        );
    }

    /// Cuts the whole network, routes included.
    pub fn fail_all(&self) {
        self.inner.fail_all.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<FetchRequest> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Network for MockNetwork {
    async fn fetch(&self, request: &FetchRequest) -> NetworkResult<FetchResponse> {
        self.inner.calls.lock().unwrap().push(request.clone());

        let route = {
            let routes = self.inner.routes.lock().unwrap();
            routes
                .get(request.url.as_str())
                .or_else(|| routes.get(request.path()))
                .cloned()
        };

        if let Some(delay) = route.as_ref().and_then(|route| route.delay) {
            runtime::sleep(delay).await;
        }
        if self.inner.fail_all.load(Ordering::SeqCst) {
            return Err(request_failed(format!("network down (mock): {}", request.url)));
        }

        match route {
            Some(MockRoute {
                response: Some(mut response),
                ..
            }) => {
                if response.url.is_none() {
                    response.url = Some(request.url.clone());
                }
                Ok(response)
            }
            Some(MockRoute { response: None, .. }) => Err(request_failed(format!(
                "connection refused (mock): {}",
                request.url
            ))),
            None => Err(request_failed(format!(
                "no mock route for {}",
                request.url
            ))),
        }
    }
}
