//! Request/response model and the network seam the worker fetches through.

pub mod error;
#[cfg(not(target_arch = "wasm32"))]
mod http;
mod types;

use async_trait::async_trait;

pub use error::{NetworkError, NetworkErrorCode, NetworkResult};
#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpNetwork;
pub use types::{FetchRequest, FetchResponse, Method, ResponseKind};

/// Transport used for every outgoing fetch, whether for live pages,
/// pre-caching or background revalidation. Implementations perform a single attempt;
/// retries and fallbacks are policy decisions made by the caller.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Network: Send + Sync + 'static {
    async fn fetch(&self, request: &FetchRequest) -> NetworkResult<FetchResponse>;
}
