//! Named, versioned request/response cache stores.
//!
//! Mirrors the browser Cache API surface the worker relies on: a
//! [`CacheStorage`] holding one store per version tag, each store keyed by
//! request identity (method + URL, `GET` only). Activation keeps exactly one
//! version resident; everything else is swept.

pub mod error;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

pub use error::{CacheError, CacheErrorCode, CacheResult};
pub use memory::MemoryCaches;

use crate::net::{FetchRequest, FetchResponse};

/// One cache version: a request → response map.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Cache: Send + Sync + 'static {
    /// Looks up a stored response for `request`.
    async fn match_request(&self, request: &FetchRequest) -> CacheResult<Option<FetchResponse>>;

    /// Stores `response` under the identity of `request`. Rejects non-GET
    /// requests.
    async fn put(&self, request: &FetchRequest, response: FetchResponse) -> CacheResult<()>;

    /// Stores every entry, or none: used by install to commit the static
    /// asset manifest atomically.
    async fn put_all(&self, entries: Vec<(FetchRequest, FetchResponse)>) -> CacheResult<()>;

    async fn delete(&self, request: &FetchRequest) -> CacheResult<bool>;

    async fn keys(&self) -> CacheResult<Vec<String>>;
}

/// The collection of cache versions owned by one worker scope.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CacheStorage: Send + Sync + 'static {
    /// Opens the named cache, creating it when absent.
    async fn open(&self, name: &str) -> CacheResult<Arc<dyn Cache>>;

    /// Names of every resident cache version.
    async fn keys(&self) -> CacheResult<Vec<String>>;

    /// Drops the named cache entirely. Returns whether it existed.
    async fn delete(&self, name: &str) -> CacheResult<bool>;
}
