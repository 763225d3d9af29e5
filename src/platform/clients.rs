use async_trait::async_trait;

use crate::platform::error::PlatformResult;

/// A browser window/tab currently under the worker's control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientWindow {
    pub id: String,
    pub url: String,
}

impl ClientWindow {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }
}

/// Host access to the set of open application windows.
///
/// The set is queried on demand and never persisted; window identity is only
/// meaningful until the window closes.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Clients: Send + Sync + 'static {
    /// Every open window-type client, in host order.
    async fn match_all(&self) -> PlatformResult<Vec<ClientWindow>>;

    /// Brings the window to the foreground. Returns `false` when the window
    /// is already gone.
    async fn focus(&self, id: &str) -> PlatformResult<bool>;

    /// Opens a new window at `url`.
    async fn open_window(&self, url: &str) -> PlatformResult<ClientWindow>;

    /// Takes control of all open windows without waiting for a navigation.
    async fn claim(&self) -> PlatformResult<()>;

    /// Re-navigates the window to its current URL so it picks up the newly
    /// activated worker version.
    async fn reload(&self, id: &str) -> PlatformResult<()>;
}
