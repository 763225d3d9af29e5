use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::platform::error::{window_unavailable, PlatformResult};
use crate::platform::{ClientWindow, Clients};

/// In-memory window set recording every focus/open/claim/reload call.
#[derive(Default)]
pub struct MockClients {
    windows: Mutex<Vec<ClientWindow>>,
    focused: Mutex<Vec<String>>,
    opened: Mutex<Vec<String>>,
    reloaded: Mutex<Vec<String>>,
    claims: AtomicUsize,
    next_window_id: AtomicU64,
}

impl MockClients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_window(&self, window: ClientWindow) {
        self.windows.lock().unwrap().push(window);
    }

    pub fn focused(&self) -> Vec<String> {
        self.focused.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn reloaded(&self) -> Vec<String> {
        self.reloaded.lock().unwrap().clone()
    }

    pub fn claim_count(&self) -> usize {
        self.claims.load(Ordering::SeqCst)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Clients for MockClients {
    async fn match_all(&self) -> PlatformResult<Vec<ClientWindow>> {
        Ok(self.windows.lock().unwrap().clone())
    }

    async fn focus(&self, id: &str) -> PlatformResult<bool> {
        let exists = self
            .windows
            .lock()
            .unwrap()
            .iter()
            .any(|window| window.id == id);
        if exists {
            self.focused.lock().unwrap().push(id.to_string());
        }
        Ok(exists)
    }

    async fn open_window(&self, url: &str) -> PlatformResult<ClientWindow> {
        let id = format!(
            "window-{}",
            self.next_window_id.fetch_add(1, Ordering::SeqCst)
        );
        let window = ClientWindow::new(id, url);
        self.windows.lock().unwrap().push(window.clone());
        self.opened.lock().unwrap().push(url.to_string());
        Ok(window)
    }

    async fn claim(&self) -> PlatformResult<()> {
        self.claims.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reload(&self, id: &str) -> PlatformResult<()> {
        let exists = self
            .windows
            .lock()
            .unwrap()
            .iter()
            .any(|window| window.id == id);
        if !exists {
            return Err(window_unavailable(format!("window {id} is gone")));
        }
        self.reloaded.lock().unwrap().push(id.to_string());
        Ok(())
    }
}
