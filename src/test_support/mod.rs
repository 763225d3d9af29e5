//! Test utilities shared across crate-level unit tests.

pub mod clients;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
pub mod net;
pub mod notifications;

pub use clients::MockClients;
#[cfg(not(target_arch = "wasm32"))]
pub use http::start_mock_server;
pub use net::MockNetwork;
pub use notifications::MockNotificationCenter;
