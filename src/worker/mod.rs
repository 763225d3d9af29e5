//! The offline worker core: lifecycle, fetch interception, push routing and
//! the host-facing registration surface.

mod api;
pub mod config;
pub mod constants;
pub mod error;
mod events;
mod fetch;
mod lifecycle;
mod push;
mod registration;
mod types;


pub use api::OfflineWorker;
pub use config::WorkerConfig;
pub use events::{ExtendableEvent, FetchDecision, FetchEvent, NotificationClickEvent, PushEvent};
pub use lifecycle::WorkerState;
pub use registration::{InstallChoice, Registration};
pub use types::{ClickAction, PushMessage};
