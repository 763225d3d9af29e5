//! Host facilities the worker consumes: async runtime helpers, open-window
//! access, connectivity tracking and system notifications.

mod clients;
mod connectivity;
pub mod error;
mod notifications;
pub mod runtime;

pub use clients::{ClientWindow, Clients};
pub use connectivity::ConnectivityMonitor;
pub use error::{PlatformError, PlatformErrorCode, PlatformResult};
pub use notifications::{
    NotificationAction, NotificationCenter, NotificationOptions, PermissionState, ShownNotification,
};
