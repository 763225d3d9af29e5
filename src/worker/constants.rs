/// Cache version tag. Bumping it is the only supported way to force a full
/// cache invalidation on the next activation.
pub const DEFAULT_CACHE_NAME: &str = "npo-event-manager-v1";

/// Scope origin relative paths in the asset manifest are resolved against.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Document served whenever both cache and network fail for a GET request.
pub const OFFLINE_PAGE: &str = "/offline.html";

/// Requests under this prefix use the network-first policy and are never
/// cached.
pub const API_PREFIX: &str = "/api/";

pub const API_TIMEOUT_MS: u64 = 3_000;

/// App shell: everything needed to render the application offline.
pub const STATIC_ASSETS: [&str; 7] = [
    "/",
    "/index.html",
    "/offline.html",
    "/manifest.json",
    "/icons/icon.svg",
    "/icons/shortcut-events.svg",
    "/icons/shortcut-registrations.svg",
];

pub const NOTIFICATION_ICON: &str = "/icons/icon.svg";

/// Title used when the push payload carries no title of its own.
pub const DEFAULT_NOTIFICATION_TITLE: &str = "NPO Event Manager";

/// Title used when the push payload cannot be parsed at all.
pub const PUSH_FALLBACK_TITLE: &str = "New Notification";

/// Body used when the push payload carries no body.
pub const PUSH_FALLBACK_BODY: &str = "Something important happened!";

pub const DEFAULT_NOTIFICATION_TAG: &str = "default";
