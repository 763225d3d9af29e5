//! Offline cache and service-worker lifecycle core for progressive web apps.
//!
//! The crate models the background worker that sits between an application's
//! pages and the network: a versioned [`cache`] store, a fetch interceptor
//! with network-first and stale-while-revalidate policies, a push-notification
//! router, and the update/connectivity signals consumed by host UI.
//!
//! Host facilities (network access, open windows, system notifications) are
//! trait seams under [`net`] and [`platform`]; the [`worker`] module wires
//! them together behind [`worker::OfflineWorker`] and
//! [`worker::Registration`].

pub mod cache;
pub mod net;
pub mod platform;
pub mod util;
pub mod worker;

#[cfg(test)]
pub mod test_support;
