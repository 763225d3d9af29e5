//! Small helpers shared across the crate.

pub mod subscribe;

pub use subscribe::{ListenerSet, NextFn, Unsubscribe};
