use std::future::Future;

use bytes::Bytes;
use futures::future::{join_all, BoxFuture};

use crate::net::{FetchRequest, FetchResponse};
use crate::platform::ShownNotification;

/// Work registered against an event that must finish before the event is
/// considered handled, i.e. the `event.waitUntil` contract. Dropping an event
/// without settling it drops that work, which is a correctness bug for
/// handlers that rely on it (background cache writes).
pub struct ExtendableEvent {
    extensions: Vec<BoxFuture<'static, ()>>,
}

impl ExtendableEvent {
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Registers `work` to be driven when the event is settled.
    pub fn wait_until<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.extensions.push(Box::pin(work));
    }

    pub fn is_extended(&self) -> bool {
        !self.extensions.is_empty()
    }

    /// Drives every registered extension to completion.
    pub async fn settle(self) {
        join_all(self.extensions).await;
    }
}

impl Default for ExtendableEvent {
    fn default() -> Self {
        Self::new()
    }
}

/// A fetch interception opportunity for one outgoing request.
pub struct FetchEvent {
    pub request: FetchRequest,
    ext: ExtendableEvent,
}

impl FetchEvent {
    pub fn new(request: FetchRequest) -> Self {
        Self {
            request,
            ext: ExtendableEvent::new(),
        }
    }

    pub fn wait_until<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.ext.wait_until(work);
    }

    pub fn is_extended(&self) -> bool {
        self.ext.is_extended()
    }

    /// Drives background work registered by the handler. Call after the
    /// response has been delivered to the page.
    pub async fn settle(self) {
        self.ext.settle().await;
    }
}

/// The handler's verdict on a fetch event.
#[derive(Debug, PartialEq)]
pub enum FetchDecision {
    /// The worker stays out of the way; the host performs its default
    /// network handling.
    Passthrough,
    /// The worker answers the request itself.
    Respond(FetchResponse),
}

impl FetchDecision {
    pub fn response(&self) -> Option<&FetchResponse> {
        match self {
            FetchDecision::Respond(response) => Some(response),
            FetchDecision::Passthrough => None,
        }
    }

    pub fn is_passthrough(&self) -> bool {
        matches!(self, FetchDecision::Passthrough)
    }
}

/// An out-of-band push message, possibly carrying a payload.
#[derive(Clone, Debug, Default)]
pub struct PushEvent {
    data: Option<Bytes>,
}

impl PushEvent {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }
}

/// The user clicked a displayed notification.
#[derive(Clone, Debug)]
pub struct NotificationClickEvent {
    pub notification: ShownNotification,
}

impl NotificationClickEvent {
    pub fn new(notification: ShownNotification) -> Self {
        Self { notification }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use super::{ExtendableEvent, FetchDecision};
    use crate::net::FetchResponse;

    #[tokio::test(flavor = "current_thread")]
    async fn settle_drives_registered_work() {
        let mut event = ExtendableEvent::new();
        assert!(!event.is_extended());

        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        event.wait_until(async move {
            flag.store(true, Ordering::SeqCst);
        });
        assert!(event.is_extended());
        assert!(!done.load(Ordering::SeqCst));

        event.settle().await;
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn decision_accessors() {
        let decision = FetchDecision::Respond(FetchResponse::ok("body"));
        assert!(!decision.is_passthrough());
        assert_eq!(decision.response().unwrap().status, 200);
        assert!(FetchDecision::Passthrough.is_passthrough());
    }
}
