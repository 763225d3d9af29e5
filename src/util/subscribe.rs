use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub type NextFn<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

pub type Unsubscribe = Box<dyn FnOnce() + Send + 'static>;

/// Registry of change listeners with handle-based removal.
///
/// Callbacks are invoked synchronously, outside the internal lock, in
/// subscription order.
pub struct ListenerSet<T> {
    listeners: Arc<Mutex<BTreeMap<u64, NextFn<T>>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> ListenerSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F) -> Unsubscribe
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .lock()
            .unwrap()
            .insert(id, Arc::new(callback));
        let listeners = Arc::clone(&self.listeners);
        Box::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }

    pub fn notify(&self, value: &T) {
        let callbacks: Vec<NextFn<T>> = self.listeners.lock().unwrap().values().cloned().collect();
        for callback in callbacks {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ListenerSet<T> {
    fn default() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl<T> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Arc::clone(&self.listeners),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
