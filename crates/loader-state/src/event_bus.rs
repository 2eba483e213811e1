use parking_lot::RwLock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Name of the only event the bus carries.
pub const STATE_UPDATE: &str = "stateUpdate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Receives `stateUpdate` notifications. The event has no payload; listeners
/// re-read the container.
pub trait StateListener: Send + Sync {
    fn on_state_update(&self);
}

impl<F> StateListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_state_update(&self) {
        self();
    }
}

pub struct EventBus {
    listeners: RwLock<Vec<(ListenerId, Arc<dyn StateListener>)>>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Registers `listener`. Registering the same listener object again
    /// returns its existing id.
    pub fn subscribe(&self, listener: Arc<dyn StateListener>) -> ListenerId {
        let mut listeners = self.listeners.write();
        if let Some((id, _)) = listeners
            .iter()
            .find(|(_, existing)| same_listener(existing, &listener))
        {
            return *id;
        }

        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        listeners.push((id, listener));
        debug!(listener_id = id.0, event = STATE_UPDATE, "listener subscribed");
        id
    }

    /// Removes a listener. Unknown ids are ignored; returns whether anything was removed.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        let removed = listeners.len() != before;
        if removed {
            debug!(listener_id = id.0, event = STATE_UPDATE, "listener unsubscribed");
        }
        removed
    }

    /// Notifies every current listener in subscription order and returns the
    /// number of deliveries. A listener unsubscribed by an earlier listener in
    /// the same dispatch is skipped.
    pub fn emit(&self) -> usize {
        // Snapshot so listeners can subscribe, unsubscribe or mutate state re-entrantly.
        let listeners: Vec<(ListenerId, Arc<dyn StateListener>)> = self
            .listeners
            .read()
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        let mut delivered = 0;
        for (id, listener) in listeners {
            if !self.is_subscribed(id) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| listener.on_state_update())) {
                Ok(()) => delivered += 1,
                Err(_) => warn!(listener_id = id.0, event = STATE_UPDATE, "listener panicked"),
            }
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.read().iter().any(|(existing, _)| *existing == id)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn same_listener(a: &Arc<dyn StateListener>, b: &Arc<dyn StateListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}
