//! In-memory registry routing events to handlers by event type.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{DomainEvent, EventHandler};

type Handlers<E> = Vec<Arc<dyn EventHandler<E>>>;

/// Routes domain events to the handlers registered for their event type.
///
/// Handlers for one event type are invoked synchronously, in registration
/// order. Registering the same handler twice makes it run twice. Notifying
/// an event type with no handlers is a no-op.
///
/// The dispatcher keeps `Arc` handles only; callers own the handlers and
/// `unregister` them to release the dispatcher's handle. The registry sits
/// behind a read/write lock so one dispatcher can be shared via `Arc`.
pub struct EventDispatcher<E: DomainEvent> {
    handlers: RwLock<HashMap<String, Handlers<E>>>,
}

impl<E: DomainEvent> EventDispatcher<E> {
    /// Creates a dispatcher with no registered handlers.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a handler to the list for `event_type`.
    pub fn register(&self, event_type: impl Into<String>, handler: Arc<dyn EventHandler<E>>) {
        let event_type = event_type.into();
        tracing::debug!(%event_type, "registering event handler");
        self.handlers
            .write()
            .entry(event_type)
            .or_default()
            .push(handler);
    }

    /// Removes the first registration of `handler` for `event_type`.
    ///
    /// Handlers are matched by identity (the same allocation), not by value.
    /// Unknown event types and unregistered handlers are ignored.
    pub fn unregister<H>(&self, event_type: &str, handler: &Arc<H>)
    where
        H: EventHandler<E> + ?Sized,
    {
        let mut handlers = self.handlers.write();
        let Some(list) = handlers.get_mut(event_type) else {
            return;
        };

        if let Some(index) = list
            .iter()
            .position(|h| std::ptr::addr_eq(Arc::as_ptr(h), Arc::as_ptr(handler)))
        {
            list.remove(index);
        }
    }

    /// Removes every handler for every event type.
    pub fn unregister_all(&self) {
        self.handlers.write().clear();
    }

    /// Returns the handlers registered for `event_type`, in invocation order.
    pub fn handlers(&self, event_type: &str) -> Vec<Arc<dyn EventHandler<E>>> {
        self.handlers
            .read()
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of handlers registered for `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.read().get(event_type).map_or(0, Vec::len)
    }

    /// Delivers `event` to every handler registered for its type.
    ///
    /// The handler list is copied before invocation, so handlers may
    /// register or unregister on this dispatcher without deadlocking.
    /// Such changes take effect from the next notification.
    pub fn notify(&self, event: &E) {
        let event_type = event.event_type();
        let handlers = self.handlers(event_type);

        tracing::debug!(event_type, handlers = handlers.len(), "dispatching event");
        metrics::counter!("domain_events_dispatched", "event_type" => event_type).increment(1);

        for handler in handlers {
            handler.handle(event);
        }
    }
}

impl<E: DomainEvent> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: DomainEvent> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.read();
        let mut counts: Vec<_> = handlers.iter().map(|(k, v)| (k.clone(), v.len())).collect();
        counts.sort();
        f.debug_struct("EventDispatcher")
            .field("handlers", &counts)
            .finish()
    }
}
