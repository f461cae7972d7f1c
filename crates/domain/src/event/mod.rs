//! Domain event traits and the synchronous event dispatcher.

mod dispatcher;

pub use dispatcher::EventDispatcher;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Serialize + DeserializeOwned + Send + Sync + Clone + 'static {
    /// Returns the event type name.
    ///
    /// The dispatcher routes events to handlers registered under this name.
    fn event_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// A side effect triggered by a domain event.
///
/// Handlers are shared with the dispatcher through `Arc`, so they take
/// `&self`; handlers that accumulate state need interior mutability.
pub trait EventHandler<E: DomainEvent>: Send + Sync {
    /// Handles a single event.
    fn handle(&self, event: &E);
}
