//! Publish/subscribe registry for outward notifications.
//!
//! Replaces cross-instance static events with an explicit hub owned by the
//! engine: publishers pass the hub by reference, consumers subscribe and
//! receive a typed id for unsubscription. Delivery order is subscription
//! order, so dispatch is deterministic.

use snowbrawl_core::events::GameEvent;

/// A registered listener.
pub type EventListener = Box<dyn FnMut(&GameEvent) + Send + 'static>;

/// Typed handle returned by `subscribe`, required by `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u32);

/// The event registry. The core never depends on subscriber presence;
/// publishing to an empty hub is a no-op.
#[derive(Default)]
pub struct EventHub {
    next_id: u32,
    subscribers: Vec<(SubscriberId, EventListener)>,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every published event.
    pub fn subscribe(&mut self, listener: EventListener) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.subscribers.push((id, listener));
        id
    }

    /// Remove a listener. Returns false if the id is unknown (already
    /// removed or never issued).
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.subscribers {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
