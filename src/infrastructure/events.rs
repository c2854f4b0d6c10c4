use crate::domain::events::DataEvent;
use crate::domain::ports::event_bus::{EventBus, EventHandler, Subscription};
use std::sync::Mutex;
use uuid::Uuid;

/// Synchronous in-process event bus. Handlers run on the publisher's
/// thread, in subscription order; a poisoned registry drops the dispatch
/// rather than panicking the publisher.
#[derive(Default)]
pub struct InProcessEventBus {
    handlers: Mutex<Vec<(Subscription, EventHandler)>>,
}

impl InProcessEventBus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventBus for InProcessEventBus {
    fn publish(&self, event: &DataEvent) {
        if let Ok(handlers) = self.handlers.lock() {
            for (_, handler) in handlers.iter() {
                handler(event);
            }
        }
    }

    fn subscribe(&self, handler: EventHandler) -> Subscription {
        let id = Uuid::new_v4();
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.push((id, handler));
        }
        id
    }

    fn unsubscribe(&self, id: Subscription) {
        if let Ok(mut handlers) = self.handlers.lock() {
            handlers.retain(|(sub, _)| *sub != id);
        }
    }
}
