use crate::domain::events::DataEvent;
use uuid::Uuid;

pub type Subscription = Uuid;
pub type EventHandler = Box<dyn Fn(&DataEvent) + Send + Sync>;

/// In-process publish/subscribe seam between the data layer and whatever
/// is displaying it. Dispatch is synchronous; handlers must be cheap.
pub trait EventBus: Send + Sync {
    fn publish(&self, event: &DataEvent);
    fn subscribe(&self, handler: EventHandler) -> Subscription;
    fn unsubscribe(&self, id: Subscription);
}
