/// Cross-component notifications. The dashboard broadcast these as global
/// DOM events; here they are an explicit enum delivered through the
/// [`EventBus`](crate::domain::ports::event_bus::EventBus) port, and
/// consumers re-fetch whatever the event invalidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    ArticleCreated { article_id: String },
    SaleRecorded { article_id: String },
    MovementRecorded { article_id: String },
    /// The API rejected the bearer token; the session is over.
    Unauthorized,
}
