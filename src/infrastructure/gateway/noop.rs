use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::{ChatGateway, ChatMessage};

/// Offline gateway: no network, fixed reply. Keeps the assistant path
/// usable in tests and in environments without an API key.
pub struct NoopGateway;

#[async_trait::async_trait]
impl ChatGateway for NoopGateway {
    fn name(&self) -> &str {
        "noop"
    }

    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, DomainError> {
        Ok("The AI assistant is not configured. Set MEDSTOCK_AI_API_KEY to enable it.".into())
    }
}
