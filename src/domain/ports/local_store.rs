use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::ChatRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The only state this client persists itself: the bearer token (plus
/// the user it belongs to). Everything else lives behind the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: Option<User>,
    pub saved_at: DateTime<Utc>,
}

pub trait SessionStore: Send + Sync {
    fn save(&self, session: &Session) -> Result<(), DomainError>;
    fn load(&self) -> Result<Option<Session>, DomainError>;
    fn clear(&self) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Conversation log for the assistant, so history survives between CLI
/// invocations.
pub trait ChatLogStore: Send + Sync {
    fn append(&self, role: ChatRole, content: &str) -> Result<(), DomainError>;
    /// Most recent `limit` messages, oldest first.
    fn recent(&self, limit: usize) -> Result<Vec<StoredChatMessage>, DomainError>;
    fn clear(&self) -> Result<(), DomainError>;
}
