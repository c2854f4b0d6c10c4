use crate::domain::error::DomainError;
use crate::domain::ports::chat_gateway::ChatRole;
use crate::domain::ports::local_store::{ChatLogStore, StoredChatMessage};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::sync::Mutex;

pub struct SqliteChatLog {
    conn: Mutex<Connection>,
}

impl SqliteChatLog {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

fn role_to_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

fn role_from_str(s: &str) -> Result<ChatRole, DomainError> {
    match s {
        "system" => Ok(ChatRole::System),
        "user" => Ok(ChatRole::User),
        "assistant" => Ok(ChatRole::Assistant),
        other => Err(DomainError::Storage(format!("Corrupt chat role: {other}"))),
    }
}

impl ChatLogStore for SqliteChatLog {
    fn append(&self, role: ChatRole, content: &str) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        conn.execute(
            "INSERT INTO chat_log (id, role, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                uuid::Uuid::new_v4().to_string(),
                role_to_str(role),
                content,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to append chat message: {e}")))?;
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<StoredChatMessage>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, role, content, created_at FROM chat_log
                 ORDER BY created_at DESC, id LIMIT ?1",
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let rows = stmt
            .query_map(params![limit as i64], |row| {
                let id: String = row.get(0)?;
                let role: String = row.get(1)?;
                let content: String = row.get(2)?;
                let created_at: String = row.get(3)?;
                Ok((id, role, content, created_at))
            })
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut messages = Vec::new();
        for row in rows {
            let (id, role, content, created_at) =
                row.map_err(|e| DomainError::Storage(e.to_string()))?;
            messages.push(StoredChatMessage {
                id,
                role: role_from_str(&role)?,
                content,
                created_at: DateTime::parse_from_rfc3339(&created_at)
                    .map_err(|e| DomainError::Storage(format!("Corrupt chat timestamp: {e}")))?
                    .with_timezone(&Utc),
            });
        }

        // Query returns newest-first; callers want chronological order.
        messages.reverse();
        Ok(messages)
    }

    fn clear(&self) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        conn.execute("DELETE FROM chat_log", [])
            .map_err(|e| DomainError::Storage(format!("Failed to clear chat log: {e}")))?;
        Ok(())
    }
}
