use crate::domain::entities::user::User;
use crate::domain::error::DomainError;
use crate::domain::ports::local_store::{Session, SessionStore};
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Single-row session storage: the CLI's stand-in for the browser's
/// localStorage token slot.
pub struct SqliteSessionStore {
    conn: Mutex<Connection>,
}

impl SqliteSessionStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl SessionStore for SqliteSessionStore {
    fn save(&self, session: &Session) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let user_json = session
            .user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DomainError::Storage(format!("Failed to encode user: {e}")))?;
        conn.execute(
            "INSERT INTO session (id, token, user_json, saved_at) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET token = ?1, user_json = ?2, saved_at = ?3",
            params![session.token, user_json, session.saved_at.to_rfc3339()],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to save session: {e}")))?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let row = conn
            .query_row(
                "SELECT token, user_json, saved_at FROM session WHERE id = 1",
                [],
                |row| {
                    let token: String = row.get(0)?;
                    let user_json: Option<String> = row.get(1)?;
                    let saved_at: String = row.get(2)?;
                    Ok((token, user_json, saved_at))
                },
            )
            .optional()
            .map_err(|e| DomainError::Storage(format!("Failed to load session: {e}")))?;

        match row {
            None => Ok(None),
            Some((token, user_json, saved_at)) => {
                let user: Option<User> = user_json
                    .as_deref()
                    .map(serde_json::from_str)
                    .transpose()
                    .map_err(|e| DomainError::Storage(format!("Corrupt stored user: {e}")))?;
                let saved_at = DateTime::parse_from_rfc3339(&saved_at)
                    .map_err(|e| DomainError::Storage(format!("Corrupt session timestamp: {e}")))?
                    .with_timezone(&chrono::Utc);
                Ok(Some(Session {
                    token,
                    user,
                    saved_at,
                }))
            }
        }
    }

    fn clear(&self) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        conn.execute("DELETE FROM session WHERE id = 1", [])
            .map_err(|e| DomainError::Storage(format!("Failed to clear session: {e}")))?;
        Ok(())
    }
}
