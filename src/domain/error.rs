use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Non-2xx API response. Carries the server-supplied message verbatim.
    #[error("API error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Assistant gateway error: {0}")]
    Gateway(String),

    /// A fetch-all pagination loop hit its caller-supplied page cap
    /// before the backend reported the last page.
    #[error("Page cap exceeded: fetched {fetched} pages of {total_pages}, cap was {cap}")]
    PageCapExceeded {
        fetched: u32,
        total_pages: u32,
        cap: u32,
    },
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Validation(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::Validation(s.to_string())
    }
}
