use thiserror::Error;

pub type Result<T> = std::result::Result<T, HelpdeskError>;

#[derive(Debug, Error)]
pub enum HelpdeskError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid ticket ID format: {0}")]
    InvalidTicketId(String),

    #[error("Invalid ticket status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Preference storage error: {0}")]
    PreferenceError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
