use thiserror::Error;

#[derive(Debug, Error)]
pub enum OkrError {
    #[error("Invalid period: {reason}")]
    InvalidPeriod { reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for OkrError {
    fn from(e: serde_json::Error) -> Self {
        OkrError::SerializationError(e.to_string())
    }
}
