use thiserror::Error;

/// Errors raised by dataset store clients.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A dataset with this name already exists (HTTP 409).
    #[error("Dataset already exists: {0}")]
    Conflict(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request error: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_display() {
        let err = StoreError::Conflict("gsm8k".into());
        assert_eq!(err.to_string(), "Dataset already exists: gsm8k");
        assert!(err.is_conflict());
    }

    #[test]
    fn http_display() {
        let err = StoreError::Http {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert!(!err.is_conflict());
    }

    #[test]
    fn serialization_error_display() {
        let err: StoreError = serde_json::from_str::<serde_json::Value>("invalid")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("Serialization error"));
    }
}
