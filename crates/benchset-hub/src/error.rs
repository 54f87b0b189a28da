use thiserror::Error;

/// Errors raised while fetching raw data from the hub, remote tables or assets.
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Requested {requested} rows but only {available} are available")]
    NotEnoughRows { requested: usize, available: usize },

    #[error("Unsupported URI: {0}")]
    UnsupportedUri(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HubError {
    /// Rate limiting and server-side failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::Request(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, HubError>;
