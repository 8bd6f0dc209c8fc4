use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cloud error: {0}")]
    Cloud(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Missing credentials: {0}")]
    Credentials(String),

    #[error("Unknown puzzle type: {0}")]
    UnknownKind(String),

    #[error("Invalid date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
