use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
