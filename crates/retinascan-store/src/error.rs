use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("result not found: {0}")]
    NotFound(String),

    #[error("invalid result id: {0:?}")]
    InvalidId(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed result document: {0}")]
    Json(#[from] serde_json::Error),
}
