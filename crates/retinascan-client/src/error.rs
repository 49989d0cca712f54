use retinascan_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("image file is empty")]
    EmptyImage,

    #[error("image is {size} bytes, upload limit is {limit}")]
    ImageTooLarge { size: u64, limit: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
