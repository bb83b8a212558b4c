use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpevoError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bucket index {bucket} out of range ({count} buckets)")]
    BucketOutOfRange { bucket: usize, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, OpevoError>;
