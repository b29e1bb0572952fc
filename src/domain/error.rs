use thiserror::Error;

/// Failures reported by an object store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("access denied: s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("transient I/O error on s3://{bucket}/{key}: {message}")]
    Transient {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Failures while turning source bytes into a thumbnail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Transform task aborted: {0}")]
    Aborted(String),
}

/// A failure confined to a single notification record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("failed to fetch {key}: {source}")]
    Fetch { key: String, source: StorageError },

    #[error("failed to transform {key}: {source}")]
    Transform { key: String, source: TransformError },

    #[error("failed to store thumbnail {destination} for {key}: {source}")]
    Store {
        key: String,
        destination: String,
        source: StorageError,
    },
}

/// Errors that fail a whole invocation.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Malformed notification batch: {0}")]
    MalformedBatch(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
