use async_trait::async_trait;
use crate::domain::error::{StorageError, TransformError};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError>;
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
}

/// Turns source image bytes into thumbnail bytes. CPU-bound; callers run it off the async executor.
pub trait ImageTransformer: Send + Sync {
    fn transform(&self, source: &[u8]) -> Result<Vec<u8>, TransformError>;
    fn content_type(&self) -> &'static str;
}
