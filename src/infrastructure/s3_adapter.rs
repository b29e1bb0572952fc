use async_trait::async_trait;
use aws_sdk_s3::{
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    primitives::ByteStream,
    Client,
};
use tracing::{debug, error};
use crate::domain::{error::StorageError, ports::ObjectStore};

pub struct S3Adapter {
    client: Client,
}

impl S3Adapter {
    pub fn new(client: Client) -> Self {
        debug!("Initializing S3 adapter");
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Adapter {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        debug!("Getting object s3://{}/{}", bucket, key);

        let response = self.client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!("GetObject failed for s3://{}/{}: {}", bucket, key, DisplayErrorContext(&e));
                classify(e, bucket, key)
            })?;

        let body = response.body
            .collect()
            .await
            .map_err(|e| {
                error!("Failed to read body of s3://{}/{}: {}", bucket, key, e);
                StorageError::Transient {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;

        Ok(body.into_bytes().to_vec())
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        debug!("Putting {} bytes to s3://{}/{}", body.len(), bucket, key);

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                error!("PutObject failed for s3://{}/{}: {}", bucket, key, DisplayErrorContext(&e));
                classify(e, bucket, key)
            })?;

        Ok(())
    }
}

fn classify<E, R>(err: SdkError<E, R>, bucket: &str, key: &str) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let bucket = bucket.to_string();
    let key = key.to_string();
    match err.code() {
        Some("NoSuchKey") | Some("NoSuchBucket") | Some("NotFound") => StorageError::NotFound { bucket, key },
        Some("AccessDenied") | Some("Forbidden") => StorageError::AccessDenied { bucket, key },
        _ => StorageError::Transient {
            bucket,
            key,
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}
