//! Wire format of S3 event notifications.

use serde::Deserialize;
use tracing::{debug, error, warn};
use crate::domain::{
    error::BatchError,
    models::{NotificationBatch, NotificationRecord},
};

#[derive(Debug, Deserialize)]
struct S3Event {
    #[serde(rename = "Records")]
    records: Option<Vec<S3EventRecord>>,
}

#[derive(Debug, Deserialize)]
struct S3EventRecord {
    s3: Option<S3Entity>,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: Option<S3Bucket>,
    object: Option<S3Object>,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: Option<String>,
}

impl S3EventRecord {
    fn into_notification(self) -> Option<NotificationRecord> {
        let s3 = self.s3?;
        let bucket = s3.bucket.and_then(|b| b.name).filter(|name| !name.is_empty())?;
        let key = s3.object.and_then(|o| o.key).unwrap_or_default();
        Some(NotificationRecord { bucket, key })
    }
}

/// Parses an S3 event notification payload.
///
/// A payload without `Records` (such as `s3:TestEvent`) is an empty batch. Records
/// lacking a bucket are kept as absent entries so they still count towards the total.
pub fn parse_notification_batch(payload: &str) -> Result<NotificationBatch, BatchError> {
    let event: S3Event = serde_json::from_str(payload)
        .map_err(|e| {
            error!("Failed to parse S3 event JSON: {}", e);
            BatchError::MalformedBatch(e.to_string())
        })?;

    let Some(records) = event.records else {
        warn!("S3 event contains no Records array");
        return Ok(NotificationBatch::default());
    };

    debug!("S3 event parsed successfully with {} records", records.len());
    Ok(NotificationBatch {
        records: records.into_iter().map(S3EventRecord::into_notification).collect(),
    })
}
