use std::sync::Arc;
use futures_util::{stream, StreamExt};
use tracing::{info, debug, error, warn, info_span, Instrument};
use crate::domain::{
    error::{RecordError, TransformError},
    models::{BatchSummary, NotificationBatch, NotificationRecord, ProcessingOutcome, SkipReason},
    object_key::{is_accepted, thumbnail_key},
    ports::{ImageTransformer, ObjectStore},
};

pub struct ThumbnailService {
    object_store: Arc<dyn ObjectStore>,
    transformer: Arc<dyn ImageTransformer>,
    max_concurrency: usize,
}

impl ThumbnailService {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        transformer: Arc<dyn ImageTransformer>,
    ) -> Self {
        Self {
            object_store,
            transformer,
            max_concurrency: 1,
        }
    }

    /// Process up to `max_concurrency` records at once. Values below 1 are clamped to 1.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Runs every record of the batch to completion and reports the tally.
    ///
    /// Per-record failures are logged and counted; they never abort the batch.
    pub async fn process_batch(&self, batch: NotificationBatch) -> BatchSummary {
        let outcomes = self.process_records(batch).await;

        let summary = BatchSummary::from_outcomes(&outcomes);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Total: {} | Processed: {} | Fails: {}",
            summary.total, summary.total - summary.failed, summary.failed
        );
        summary
    }

    /// Outcomes come back in delivery order, whatever the concurrency.
    pub async fn process_records(&self, batch: NotificationBatch) -> Vec<ProcessingOutcome> {
        info!("Processing batch of {} records", batch.len());

        stream::iter(batch.records.into_iter().enumerate())
            .map(|(index, record)| {
                let span = match &record {
                    Some(r) => info_span!("record", index, bucket = %r.bucket, key = %r.key),
                    None => info_span!("record", index),
                };
                self.process_record(record).instrument(span)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    pub async fn process_record(&self, record: Option<NotificationRecord>) -> ProcessingOutcome {
        let Some(record) = record else {
            warn!("Skipping record: {}", SkipReason::MissingRecord);
            return ProcessingOutcome::Skipped(SkipReason::MissingRecord);
        };

        if let Some(reason) = skip_reason(&record) {
            info!("Skipping {}: {}", record.key, reason);
            return ProcessingOutcome::Skipped(reason);
        }

        match self.create_thumbnail(&record).await {
            Ok(destination_key) => {
                info!("✅ Stored thumbnail s3://{}/{}", record.bucket, destination_key);
                ProcessingOutcome::Succeeded { destination_key }
            },
            Err(e) => {
                error!("Error processing object {} from bucket {}: {}", record.key, record.bucket, e);
                ProcessingOutcome::Failed(e)
            }
        }
    }

    async fn create_thumbnail(&self, record: &NotificationRecord) -> Result<String, RecordError> {
        let key = record.key.as_str();

        // Step 1: Fetch source object
        debug!("Step 1: Fetching s3://{}/{}", record.bucket, key);
        let source = self.object_store.get_object(&record.bucket, key).await
            .map_err(|e| RecordError::Fetch { key: key.to_string(), source: e })?;
        debug!("Fetched {} bytes", source.len());

        // Step 2: Grayscale + resize
        debug!("Step 2: Generating thumbnail");
        let transformer = Arc::clone(&self.transformer);
        let thumbnail = tokio::task::spawn_blocking(move || transformer.transform(&source))
            .await
            .map_err(|e| TransformError::Aborted(e.to_string()))
            .and_then(|result| result)
            .map_err(|e| RecordError::Transform { key: key.to_string(), source: e })?;
        debug!("Generated thumbnail of {} bytes", thumbnail.len());

        // Step 3: Store next to the source
        let destination_key = thumbnail_key(key);
        debug!("Step 3: Generated thumbnail key: {}", destination_key);
        self.object_store
            .put_object(&record.bucket, &destination_key, thumbnail, self.transformer.content_type())
            .await
            .map_err(|e| RecordError::Store {
                key: key.to_string(),
                destination: destination_key.clone(),
                source: e,
            })?;

        Ok(destination_key)
    }
}

/// Why a record should not be processed, if it shouldn't.
fn skip_reason(record: &NotificationRecord) -> Option<SkipReason> {
    let key = record.key.as_str();
    if key.is_empty() || key.chars().all(|c| c == '/') {
        Some(SkipReason::EmptyKey)
    } else if !is_accepted(key) {
        Some(SkipReason::UnsupportedExtension)
    } else {
        None
    }
}
