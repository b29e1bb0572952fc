use std::sync::Arc;
use aws_sdk_sqs::Client as SqsClient;
use tracing::{info, error, debug, warn, info_span, Instrument};
use crate::{
    application::thumbnail_service::ThumbnailService,
    config::AppConfig,
    domain::{error::BatchError, models::BatchSummary},
    infrastructure::{
        image_adapter::GrayscaleThumbnailer,
        s3_adapter::S3Adapter,
        s3_event::parse_notification_batch,
    },
};

pub struct EcsService {
    service: ThumbnailService,
    sqs_client: SqsClient,
    config: AppConfig,
}

impl EcsService {
    pub async fn new(config: AppConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        debug!("Initializing ECS service");

        debug!("Loading AWS configuration");
        let mut aws_config_builder = aws_config::defaults(aws_config::BehaviorVersion::latest());

        // Configure endpoint for LocalStack if AWS_ENDPOINT_URL is set
        if let Some(endpoint_url) = &config.endpoint_url {
            info!("Using custom AWS endpoint: {}", endpoint_url);
            aws_config_builder = aws_config_builder.endpoint_url(endpoint_url);
        }

        let aws_config = aws_config_builder.load().await;
        debug!("AWS region: {:?}", aws_config.region());

        let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);

        // Enable path-style addressing for LocalStack
        if config.endpoint_url.is_some() {
            s3_config = s3_config.force_path_style(true);
        }

        let s3_client = aws_sdk_s3::Client::from_conf(s3_config.build());
        let sqs_client = SqsClient::new(&aws_config);
        debug!("AWS clients initialized");

        info!("Using SQS queue: {}", config.queue_url);

        let object_store = Arc::new(S3Adapter::new(s3_client));
        let transformer = Arc::new(GrayscaleThumbnailer::new());
        let service = ThumbnailService::new(object_store, transformer)
            .with_max_concurrency(config.max_concurrency);
        info!("Processing up to {} records concurrently", config.max_concurrency);

        debug!("ECS service initialization complete");
        Ok(Self { service, sqs_client, config })
    }

    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Starting ECS service, polling SQS queue: {}", self.config.queue_url);

        let mut poll_count: u64 = 0;
        loop {
            poll_count += 1;
            debug!("Polling SQS queue (attempt {})", poll_count);

            let response = self.sqs_client
                .receive_message()
                .queue_url(&self.config.queue_url)
                .max_number_of_messages(self.config.sqs_max_messages)
                .wait_time_seconds(self.config.sqs_wait_time_seconds)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to receive messages from SQS: {}", e);
                    e
                })?;

            let Some(messages) = response.messages else {
                debug!("No messages received from SQS");
                continue;
            };
            info!("Received {} messages from SQS", messages.len());

            for message in &messages {
                let message_id = message.message_id().unwrap_or("<unknown>");
                let span = info_span!("message", id = %message_id);

                match message.body() {
                    Some(body) => {
                        match process_message(&self.service, body).instrument(span.clone()).await {
                            Ok(summary) => {
                                info!(parent: &span, "Processed message: {} succeeded, {} failed, {} skipped",
                                    summary.succeeded, summary.failed, summary.skipped);
                            },
                            Err(e) => {
                                // Malformed payloads are deleted, not retried.
                                error!(parent: &span, "Dropping message: {}", e);
                                debug!(parent: &span, "Failed message body: {}", body);
                            }
                        }
                    },
                    None => warn!(parent: &span, "Received message without body"),
                }

                if let Some(receipt_handle) = message.receipt_handle() {
                    debug!(parent: &span, "Deleting processed message from queue");
                    self.sqs_client
                        .delete_message()
                        .queue_url(&self.config.queue_url)
                        .receipt_handle(receipt_handle)
                        .send()
                        .await
                        .map_err(|e| {
                            error!("Failed to delete message from SQS: {}", e);
                            e
                        })?;
                }
            }
        }
    }
}

/// Handles one notification payload: parse, then thumbnail every record.
///
/// Only an unreadable payload is an error; record failures are part of the summary.
pub async fn process_message(service: &ThumbnailService, body: &str) -> Result<BatchSummary, BatchError> {
    debug!("Parsing S3 event message");
    let batch = parse_notification_batch(body)?;
    Ok(service.process_batch(batch).await)
}
