use image_resize::{config::AppConfig, ecs_service::EcsService, logging};
use tracing::{info, debug, error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    logging::init();

    info!("Starting image resize worker");
    let config = AppConfig::from_env()
        .map_err(|e| {
            error!("Invalid configuration: {}", e);
            e
        })?;
    debug!("Configuration: {:?}", config);

    let service = EcsService::new(config).await?;
    info!("ECS service initialized successfully");

    service.run().await
}
