use service_core::error::AppError;
use service_core::observability::init_tracing;
use todo_service::{config::TodoConfig, Application};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = TodoConfig::load()?;

    init_tracing(&config.common.service_name, &config.common.log_level);

    tracing::info!(
        service = %config.common.service_name,
        version = env!("CARGO_PKG_VERSION"),
        store = ?config.store,
        port = config.common.port,
        "Starting todo service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Todo service stopped");
    Ok(())
}
