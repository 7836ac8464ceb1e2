use checkout_service::{config::Config, Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    init_tracing(&config.service_name, &config.telemetry)?;

    tracing::info!(service = %config.service_name, "Starting");

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
