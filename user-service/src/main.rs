use service_core::observability::init_tracing;
use user_service::{config::UserConfig, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = UserConfig::load()?;

    init_tracing("user-service", &config.common.log_level);

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
