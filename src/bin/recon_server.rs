use anyhow::Context;
use log_recon::adapters::http::{router, AppState};
use log_recon::utils::{logger, validation::Validate};
use log_recon::{LocalStorage, TomlConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_server_logger();

    let config_path =
        std::env::var("LOG_RECON_CONFIG").unwrap_or_else(|_| "log-recon.toml".to_string());
    tracing::info!("📁 Loading configuration from: {}", config_path);

    let config = TomlConfig::from_file(&config_path)
        .with_context(|| format!("failed to load config file '{}'", config_path))?;
    config.validate().context("invalid configuration")?;

    let bind_address = config.bind_address().to_string();
    let app = router(AppState::new(config, LocalStorage::default()));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    tracing::info!("🚀 log-recon listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
