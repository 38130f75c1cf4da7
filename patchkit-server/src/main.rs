use anyhow::{Context, Result};
use patchkit_server::telemetry::{self, TracingConfig};
use patchkit_server::{db, run_server, Config, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing(&TracingConfig::default())?;

    let config = Config::load().context("failed to load configuration")?;
    tracing::info!(?config, "Configuration loaded");

    let pool = db::connect(&config.driver_name, &config.db_url)
        .await
        .context("failed to connect to database")?;
    db::schema::run(&pool).await.context("failed to prepare schema")?;

    run_server(pool, ServerConfig::from(&config)).await?;
    Ok(())
}
