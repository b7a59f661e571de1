use std::sync::Arc;

use anyhow::Context;

use tracker_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    tracker_observability::init(config.log_format);

    let manager = Arc::new(config.seeded_manager().context("failed to seed catalog")?);
    tracing::info!(items = config.seed_items.len(), "catalog initialized");

    let app = tracker_api::app::build_app(manager);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server terminated")?;
    Ok(())
}
