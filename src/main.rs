use anyhow::Context;
use tracing_subscriber::EnvFilter;

use stackweb_api::{config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL, ADMIN_CODE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stackweb_api=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    tracing::info!("Starting StackWeb API in {:?} mode", config.environment);
    if !config.admin.code_configured {
        tracing::warn!("ADMIN_CODE not set; falling back to the built-in admin code");
    }

    let port = config.server.port;
    let state = AppState::from_config(config).context("failed to initialise storage")?;
    tracing::info!(storage = state.store.backend_name(), "storage ready");

    let app = stackweb_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("StackWeb API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
