use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use clearance_hub::api::server::start_server;
use clearance_hub::api::types::ApiContext;
use clearance_hub::config;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create data directory {}: {e}", parent.display()))?;
    }
    let ctx = ApiContext::open(&db_path)
        .map_err(|e| format!("Cannot open database {}: {e}", db_path.display()))?;
    tracing::info!(path = %db_path.display(), "Database ready");

    let addr: SocketAddr = std::env::var("CLEARANCE_HUB_ADDR")
        .unwrap_or_else(|_| config::DEFAULT_BIND_ADDR.to_string())
        .parse()
        .map_err(|e| format!("Invalid CLEARANCE_HUB_ADDR: {e}"))?;

    let mut server = start_server(ctx, addr).await?;
    tracing::info!(addr = %server.addr, "Listening");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for ctrl-c: {e}"))?;
    tracing::info!("Shutting down");
    server.shutdown();

    Ok(())
}
