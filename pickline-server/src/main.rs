use clap::Parser;
use tracing::info;

use pickline_server::{
    config::Config,
    gateway::Gateway,
    routes::{AppState, build_router},
    telemetry::{DEFAULT_FILTER, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = Config::parse();
    init_tracing(DEFAULT_FILTER, config.log_json);

    info!(addr = %config.addr, store = ?config.store, "starting pickline-server");

    let gateway = Gateway::connect(&config).await;
    let app = build_router(AppState {
        gateway: gateway.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    gateway.shutdown().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
