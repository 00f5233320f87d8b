use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::error::{KickoffError, Result};

/// Start the API server and run until Ctrl-C
pub async fn start_api_server(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| KickoffError::Validation(format!("Invalid listen address {}:{}: {}", host, port, e)))?;
    let listener = TcpListener::bind(addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
