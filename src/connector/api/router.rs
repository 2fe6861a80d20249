use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use super::container::Container;
use super::controller::{history_controller, send_controller, session_controller};

/// Routes of the relay's HTTP surface.
pub fn router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/send", post(send_controller::send))
        .route(
            "/history",
            get(history_controller::history).delete(history_controller::clear),
        )
        .route("/session", post(session_controller::switch))
        .with_state(container)
}

/// Serves until Ctrl-C.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(container))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
