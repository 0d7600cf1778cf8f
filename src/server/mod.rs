pub mod handlers;

use crate::{Result, config::ServerConfig, handler::Handler};
use axum::{Router, routing::post};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Router exposing the handler at `/`, for running outside the Lambda runtime.
pub fn router(handler: Handler) -> Router {
    Router::new()
        .route("/", post(handlers::invoke).options(handlers::preflight))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

pub async fn run(config: &ServerConfig, handler: Handler) -> Result<()> {
    let app = router(handler);

    let addr = SocketAddr::new(config.host.parse()?, config.port);

    info!("Starting local server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
