use crate::channel::device_channel_handler;
use crate::context::AppContext;
use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::info;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/api/gas",
            post(handlers::record_reading).get(handlers::reading_history),
        )
        .route("/api/gas/range", get(handlers::reading_range))
        .route("/api/gas/latest", get(handlers::latest_reading))
        .route(
            "/api/control",
            post(handlers::relay_command).get(handlers::command_states),
        )
        .route("/api/device/status", get(handlers::device_status))
        .route("/api/device/connect", post(handlers::device_connect))
        .route("/api/device/disconnect", post(handlers::device_disconnect))
        .route(
            "/api/threshold",
            post(handlers::set_threshold).get(handlers::get_threshold),
        )
        .route("/api/device/channel", get(device_channel_handler))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Serve until the cancellation token fires, then shut down gracefully.
pub async fn run_http_server(
    config: HttpServerConfig,
    ctx: AppContext,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "http server listening");

    axum::serve(listener, build_router(ctx))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("http server stopped");
    Ok(())
}
