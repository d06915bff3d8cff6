use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServeArgs;
use crate::handlers::{health_handler, metrics_handler, personas_handler, review_handler};
use crate::state::AppState;

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/personas", get(personas_handler))
        .route("/review", post(review_handler))
}

// Routes are mounted at the root and under /api, where the web client calls them
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_args(&args));
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %addr, "review gateway listening");
    info!(upstream = %args.upstream_url, "forwarding reviews");
    info!(
        max_code_chars = args.max_code_chars,
        rate_limit = args.rate_limit,
        rate_window_ms = args.rate_window_ms,
        "request limits"
    );

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
