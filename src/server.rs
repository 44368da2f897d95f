use crate::aggregator::StatsAggregator;
use crate::models::Settlement;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Application state shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: StatsAggregator,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/stats", get(stats))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the stats HTTP server
pub async fn start_server(app_state: AppState, port: u16) -> std::io::Result<()> {
    let app = router(app_state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Stats server listening on http://{}", addr);

    axum::serve(listener, app).await
}

/// Every request is a fresh page view, so every request runs a fresh load.
/// Fallback data is still served with 200; `outcome` tells them apart.
async fn stats(State(state): State<AppState>) -> Json<Settlement> {
    Json(state.aggregator.load().await)
}

async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
