use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::health::HealthResponse, services::health_service, state::SharedState};

/// Banner shown on the root path.
const BANNER: &str = "🤖 Sweat Dupe Bot is running!";

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Bot process is up", body = String))
)]
/// Plain-text banner for uptime probes that only look at the root path.
pub async fn home() -> &'static str {
    BANNER
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Bot process is up", body = String))
)]
/// Minimal liveness probe.
pub async fn health() -> &'static str {
    "OK"
}

#[utoipa::path(
    get,
    path = "/healthcheck",
    tag = "health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
/// Return the health status along with the roster size and tracked week.
pub async fn healthcheck(State(state): State<SharedState>) -> Json<HealthResponse> {
    let status = health_service::health_status(&state).await;
    Json(status)
}

/// Configure the health routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/healthcheck", get(healthcheck))
}
