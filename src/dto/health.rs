use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" while the process serves requests.
    pub status: String,
    /// Number of taken seats.
    pub registered_users: usize,
    /// Start of the tracked week (`YYYY-MM-DDTHH:MM:SS`), absent before first use.
    pub week_start: Option<String>,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(registered_users: usize, week_start: Option<String>) -> Self {
        Self {
            status: "ok".to_string(),
            registered_users,
            week_start,
        }
    }
}
