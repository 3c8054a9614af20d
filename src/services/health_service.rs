use crate::{
    dto::{format_iso, health::HealthResponse},
    state::SharedState,
};

/// Snapshot the roster size and tracked week for the health endpoint.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let tracker = state.tracker().lock().await;
    HealthResponse::ok(tracker.user_count(), tracker.week_start().map(format_iso))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use time::macros::datetime;

    use super::*;
    use crate::{
        config::AppConfig,
        dao::{
            models::{BotState, UserId, UserRecord},
            state_store::MemoryStore,
        },
        state::AppState,
    };

    fn config() -> AppConfig {
        AppConfig::from_lookup(|key| (key == "TELEGRAM_BOT_TOKEN").then(|| "123:abc".to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn fresh_state_reports_no_week() {
        let state = AppState::new(config(), Arc::new(MemoryStore::new()));

        let health = health_status(&state).await;

        assert_eq!(health.status, "ok");
        assert_eq!(health.registered_users, 0);
        assert_eq!(health.week_start, None);
    }

    #[tokio::test]
    async fn reports_loaded_roster_and_week() {
        let mut saved = BotState {
            week_start: Some(datetime!(2025-03-03 0:00)),
            ..BotState::default()
        };
        saved.users.insert(UserId(1001), UserRecord::new("Ana"));
        let state = AppState::new(config(), Arc::new(MemoryStore::with_state(saved)));

        let health = health_status(&state).await;

        assert_eq!(health.registered_users, 1);
        assert_eq!(health.week_start.as_deref(), Some("2025-03-03T00:00:00"));
    }
}
