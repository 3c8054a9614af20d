//! Sweat Dupe binary entrypoint wiring the Telegram bot and the health server.

use std::{future::IntoFuture, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sweat_dupe::{
    config::AppConfig,
    dao::state_store::JsonFileStore,
    routes,
    services::telegram,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err).context("reading .env file");
        }
    }
    init_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!(?config, "configuration loaded");

    let store = Arc::new(JsonFileStore::new(config.data_file().clone()));
    let port = config.port();
    let app_state = AppState::new(config, store);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting health server");
    let listener = TcpListener::bind(addr).await.context("binding health server")?;
    let app = build_router(app_state.clone());
    let server = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .into_future();

    tokio::select! {
        () = telegram::run(app_state) => {
            info!("bot stopped; shutting down");
        }
        result = server => {
            result.context("serving axum")?;
            warn!("health server stopped; shutting down");
        }
    }

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state).layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "could not install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
