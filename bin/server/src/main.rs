mod config;
mod error;
mod routes;
mod state;

use config::ServerConfig;
use deskrelay_contacts::HttpContactStore;
use deskrelay_directory::HttpChatDirectory;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let directory =
        HttpChatDirectory::new(&config.directory).expect("failed to build directory client");
    let contacts =
        HttpContactStore::new(&config.contacts).expect("failed to build contact store client");

    let state = Arc::new(AppState::new(&config, directory, contacts));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.listen_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install shutdown signal handler");
    tracing::info!("shutting down");
}
