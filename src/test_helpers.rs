use std::net::SocketAddr;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Config pointing at a private in-memory store; the environment is ignored
/// so tests never pick up a developer's `.env`.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: MEMORY_DATABASE_URL.to_string(),
            ..DatabaseConfig::default()
        },
        ..AppConfig::default()
    }
}

/// The full app over an empty in-memory SQLite store.
pub async fn test_app() -> Router {
    let cfg = test_config();
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect in-memory sqlite");
    app(AppState::new(cfg, db))
}

/// The full app over a caller supplied connection, usually a `MockDatabase`.
pub fn app_with_db(db: DatabaseConnection) -> Router {
    app(AppState::new(test_config(), db))
}

/// Serves [`test_app`] on an ephemeral localhost port for out-of-process
/// style clients. The server lives as long as the runtime.
pub async fn spawn_test_server() -> SocketAddr {
    let app = test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!("test server failed: {err}");
        }
    });
    addr
}
