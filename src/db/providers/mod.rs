mod postgres;
mod sqlite;

use std::{fmt, time::Duration};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};

use self::{postgres::PostgresDbProvider, sqlite::SqliteDbProvider};
use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

static PROVIDERS: &[&dyn DbProvider] = &[&PostgresDbProvider, &SqliteDbProvider];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProviderId {
    Postgres,
    Sqlite,
}

impl fmt::Display for DbProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DbProviderId::Postgres => "postgres",
            DbProviderId::Sqlite => "sqlite",
        })
    }
}

/// A storage backend the todo store can run on, picked by URL scheme.
#[async_trait]
pub trait DbProvider: Send + Sync {
    fn id(&self) -> DbProviderId;
    fn supports_url(&self, url: &str) -> bool;
    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection>;
    async fn post_connect(&self, _db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        Ok(())
    }
}

pub fn provider_for_url(url: &str) -> Result<&'static dyn DbProvider> {
    PROVIDERS
        .iter()
        .copied()
        .find(|provider| provider.supports_url(url))
        .ok_or_else(|| {
            anyhow!(
                "unsupported database url '{}'; expected scheme postgres://, postgresql://, or sqlite:",
                redact_url(url)
            )
        })
}

/// Keeps only the scheme so credentials never reach the logs.
pub fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}

fn pool_options(cfg: &DatabaseConfig) -> ConnectOptions {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    options
}
