use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::{provider_for_url, redact_url};
use crate::config::DatabaseConfig;

/// Connects through the provider matching `cfg.url` and creates any missing
/// tables from the entity definitions.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = provider_for_url(&cfg.url)?;
    info!(
        provider = %provider.id(),
        url = %redact_url(&cfg.url),
        "connecting to todo store"
    );

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db, cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("todo_server::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}
