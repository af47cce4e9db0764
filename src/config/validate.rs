use anyhow::{Result, bail};
use axum::http::HeaderValue;

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if cfg.cors.origins().next().is_none() {
        errors.push("cors.allowed_origins must list at least one origin or '*'".to_string());
    }

    for origin in cfg.cors.origins().filter(|origin| *origin != "*") {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(format!("cors.allowed_origins contains an invalid origin: {origin}"));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
