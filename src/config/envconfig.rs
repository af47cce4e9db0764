use std::{collections::HashMap, path::PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Names a dotenv file to load instead of the default lookup.
pub const ENV_FILE_VAR: &str = "TODO_ENV_FILE";

/// Settings read from `APP_`-prefixed variables, `__` between sections:
/// `APP_DATABASE__URL` lands in `database.url`.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_source(None)
    }

    /// Reads from `vars` instead of the process environment.
    fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Some(vars))
    }

    fn from_source(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let environment = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
            .source(vars);

        let cfg = config_rs::Config::builder()
            .add_source(environment)
            .build()
            .context("failed to read environment variables for config")?
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_dotenv() {
    let loaded = match std::env::var_os(ENV_FILE_VAR) {
        Some(path) => dotenvy::from_path(PathBuf::from(path)).map(|_| ()),
        None => dotenvy::from_filename(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(".env"))
            .or_else(|_| dotenvy::dotenv())
            .map(|_| ()),
    };
    if let Err(err) = loaded
        && !err.not_found()
    {
        eprintln!("ignoring unreadable env file: {err}");
    }
}
