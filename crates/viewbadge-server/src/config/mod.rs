//! Server config loader (strict YAML) and store settings from the environment.

pub mod env;
pub mod schema;

use std::{fs, io::ErrorKind};

use viewbadge_core::error::{Result, ViewBadgeError};

pub use env::{StoreSettings, ValidStoreSettings};
pub use schema::{
    CounterSection, IdColumnType, ServerConfig, ServerSection, StoreBackend, StoreSection,
};

pub const ENV_CONFIG_PATH: &str = "VIEWBADGE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "viewbadge.yaml";

/// Load the YAML config at `path`, else the one named by `VIEWBADGE_CONFIG`,
/// else `viewbadge.yaml`. A missing file means defaults.
pub fn load(path: Option<&str>) -> Result<ServerConfig> {
    let path = match path {
        Some(p) => p.to_string(),
        None => std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into()),
    };
    match fs::read_to_string(&path) {
        Ok(s) => {
            tracing::info!(%path, "loading config file");
            load_from_str(&s)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            let cfg = ServerConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
        Err(e) => Err(ViewBadgeError::Configuration(format!(
            "read config {path} failed: {e}"
        ))),
    }
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| ViewBadgeError::Configuration(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
