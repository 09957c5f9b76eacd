use std::net::SocketAddr;

use serde::Deserialize;
use viewbadge_core::error::{Result, ViewBadgeError};
use viewbadge_core::IncrementMode;

/// Paths owned by the operational endpoints.
pub const RESERVED_PATHS: [&str; 3] = ["/healthz", "/readyz", "/metrics"];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub counter: CounterSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            counter: CounterSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ViewBadgeError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.counter.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path the badge endpoint is mounted on (also served at `/`).
    #[serde(default = "default_route")]
    pub route: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            route: default_route(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.route.starts_with('/') {
            return Err(ViewBadgeError::Configuration(
                "server.route must start with '/'".into(),
            ));
        }
        if RESERVED_PATHS.contains(&self.route.as_str()) {
            return Err(ViewBadgeError::Configuration(format!(
                "server.route {} collides with an operational endpoint",
                self.route
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ViewBadgeError::Configuration(format!("server.listen is not a socket address: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_route() -> String {
    "/api/views".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    #[serde(default)]
    pub increment_mode: IncrementMode,

    /// Store-side function called in `atomic` mode.
    #[serde(default = "default_rpc_function")]
    pub rpc_function: String,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            increment_mode: IncrementMode::default(),
            rpc_function: default_rpc_function(),
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        if self.rpc_function.trim().is_empty() {
            return Err(ViewBadgeError::Configuration(
                "counter.rpc_function must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_rpc_function() -> String {
    "increment_profile_views".into()
}

/// Where the counter row lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// PostgREST table named by the `SUPABASE_*` environment variables.
    #[default]
    Rest,
    /// Process-local row starting at zero; lost on restart.
    Memory,
}

/// SQL type of the table's `id` column, used when rendering the increment
/// function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdColumnType {
    #[default]
    Uuid,
    Bigint,
    Integer,
    Text,
}

impl IdColumnType {
    pub fn as_sql(self) -> &'static str {
        match self {
            IdColumnType::Uuid => "uuid",
            IdColumnType::Bigint => "bigint",
            IdColumnType::Integer => "integer",
            IdColumnType::Text => "text",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default)]
    pub id_type: IdColumnType,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            id_type: IdColumnType::default(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(ViewBadgeError::Configuration(
                "store.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_timeout_ms() -> u64 {
    10000
}
