//! Store credentials from the process environment.
//!
//! These are read once at startup. Missing values are not fatal: the server
//! keeps running and every badge request answers with the error badge until
//! the deployment is fixed.

use viewbadge_core::error::{Result, ViewBadgeError};

pub const ENV_URL: &str = "SUPABASE_URL";
pub const ENV_KEY: &str = "SUPABASE_ANON_KEY";
pub const ENV_TABLE: &str = "SUPABASE_TABLE";

/// Raw settings as found; any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct StoreSettings {
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: Option<String>,
}

/// Settings that passed `validate`.
#[derive(Clone)]
pub struct ValidStoreSettings {
    pub url: String,
    pub key: String,
    pub table: String,
}

impl std::fmt::Debug for ValidStoreSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidStoreSettings")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("table", &self.table)
            .finish()
    }
}

impl StoreSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup(ENV_URL),
            key: lookup(ENV_KEY),
            table: lookup(ENV_TABLE),
        }
    }

    /// Require all three settings to be present and non-blank.
    pub fn validate(&self) -> Result<ValidStoreSettings> {
        let missing: Vec<&str> = [
            (ENV_URL, &self.url),
            (ENV_KEY, &self.key),
            (ENV_TABLE, &self.table),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ViewBadgeError::Configuration(format!(
                "missing environment variables: {}",
                missing.join(", ")
            )));
        }

        Ok(ValidStoreSettings {
            url: self.url.clone().unwrap_or_default().trim().to_string(),
            key: self.key.clone().unwrap_or_default().trim().to_string(),
            table: self.table.clone().unwrap_or_default().trim().to_string(),
        })
    }
}
