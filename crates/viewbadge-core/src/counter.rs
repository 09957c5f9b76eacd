//! Counter row model, the store seam, and the increment flow.
//!
//! The backing table is expected to hold exactly one row. That row is
//! provisioned out-of-band; nothing here creates or deletes it, and with more
//! than one row the "first" row picked by `fetch_first` is unspecified.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewBadgeError};

/// Opaque row identifier (uuid text or integer key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{n}"),
            RowId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        RowId::Text(s.to_string())
    }
}

impl From<i64> for RowId {
    fn from(n: i64) -> Self {
        RowId::Int(n)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRow {
    pub id: RowId,
    /// `None` when the column is null or missing.
    #[serde(default)]
    pub count: Option<i64>,
}

impl CounterRow {
    pub fn new(id: impl Into<RowId>, count: Option<i64>) -> Self {
        Self { id: id.into(), count }
    }
}

/// Row-oriented store holding the counter.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Select up to one row, no filter, no ordering.
    async fn fetch_first(&self) -> Result<Option<CounterRow>>;

    /// Set `count` on the row identified by `id`.
    async fn update_count(&self, id: &RowId, count: i64) -> Result<()>;

    /// Increment in a single store-side statement and return the new row.
    async fn increment_atomic(&self) -> Result<Option<CounterRow>>;
}

/// How `record_view` mutates the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncrementMode {
    /// Fetch, add one, write back. Concurrent requests can lose updates.
    #[default]
    ReadThenWrite,
    /// Delegate to the store's atomic increment.
    Atomic,
}

impl IncrementMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IncrementMode::ReadThenWrite => "read_then_write",
            IncrementMode::Atomic => "atomic",
        }
    }
}

/// Next value for a stored count. A null count and a zero count are the same
/// thing here: both become 1.
pub fn next_count(current: Option<i64>) -> i64 {
    match current {
        None | Some(0) => 1,
        Some(c) => c.saturating_add(1),
    }
}

/// Bump the view counter once and return the new count.
pub async fn record_view(store: &dyn CounterStore, mode: IncrementMode) -> Result<i64> {
    match mode {
        IncrementMode::ReadThenWrite => {
            let row = store.fetch_first().await?.ok_or(ViewBadgeError::EmptyStore)?;
            let count = next_count(row.count);
            store.update_count(&row.id, count).await?;
            tracing::debug!(id = %row.id, previous = ?row.count, count, "view recorded");
            Ok(count)
        }
        IncrementMode::Atomic => {
            let row = store.increment_atomic().await?.ok_or(ViewBadgeError::EmptyStore)?;
            // The store already applied the increment; a null here would mean
            // the function returned a row it did not touch.
            let count = row.count.ok_or_else(|| {
                ViewBadgeError::StoreUpdate("atomic increment returned null count".into())
            })?;
            tracing::debug!(id = %row.id, count, "view recorded atomically");
            Ok(count)
        }
    }
}
