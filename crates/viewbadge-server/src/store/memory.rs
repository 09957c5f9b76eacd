//! In-process counter table.
//!
//! Rows live behind a `tokio::sync::Mutex`. `fetch_first` releases the lock
//! and yields before returning, so interleaved read-then-write requests race
//! the same way they would against a remote table. `increment_atomic` holds
//! the lock for the whole read-modify-write.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use viewbadge_core::error::{Result, ViewBadgeError};
use viewbadge_core::{CounterRow, CounterStore, RowId};

#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    rows: Mutex<Vec<CounterRow>>,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
    updates: AtomicU64,
}

impl MemoryCounterStore {
    pub fn new(rows: Vec<CounterRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Single-row table, the expected deployment shape.
    pub fn single(id: impl Into<RowId>, count: Option<i64>) -> Self {
        Self::new(vec![CounterRow::new(id, count)])
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::Relaxed);
    }

    /// Number of successful writes (updates and atomic increments).
    pub fn updates_applied(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    pub async fn rows(&self) -> Vec<CounterRow> {
        self.rows.lock().await.clone()
    }

    /// Count of the first row, if any.
    pub async fn first_count(&self) -> Option<i64> {
        self.rows.lock().await.first().and_then(|r| r.count)
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    async fn fetch_first(&self) -> Result<Option<CounterRow>> {
        if self.fail_fetch.load(Ordering::Relaxed) {
            return Err(ViewBadgeError::StoreFetch("memory store: fetch disabled".into()));
        }
        let row = self.rows.lock().await.first().cloned();
        tokio::task::yield_now().await;
        Ok(row)
    }

    async fn update_count(&self, id: &RowId, count: i64) -> Result<()> {
        if self.fail_update.load(Ordering::Relaxed) {
            return Err(ViewBadgeError::StoreUpdate("memory store: update disabled".into()));
        }
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| ViewBadgeError::StoreUpdate(format!("no row with id {id}")))?;
        row.count = Some(count);
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn increment_atomic(&self) -> Result<Option<CounterRow>> {
        if self.fail_update.load(Ordering::Relaxed) {
            return Err(ViewBadgeError::StoreUpdate("memory store: update disabled".into()));
        }
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.first_mut() else {
            return Ok(None);
        };
        row.count = Some(row.count.unwrap_or(0).saturating_add(1));
        self.updates.fetch_add(1, Ordering::Relaxed);
        Ok(Some(row.clone()))
    }
}
