#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Mutex;

use async_trait::async_trait;
use viewbadge_core::{
    record_view, CounterRow, CounterStore, FailureStage, IncrementMode, Result, RowId,
    ViewBadgeError,
};

/// Scripted store: a single optional row plus switches to fail each call.
#[derive(Default)]
struct ScriptedStore {
    row: Mutex<Option<CounterRow>>,
    fail_fetch: bool,
    fail_update: bool,
    updates: Mutex<Vec<(RowId, i64)>>,
}

impl ScriptedStore {
    fn with_row(row: CounterRow) -> Self {
        Self {
            row: Mutex::new(Some(row)),
            ..Default::default()
        }
    }

    fn count(&self) -> Option<i64> {
        self.row.lock().unwrap().as_ref().and_then(|r| r.count)
    }
}

#[async_trait]
impl CounterStore for ScriptedStore {
    async fn fetch_first(&self) -> Result<Option<CounterRow>> {
        if self.fail_fetch {
            return Err(ViewBadgeError::StoreFetch("connection refused".into()));
        }
        Ok(self.row.lock().unwrap().clone())
    }

    async fn update_count(&self, id: &RowId, count: i64) -> Result<()> {
        if self.fail_update {
            return Err(ViewBadgeError::StoreUpdate("permission denied".into()));
        }
        self.updates.lock().unwrap().push((id.clone(), count));
        if let Some(row) = self.row.lock().unwrap().as_mut() {
            if &row.id == id {
                row.count = Some(count);
            }
        }
        Ok(())
    }

    async fn increment_atomic(&self) -> Result<Option<CounterRow>> {
        let mut guard = self.row.lock().unwrap();
        Ok(guard.as_mut().map(|row| {
            row.count = Some(row.count.unwrap_or(0) + 1);
            row.clone()
        }))
    }
}

#[tokio::test]
async fn increments_existing_count() {
    let store = ScriptedStore::with_row(CounterRow::new("row-1", Some(99)));
    let n = record_view(&store, IncrementMode::ReadThenWrite).await.unwrap();
    assert_eq!(n, 100);
    assert_eq!(store.count(), Some(100));
    assert_eq!(
        store.updates.lock().unwrap().as_slice(),
        &[(RowId::from("row-1"), 100)]
    );
}

#[tokio::test]
async fn null_and_zero_counts_both_start_at_one() {
    for start in [None, Some(0)] {
        let store = ScriptedStore::with_row(CounterRow::new(7, start));
        let n = record_view(&store, IncrementMode::ReadThenWrite).await.unwrap();
        assert_eq!(n, 1, "start={start:?}");
        assert_eq!(store.count(), Some(1));
    }
}

#[tokio::test]
async fn empty_table_is_reported_and_nothing_written() {
    let store = ScriptedStore::default();
    let err = record_view(&store, IncrementMode::ReadThenWrite)
        .await
        .expect_err("must fail");
    assert!(matches!(err, ViewBadgeError::EmptyStore));
    assert_eq!(err.stage(), FailureStage::Empty);
    assert!(store.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_skips_update() {
    let store = ScriptedStore {
        fail_fetch: true,
        ..ScriptedStore::with_row(CounterRow::new("row-1", Some(5)))
    };
    let err = record_view(&store, IncrementMode::ReadThenWrite)
        .await
        .expect_err("must fail");
    assert_eq!(err.stage().as_str(), "fetch");
    assert!(store.updates.lock().unwrap().is_empty());
    assert_eq!(store.count(), Some(5));
}

#[tokio::test]
async fn update_failure_leaves_count_unchanged() {
    let store = ScriptedStore {
        fail_update: true,
        ..ScriptedStore::with_row(CounterRow::new("row-1", Some(5)))
    };
    let err = record_view(&store, IncrementMode::ReadThenWrite)
        .await
        .expect_err("must fail");
    assert_eq!(err.stage().as_str(), "update");
    assert_eq!(store.count(), Some(5));
}

#[tokio::test]
async fn atomic_mode_uses_store_increment() {
    let store = ScriptedStore::with_row(CounterRow::new("row-1", Some(10)));
    let n = record_view(&store, IncrementMode::Atomic).await.unwrap();
    assert_eq!(n, 11);
    assert!(store.updates.lock().unwrap().is_empty());

    let empty = ScriptedStore::default();
    let err = record_view(&empty, IncrementMode::Atomic)
        .await
        .expect_err("must fail");
    assert_eq!(err.stage(), FailureStage::Empty);
}
