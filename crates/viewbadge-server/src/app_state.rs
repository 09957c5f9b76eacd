//! Shared application state for the badge server.
//!
//! The store client is built once at startup and shared by every request.
//! When the store settings are incomplete the state still builds; it keeps the
//! configuration error and hands it back to each request instead.

use std::sync::Arc;
use std::time::Duration;

use viewbadge_core::error::{FailureStage, Result, ViewBadgeError};
use viewbadge_core::CounterStore;

use crate::config::{ServerConfig, StoreBackend, StoreSettings};
use crate::obs::ViewMetrics;
use crate::store::{MemoryCounterStore, RestCounterStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    store: StoreSlot,
    metrics: ViewMetrics,
}

enum StoreSlot {
    Ready(Arc<dyn CounterStore>),
    Misconfigured(String),
}

impl AppState {
    /// Build state for `store.backend`. The REST backend uses `settings`;
    /// the memory backend ignores them.
    pub fn new(cfg: ServerConfig, settings: &StoreSettings) -> Result<Self> {
        if cfg.store.backend == StoreBackend::Memory {
            tracing::warn!(
                mode = cfg.counter.increment_mode.as_str(),
                "using in-memory counter store; counts reset on restart"
            );
            let store = Arc::new(MemoryCounterStore::single(1, Some(0)));
            return Ok(Self::with_store(cfg, store));
        }

        let built = settings.validate().and_then(|valid| {
            RestCounterStore::new(
                &valid,
                &cfg.counter.rpc_function,
                Duration::from_millis(cfg.store.timeout_ms),
            )
        });

        let store = match built {
            Ok(rest) => {
                tracing::info!(
                    mode = cfg.counter.increment_mode.as_str(),
                    "counter store configured"
                );
                StoreSlot::Ready(Arc::new(rest))
            }
            Err(e) if e.stage() == FailureStage::Configuration => {
                tracing::warn!(error = %e, "counter store not configured; serving error badges");
                StoreSlot::Misconfigured(e.to_string())
            }
            Err(e) => return Err(e),
        };

        Ok(Self::from_slot(cfg, store))
    }

    /// Build state around an already constructed store.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn CounterStore>) -> Self {
        Self::from_slot(cfg, StoreSlot::Ready(store))
    }

    fn from_slot(cfg: ServerConfig, store: StoreSlot) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                metrics: ViewMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &ViewMetrics {
        &self.inner.metrics
    }

    pub fn store(&self) -> Result<Arc<dyn CounterStore>> {
        match &self.inner.store {
            StoreSlot::Ready(store) => Ok(Arc::clone(store)),
            StoreSlot::Misconfigured(msg) => Err(ViewBadgeError::Configuration(msg.clone())),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.inner.store, StoreSlot::Ready(_))
    }
}
