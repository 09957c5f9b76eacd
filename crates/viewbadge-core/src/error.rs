//! Shared error type across viewbadge crates.

use thiserror::Error;

/// Which step of the increment flow failed (stable strings for logs/metrics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Store settings missing or empty.
    Configuration,
    /// Select against the store failed.
    Fetch,
    /// Select succeeded but returned no row.
    Empty,
    /// Update (or atomic increment) against the store failed.
    Update,
    /// Anything else.
    Internal,
}

impl FailureStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStage::Configuration => "configuration",
            FailureStage::Fetch => "fetch",
            FailureStage::Empty => "empty",
            FailureStage::Update => "update",
            FailureStage::Internal => "internal",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ViewBadgeError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum ViewBadgeError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("store select failed: {0}")]
    StoreFetch(String),
    #[error("no counter row found in store")]
    EmptyStore,
    #[error("store update failed: {0}")]
    StoreUpdate(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ViewBadgeError {
    /// Map the error to the stage that produced it.
    pub fn stage(&self) -> FailureStage {
        match self {
            ViewBadgeError::Configuration(_) | ViewBadgeError::UnsupportedVersion => {
                FailureStage::Configuration
            }
            ViewBadgeError::StoreFetch(_) => FailureStage::Fetch,
            ViewBadgeError::EmptyStore => FailureStage::Empty,
            ViewBadgeError::StoreUpdate(_) => FailureStage::Update,
            ViewBadgeError::Internal(_) => FailureStage::Internal,
        }
    }
}
