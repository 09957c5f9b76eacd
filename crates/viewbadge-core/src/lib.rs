//! viewbadge core: transport-agnostic badge payloads, the counter row model,
//! the `CounterStore` seam, and the shared error surface.
//!
//! The HTTP server and the concrete store clients live in `viewbadge-server`.
//! Nothing here depends on a runtime or a network stack, so the increment flow
//! can be exercised against any store implementation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every fallible path surfaces as `ViewBadgeError`/`Result` so a bad store
//! response degrades to the error badge instead of crashing the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod badge;
pub mod counter;
pub mod error;

pub use badge::Badge;
pub use counter::{next_count, record_view, CounterRow, CounterStore, IncrementMode, RowId};
/// Shared result type.
pub use error::{FailureStage, Result, ViewBadgeError};
