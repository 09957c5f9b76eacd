//! viewbadge server library entry.
//!
//! Wires configuration, the counter store clients, the badge handler, and the
//! operational endpoints into an axum app. Consumed by the binary (`main.rs`)
//! and by the integration tests.

pub mod app_state;
pub mod cli;
pub mod config;
pub mod http;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
