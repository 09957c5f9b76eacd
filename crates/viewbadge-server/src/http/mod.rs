//! Badge endpoint.

pub mod views;

pub use views::{views, CACHE_CONTROL_VALUE};
