//! In-process metrics rendered by `/metrics`.

pub mod metrics;

pub use metrics::ViewMetrics;
