//! Top-level facade crate for viewbadge.
//!
//! Re-exports the core types and the server library so users can depend on a single crate.

pub mod core {
    pub use viewbadge_core::*;
}

pub mod server {
    pub use viewbadge_server::*;
}
