//! `CounterStore` implementations.
//!
//! - `rest`: PostgREST (Supabase) over HTTP, used in deployments.
//! - `memory`: in-process rows, selected with `store.backend: memory` for
//!   local runs and used by the tests.

pub mod memory;
pub mod rest;

pub use memory::MemoryCounterStore;
pub use rest::{increment_function_sql, RestCounterStore};
