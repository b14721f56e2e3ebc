//! Session store backends (C9): in-memory and ScyllaDB-backed shared
//! cache, plus the per-session `LockManager` and TTL sweeper that sit in
//! front of either one.

pub mod error;
pub mod in_memory;
pub mod locks;
pub mod scylla_store;
pub mod sweeper;

pub use error::PersistenceError;
pub use in_memory::InMemorySessionStore;
pub use locks::{LockManager, SessionGuard};
pub use scylla_store::{ScyllaConfig, ScyllaSessionStore};
pub use sweeper::{spawn as spawn_sweeper, DEFAULT_SWEEP_INTERVAL};
