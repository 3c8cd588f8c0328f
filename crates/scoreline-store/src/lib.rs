//! Scoreline Store - crash-safe, lock-guarded JSON record store
//!
//! Provides:
//! - Named advisory file locks with bounded, backed-off retry
//! - Atomic snapshot-replace writes (temp file, fsync, rename)
//! - The `RecordStore` owning the leaderboard and conversation documents
//! - Store configuration

pub mod config;
pub mod errors;
pub mod file;
pub mod record_store;

// Re-export key types
pub use config::{LockConfig, StoreConfig};
pub use errors::Result;
pub use record_store::RecordStore;
