//! File primitives
//!
//! Provides:
//! - Named exclusive locks on sidecar `.lock` files
//! - Atomic snapshot-replace writes
//! - `JsonDocument`, a single JSON file guarded by its own lock

mod atomic;
mod document;
mod lock;

pub use atomic::atomic_write;
pub use document::JsonDocument;
pub use lock::FileLock;
