//! Command orchestration layer.
//!
//! Provides the dispatcher that coordinates validation and rendering from
//! core with the record store.

pub mod dispatcher;
