//! Validation rules applied before any mutation

pub mod validation;
