//! Unified error types for Longan.
//!
//! This module provides a unified error type covering structural, resource and
//! input failures of the document model.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{BoxedCause, Error, Result};
