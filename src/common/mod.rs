//! Common types and utilities shared across the document model.
//!
//! This module provides the unified error type and the XML text helpers used
//! wherever the node store meets serialized markup.

// Submodule declarations
pub mod error;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
