//! The style registry.
//!
//! Styles are grouped into per-document pools: the automatic pool holds
//! document-local styles that are re-emitted on every save, the common pool
//! mirrors `office:styles`. Names are unique within a pool only.

mod definition;
mod family;
mod import;
mod pool;
pub mod properties;

pub use definition::{Style, StyleEntry, UnknownStyle};
pub use family::StyleFamily;
pub use import::{absorb_stray_styles, import_container};
pub use pool::StylePool;
pub use properties::{Property, PropertyCollection, PropertyKind, TypedProperty};
