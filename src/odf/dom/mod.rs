//! Node Store: the hierarchical markup tree one document owns.
//!
//! Content and style objects never own nodes; they hold [`NodeId`] handles
//! into the store and go through it for every structural change.

mod node;
mod store;
mod xml;

pub use node::{Attribute, ElementData, NodeId, NodeKind, QName};
pub use store::NodeStore;
pub use xml::XML_DECLARATION;
