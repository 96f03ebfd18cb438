//! XML text helpers shared by the node store's parser and serializer.

mod escape;

pub use escape::{escape_attribute, escape_text};
