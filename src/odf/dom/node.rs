//! Node handles, qualified names and node payloads.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Stable handle of a node inside one document's [`NodeStore`](super::NodeStore).
///
/// Handles are plain indices: they stay valid for the lifetime of the store,
/// whether or not the node is currently attached to a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A prefixed element or attribute name, e.g. `text:p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    prefix: String,
    local: String,
}

impl QName {
    pub fn new(prefix: &str, local: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            local: local.to_string(),
        }
    }

    /// Split `prefix:local`; a name without a colon has an empty prefix.
    pub fn parse(qualified: &str) -> Self {
        match qualified.split_once(':') {
            Some((prefix, local)) => Self::new(prefix, local),
            None => Self::new("", qualified),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn local(&self) -> &str {
        &self.local
    }

    /// Compare against a `prefix:local` string without allocating.
    pub fn is(&self, qualified: &str) -> bool {
        match qualified.split_once(':') {
            Some((prefix, local)) => self.prefix == prefix && self.local == local,
            None => self.prefix.is_empty() && self.local == qualified,
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{}:{}", self.prefix, self.local)
        }
    }
}

/// One attribute of an element. Keys are unique per element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// Element payload: name plus attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub(crate) name: QName,
    pub(crate) attributes: SmallVec<[Attribute; 4]>,
}

impl ElementData {
    pub fn name(&self) -> &QName {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub(crate) fn attribute(&self, qualified: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.is(qualified))
            .map(|a| a.value.as_str())
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn element(name: QName) -> Self {
        Self {
            kind: NodeKind::Element(ElementData {
                name,
                attributes: SmallVec::new(),
            }),
            parent: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn text(text: String) -> Self {
        Self {
            kind: NodeKind::Text(text),
            parent: None,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname_parse_and_match() {
        let name = QName::parse("text:p");
        assert_eq!(name.prefix(), "text");
        assert_eq!(name.local(), "p");
        assert!(name.is("text:p"));
        assert!(!name.is("text:h"));
        assert_eq!(name.to_string(), "text:p");

        let bare = QName::parse("root");
        assert!(bare.is("root"));
        assert_eq!(bare.to_string(), "root");
    }
}
