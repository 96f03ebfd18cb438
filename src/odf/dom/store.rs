//! The node arena owned by one document.
//!
//! Nodes are never freed: detaching only unlinks a node from its parent, so
//! every [`NodeId`] handed out stays valid and can be reattached later.

use super::node::{Attribute, ElementData, NodeData, NodeId, NodeKind, QName};
use crate::common::{Error, Result};

/// Mutable markup tree storage for one document.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<NodeData>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(data);
        log::trace!("allocated node {id}");
        id
    }

    /// Create a detached element tagged with a namespace prefix.
    pub fn create_element(&mut self, prefix: &str, local: &str) -> NodeId {
        self.alloc(NodeData::element(QName::new(prefix, local)))
    }

    /// Create a detached element from a `prefix:local` name.
    pub fn create_qualified(&mut self, qualified: &str) -> NodeId {
        self.alloc(NodeData::element(QName::parse(qualified)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::text(text.to_string()))
    }

    fn data(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode(id))
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id.index()).ok_or(Error::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|n| &n.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(e) => Some(e),
            NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.data_mut(id)?.kind {
            NodeKind::Element(e) => Ok(e),
            NodeKind::Text(_) => Err(Error::InvalidFormat(format!(
                "node {id} is a text node, not an element"
            ))),
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&QName> {
        self.element(id).map(|e| &e.name)
    }

    /// Whether `id` is an element named `qualified` (`prefix:local`).
    pub fn is_named(&self, id: NodeId, qualified: &str) -> bool {
        self.name(id).is_some_and(|n| n.is(qualified))
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Text(_)))
    }

    /// Payload of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(t) => Some(t),
            NodeKind::Element(_) => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.data_mut(id)?.kind {
            NodeKind::Text(t) => {
                t.clear();
                t.push_str(text);
                Ok(())
            },
            NodeKind::Element(_) => Err(Error::InvalidFormat(format!(
                "node {id} is an element, not a text node"
            ))),
        }
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attribute(&self, id: NodeId, qualified: &str) -> Option<&str> {
        self.element(id)?.attribute(qualified)
    }

    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.element(id).map(|e| e.attributes()).unwrap_or(&[])
    }

    pub fn has_attribute(&self, id: NodeId, qualified: &str) -> bool {
        self.attribute(id, qualified).is_some()
    }

    /// Set an attribute, replacing any previous value under the same key.
    pub fn set_attribute(&mut self, id: NodeId, qualified: &str, value: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        if let Some(attr) = element.attributes.iter_mut().find(|a| a.name.is(qualified)) {
            attr.value.clear();
            attr.value.push_str(value);
        } else {
            element.attributes.push(Attribute {
                name: QName::parse(qualified),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Set an attribute from a separate prefix and local name.
    pub fn set_attribute_ns(
        &mut self,
        id: NodeId,
        prefix: &str,
        local: &str,
        value: &str,
    ) -> Result<()> {
        let element = self.element_mut(id)?;
        let name = QName::new(prefix, local);
        if let Some(attr) = element.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            element.attributes.push(Attribute {
                name,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, qualified: &str) -> Result<Option<String>> {
        let element = self.element_mut(id)?;
        let position = element.attributes.iter().position(|a| a.name.is(qualified));
        Ok(position.map(|i| element.attributes.remove(i).value))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|c| *c == child)
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Link `child` under `parent` before the child currently at `index`,
    /// unlinking it from any previous parent first.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.element_mut(parent)?;
        self.data(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(Error::InvalidContent(format!(
                "node {child} cannot be attached inside itself"
            )));
        }
        let mut index = index;
        if let Some(old_parent) = self.parent(child) {
            if old_parent == parent
                && let Some(old_index) = self.index_of(parent, child)
                && old_index < index
            {
                index -= 1;
            }
            self.detach(old_parent, child)?;
        }
        let len = self.child_count(parent);
        if index > len {
            return Err(Error::out_of_bounds("child", index, len));
        }
        self.data_mut(parent)?.children.insert(index, child);
        self.data_mut(child)?.parent = Some(parent);
        log::trace!("attached {child} under {parent} at {index}");
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.child_count(parent);
        self.insert_child(parent, len, child)
    }

    /// Insert `child` immediately before `anchor`, which must be a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, anchor: NodeId, child: NodeId) -> Result<()> {
        let index = self.index_of(parent, anchor).ok_or(Error::NodeNotChild {
            parent,
            child: anchor,
        })?;
        self.insert_child(parent, index, child)
    }

    /// Insert `child` immediately after `anchor`, which must be a child of `parent`.
    pub fn insert_after(&mut self, parent: NodeId, anchor: NodeId, child: NodeId) -> Result<()> {
        let index = self.index_of(parent, anchor).ok_or(Error::NodeNotChild {
            parent,
            child: anchor,
        })?;
        self.insert_child(parent, index + 1, child)
    }

    /// Unlink `child` from `parent`.
    ///
    /// Fails with [`Error::NodeNotChild`] when `child` is not currently a child of
    /// `parent`; the tree is left untouched in that case.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self
            .index_of(parent, child)
            .ok_or(Error::NodeNotChild { parent, child })?;
        self.data_mut(parent)?.children.remove(index);
        self.data_mut(child)?.parent = None;
        log::trace!("detached {child} from {parent}");
        Ok(())
    }

    /// Unlink `node` from whatever parent it has; a no-op for roots.
    pub fn detach_from_parent(&mut self, node: NodeId) -> Result<()> {
        match self.parent(node) {
            Some(parent) => self.detach(parent, node),
            None => Ok(()),
        }
    }

    /// Unlink every child of `parent`, returning them in their former order.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>> {
        let children = std::mem::take(&mut self.data_mut(parent)?.children);
        for child in &children {
            self.data_mut(*child)?.parent = None;
        }
        Ok(children)
    }

    /// First child element named `qualified`.
    pub fn find_child(&self, parent: NodeId, qualified: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.is_named(*c, qualified))
    }

    /// First child element named `qualified`, created and appended when absent.
    pub fn find_or_append_child(&mut self, parent: NodeId, qualified: &str) -> Result<NodeId> {
        if let Some(found) = self.find_child(parent, qualified) {
            return Ok(found);
        }
        let child = self.create_qualified(qualified);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// All descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// First descendant element named `qualified`, in document order.
    pub fn find_descendant(&self, root: NodeId, qualified: &str) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|id| self.is_named(*id, qualified))
    }

    /// Concatenated text of `id` and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            Some(NodeKind::Text(t)) => out.push_str(t),
            Some(NodeKind::Element(_)) => {
                for child in self.children(id) {
                    self.collect_text(*child, out);
                }
            },
            None => {},
        }
    }

    /// Replace all children of `id` by a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> Result<()> {
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node)?;
        }
        Ok(())
    }

    /// Copy a subtree into fresh, detached nodes.
    pub fn deep_clone(&mut self, id: NodeId) -> Result<NodeId> {
        let kind = self.data(id)?.kind.clone();
        let copy = self.alloc(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        let children = self.children(id).to_vec();
        for child in children {
            let child_copy = self.deep_clone(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_with_runs(store: &mut NodeStore, n: usize) -> (NodeId, Vec<NodeId>) {
        let p = store.create_element("text", "p");
        let runs: Vec<NodeId> = (0..n).map(|i| store.create_text(&i.to_string())).collect();
        for run in &runs {
            store.append_child(p, *run).unwrap();
        }
        (p, runs)
    }

    #[test]
    fn test_attributes_are_unique_per_key() {
        let mut store = NodeStore::new();
        let p = store.create_element("text", "p");
        store.set_attribute(p, "text:style-name", "P1").unwrap();
        store.set_attribute(p, "text:style-name", "P2").unwrap();
        assert_eq!(store.attributes(p).len(), 1);
        assert_eq!(store.attribute(p, "text:style-name"), Some("P2"));
        assert_eq!(
            store.remove_attribute(p, "text:style-name").unwrap().as_deref(),
            Some("P2")
        );
        assert!(!store.has_attribute(p, "text:style-name"));
    }

    #[test]
    fn test_detach_not_a_child_is_an_error() {
        let mut store = NodeStore::new();
        let (p, runs) = paragraph_with_runs(&mut store, 2);
        let stranger = store.create_text("x");
        let err = store.detach(p, stranger).unwrap_err();
        assert!(matches!(err, Error::NodeNotChild { .. }));
        assert_eq!(store.children(p), runs.as_slice());
    }

    #[test]
    fn test_reattach_moves_between_parents() {
        let mut store = NodeStore::new();
        let (a, runs) = paragraph_with_runs(&mut store, 2);
        let b = store.create_element("text", "p");
        store.append_child(b, runs[0]).unwrap();
        assert_eq!(store.children(a), &[runs[1]]);
        assert_eq!(store.children(b), &[runs[0]]);
        assert_eq!(store.parent(runs[0]), Some(b));
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut store = NodeStore::new();
        let (p, runs) = paragraph_with_runs(&mut store, 2);
        let x = store.create_text("x");
        let y = store.create_text("y");
        store.insert_before(p, runs[1], x).unwrap();
        store.insert_after(p, runs[1], y).unwrap();
        assert_eq!(store.children(p), &[runs[0], x, runs[1], y]);
        assert_eq!(store.text_content(p), "0x1y");
    }

    #[test]
    fn test_append_existing_child_moves_it_to_end() {
        let mut store = NodeStore::new();
        let (p, runs) = paragraph_with_runs(&mut store, 3);
        store.append_child(p, runs[0]).unwrap();
        assert_eq!(store.children(p), &[runs[1], runs[2], runs[0]]);
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut store = NodeStore::new();
        let outer = store.create_element("text", "section");
        let inner = store.create_element("text", "section");
        store.append_child(outer, inner).unwrap();
        assert!(store.append_child(inner, outer).is_err());
    }

    #[test]
    fn test_deep_clone_is_detached_copy() {
        let mut store = NodeStore::new();
        let (p, _) = paragraph_with_runs(&mut store, 2);
        store.set_attribute(p, "text:style-name", "P1").unwrap();
        let copy = store.deep_clone(p).unwrap();
        assert_ne!(copy, p);
        assert_eq!(store.parent(copy), None);
        assert_eq!(store.text_content(copy), "01");
        assert_eq!(store.attribute(copy, "text:style-name"), Some("P1"));
    }

    #[test]
    fn test_unknown_handle() {
        let mut store = NodeStore::new();
        let foreign = NodeId::from_index(42);
        assert!(matches!(
            store.set_attribute(foreign, "a:b", "c"),
            Err(Error::UnknownNode(_))
        ));
    }
}
