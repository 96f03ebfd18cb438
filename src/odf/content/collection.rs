//! Ordered member collections mirrored into the node tree.
//!
//! A [`NodeCollection`] keeps its members' nodes as children of an owner node,
//! in member order. Every completed `insert`/`remove` leaves the owner's
//! member children in the same order as the collection. Members must arrive
//! detached; a node still attached elsewhere is rejected. Observers run after
//! the node has been attached (or detached) and may veto the mutation, in
//! which case both the member list and the node tree are restored.

use crate::common::{Error, Result};
use crate::odf::document::DocumentContext;
use crate::odf::dom::NodeId;

/// Anything that is represented by exactly one node.
pub trait NodeBacked {
    fn node(&self) -> NodeId;
}

/// Callbacks fired synchronously by [`NodeCollection`] mutations.
pub trait CollectionObserver<T> {
    /// Reject a member before anything is changed.
    fn validate(&self, _item: &T) -> Result<()> {
        Ok(())
    }

    /// Called once the member's node is attached under `owner`.
    fn on_insert(&self, _ctx: &mut DocumentContext, _owner: NodeId, _item: &mut T) -> Result<()> {
        Ok(())
    }

    /// Called once the member's node is detached from `owner`.
    fn on_remove(&self, _ctx: &mut DocumentContext, _owner: NodeId, _item: &mut T) -> Result<()> {
        Ok(())
    }
}

/// Observer that only keeps nodes in sync.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeSync;

impl<T> CollectionObserver<T> for NodeSync {}

/// Where the first member goes when the collection has no members yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Before every other child of the owner.
    Leading,
    #[default]
    Trailing,
}

#[derive(Debug, Clone)]
pub struct NodeCollection<T, H = NodeSync> {
    owner: NodeId,
    items: Vec<T>,
    observer: H,
    placement: Placement,
}

impl<T: NodeBacked, H: CollectionObserver<T>> NodeCollection<T, H> {
    pub fn new(owner: NodeId, observer: H) -> Self {
        Self::with_placement(owner, observer, Placement::Trailing)
    }

    pub fn with_placement(owner: NodeId, observer: H, placement: Placement) -> Self {
        Self {
            owner,
            items: Vec::new(),
            observer,
            placement,
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn observer(&self) -> &H {
        &self.observer
    }

    /// Take a member whose node is already a child of the owner.
    ///
    /// No observer runs; this is the load path.
    pub(crate) fn adopt(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn push(&mut self, ctx: &mut DocumentContext, item: T) -> Result<()> {
        self.insert(ctx, self.items.len(), item)
    }

    pub fn insert(&mut self, ctx: &mut DocumentContext, index: usize, mut item: T) -> Result<()> {
        if index > self.items.len() {
            return Err(Error::out_of_bounds("collection", index, self.items.len()));
        }
        self.observer.validate(&item)?;

        let node = item.node();
        if let Some(parent) = ctx.store().parent(node) {
            return Err(Error::InvalidContent(format!(
                "node {node} is already attached under {parent}"
            )));
        }
        let store = ctx.store_mut();
        if let Some(next) = self.items.get(index) {
            store.insert_before(self.owner, next.node(), node)?;
        } else if let Some(prev) = index.checked_sub(1).and_then(|i| self.items.get(i)) {
            store.insert_after(self.owner, prev.node(), node)?;
        } else {
            match self.placement {
                Placement::Leading => store.insert_child(self.owner, 0, node)?,
                Placement::Trailing => store.append_child(self.owner, node)?,
            }
        }
        log::trace!("attached {node} under {}", self.owner);

        if let Err(err) = self.observer.on_insert(ctx, self.owner, &mut item) {
            ctx.store_mut().detach(self.owner, node)?;
            return Err(err);
        }
        self.items.insert(index, item);
        Ok(())
    }

    pub fn remove(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<T> {
        if index >= self.items.len() {
            return Err(Error::out_of_bounds("collection", index, self.items.len()));
        }
        let node = self.items[index].node();
        let position = ctx
            .store()
            .index_of(self.owner, node)
            .ok_or(Error::NodeNotChild {
                parent: self.owner,
                child: node,
            })?;
        ctx.store_mut().detach(self.owner, node)?;
        log::trace!("detached {node} from {}", self.owner);

        let mut item = self.items.remove(index);
        if let Err(err) = self.observer.on_remove(ctx, self.owner, &mut item) {
            ctx.store_mut().insert_child(self.owner, position, node)?;
            self.items.insert(index, item);
            return Err(err);
        }
        Ok(item)
    }

    pub fn pop(&mut self, ctx: &mut DocumentContext) -> Result<Option<T>> {
        match self.items.len() {
            0 => Ok(None),
            len => self.remove(ctx, len - 1).map(Some),
        }
    }

    /// Remove every member, returning them in their original order.
    pub fn clear(&mut self, ctx: &mut DocumentContext) -> Result<Vec<T>> {
        let mut removed = Vec::with_capacity(self.items.len());
        while let Some(item) = self.pop(ctx)? {
            removed.push(item);
        }
        removed.reverse();
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the member backed by `node`.
    pub fn position(&self, node: NodeId) -> Option<usize> {
        self.items.iter().position(|item| item.node() == node)
    }

    /// Nodes of all members, in order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.items.iter().map(NodeBacked::node).collect()
    }
}

impl<'a, T, H> IntoIterator for &'a NodeCollection<T, H> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::document::{Document, DocumentKind};

    #[derive(Debug)]
    struct Leaf(NodeId);

    impl NodeBacked for Leaf {
        fn node(&self) -> NodeId {
            self.0
        }
    }

    struct Veto;

    impl CollectionObserver<Leaf> for Veto {
        fn on_insert(&self, _: &mut DocumentContext, _: NodeId, _: &mut Leaf) -> Result<()> {
            Err(Error::InvalidContent("vetoed".into()))
        }
    }

    #[test]
    fn test_positions_follow_members() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let owner = ctx.element("text:section");
        let foreign = ctx.element("text:section-source");
        ctx.store_mut().append_child(owner, foreign).unwrap();

        let mut coll = NodeCollection::with_placement(owner, NodeSync, Placement::Leading);
        let a = ctx.element("text:p");
        let b = ctx.element("text:p");
        let c = ctx.element("text:p");
        coll.push(ctx, Leaf(a)).unwrap();
        coll.push(ctx, Leaf(c)).unwrap();
        coll.insert(ctx, 1, Leaf(b)).unwrap();
        assert_eq!(ctx.store().children(owner), &[a, b, c, foreign]);

        let removed = coll.remove(ctx, 1).unwrap();
        assert_eq!(removed.0, b);
        assert_eq!(ctx.store().parent(b), None);
        assert_eq!(coll.nodes(), vec![a, c]);

        let cleared = coll.clear(ctx).unwrap();
        assert_eq!(cleared.iter().map(|l| l.0).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(ctx.store().children(owner), &[foreign]);
    }

    #[test]
    fn test_observer_failure_rolls_back() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let owner = ctx.element("draw:frame");
        let mut coll = NodeCollection::new(owner, Veto);
        let leaf = ctx.element("draw:image");
        assert!(coll.push(ctx, Leaf(leaf)).is_err());
        assert!(coll.is_empty());
        assert!(ctx.store().children(owner).is_empty());
        assert_eq!(ctx.store().parent(leaf), None);
    }

    #[test]
    fn test_attached_node_is_rejected() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let first = ctx.element("text:section");
        let second = ctx.element("text:section");
        let mut left = NodeCollection::new(first, NodeSync);
        let mut right = NodeCollection::new(second, NodeSync);
        let node = ctx.element("text:p");
        left.push(ctx, Leaf(node)).unwrap();

        assert!(matches!(right.push(ctx, Leaf(node)), Err(Error::InvalidContent(_))));
        assert!(left.push(ctx, Leaf(node)).is_err());
        assert!(right.is_empty());
        assert_eq!(left.nodes(), vec![node]);
        assert_eq!(ctx.store().children(first), &[node]);
        assert!(ctx.store().children(second).is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let owner = doc.ctx.element("text:p");
        let mut coll: NodeCollection<Leaf> = NodeCollection::new(owner, NodeSync);
        assert!(matches!(
            coll.remove(&mut doc.ctx, 0),
            Err(Error::IndexOutOfBounds { .. })
        ));
    }
}
