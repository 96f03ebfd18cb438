//! Per-document style pools.

use super::definition::{Style, StyleEntry};
use super::family::StyleFamily;
use crate::common::{Error, Result};
use crate::odf::document::DocumentContext;
use crate::odf::dom::NodeId;
use std::collections::HashMap;

/// Named styles of one pool (automatic or common), in insertion order.
///
/// Names are unique within the pool. Unnamed entries (default styles and
/// other verbatim container content) are kept alongside.
#[derive(Debug, Clone, Default)]
pub struct StylePool {
    entries: Vec<StyleEntry>,
    index: HashMap<String, usize>,
}

impl StylePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the style `name` of `family`, creating and registering it
    /// when the pool has no entry of that name.
    ///
    /// A name held by a style of another family is a
    /// [`Error::StyleFamilyMismatch`]; a name held by a verbatim entry is a
    /// [`Error::DuplicateStyle`].
    pub fn request(
        &mut self,
        ctx: &mut DocumentContext,
        family: StyleFamily,
        name: &str,
    ) -> Result<&mut Style> {
        let index = match self.index.get(name).copied() {
            Some(index) => index,
            None => {
                let style = Style::new(ctx, family, name)?;
                log::debug!("created {family} style '{name}'");
                self.push(StyleEntry::Typed(style))
            },
        };
        match &self.entries[index] {
            StyleEntry::Typed(style) if style.family() != family => {
                return Err(Error::StyleFamilyMismatch {
                    name: name.to_string(),
                    existing: style.family(),
                    requested: family,
                });
            },
            StyleEntry::Unknown(_) => return Err(Error::DuplicateStyle(name.to_string())),
            StyleEntry::Typed(_) => {},
        }
        self.entries[index]
            .as_style_mut()
            .ok_or_else(|| Error::DuplicateStyle(name.to_string()))
    }

    fn push(&mut self, entry: StyleEntry) -> usize {
        let index = self.entries.len();
        if let Some(name) = entry.name() {
            self.index.insert(name.to_string(), index);
        }
        self.entries.push(entry);
        index
    }

    /// Register an entry. Named entries must not collide with an existing name.
    pub fn add(&mut self, entry: impl Into<StyleEntry>) -> Result<()> {
        let entry = entry.into();
        if let Some(name) = entry.name()
            && self.index.contains_key(name)
        {
            return Err(Error::DuplicateStyle(name.to_string()));
        }
        self.push(entry);
        Ok(())
    }

    /// Unregister `name`. The style's node is left where it is.
    pub fn remove(&mut self, name: &str) -> Option<StyleEntry> {
        let index = self.index.remove(name)?;
        let entry = self.entries.remove(index);
        for slot in self.index.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(entry)
    }

    pub fn get(&self, name: &str) -> Option<&StyleEntry> {
        self.index.get(name).map(|i| &self.entries[*i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StyleEntry> {
        let index = *self.index.get(name)?;
        self.entries.get_mut(index)
    }

    /// Typed style `name`, if the pool has one.
    pub fn style(&self, name: &str) -> Option<&Style> {
        self.get(name).and_then(StyleEntry::as_style)
    }

    pub fn style_mut(&mut self, name: &str) -> Option<&mut Style> {
        self.get_mut(name).and_then(StyleEntry::as_style_mut)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Whether `node` already backs an entry of this pool.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.entries.iter().any(|e| e.node() == node)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleEntry> {
        self.entries.iter()
    }

    /// Typed styles only.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.entries.iter().filter_map(StyleEntry::as_style)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::document::{Document, DocumentKind};
    use crate::odf::style::UnknownStyle;

    #[test]
    fn test_request_returns_same_style() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let mut pool = StylePool::new();
        let first = pool.request(&mut doc.ctx, StyleFamily::Paragraph, "P1").unwrap().node();
        let again = pool.request(&mut doc.ctx, StyleFamily::Paragraph, "P1").unwrap().node();
        assert_eq!(first, again);
        assert_eq!(pool.len(), 1);

        let err = pool
            .request(&mut doc.ctx, StyleFamily::TableCell, "P1")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::StyleFamilyMismatch {
                existing: StyleFamily::Paragraph,
                requested: StyleFamily::TableCell,
                ..
            }
        ));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_requested_style_is_mutable() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let mut pool = StylePool::new();
        let style = pool.request(&mut doc.ctx, StyleFamily::Paragraph, "P1").unwrap();
        style.paragraph_properties(&mut doc.ctx).unwrap();
        style.set_display_name(&mut doc.ctx, "Body").unwrap();

        let again = pool.request(&mut doc.ctx, StyleFamily::Paragraph, "P1").unwrap();
        assert_eq!(again.properties().len(), 1);
        assert_eq!(again.display_name(doc.ctx.store()), Some("Body"));
    }

    #[test]
    fn test_add_and_remove_keep_index() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let mut pool = StylePool::new();
        for name in ["a", "b", "c"] {
            let style = Style::new(&mut doc.ctx, StyleFamily::Text, name).unwrap();
            pool.add(style).unwrap();
        }
        let dup = Style::new(&mut doc.ctx, StyleFamily::Text, "b").unwrap();
        assert!(matches!(pool.add(dup), Err(Error::DuplicateStyle(_))));

        let unnamed = doc.ctx.element("style:default-style");
        pool.add(UnknownStyle::new(unnamed, None)).unwrap();
        assert!(pool.remove("a").is_some());
        assert_eq!(pool.style("c").map(Style::name), Some("c"));
        assert_eq!(pool.len(), 3);
        assert!(pool.contains_node(unnamed));
    }

    #[test]
    fn test_request_against_verbatim_entry() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let mut pool = StylePool::new();
        let node = doc.ctx.element("number:number-style");
        pool.add(UnknownStyle::new(node, Some("N1".into()))).unwrap();
        assert!(matches!(
            pool.request(&mut doc.ctx, StyleFamily::Text, "N1"),
            Err(Error::DuplicateStyle(_))
        ));
    }
}
