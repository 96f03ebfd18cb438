//! Per-document state shared by every mutating operation.

use super::graphics::GraphicRegistry;
use super::metadata::{MetaNodes, Metadata, MetadataMut, Statistic};
use crate::common::{Error, Result};
use crate::odf::constants::{
    BODY_SPREADSHEET, BODY_TEXT, NAMESPACES, ODF_SPREADSHEET, ODF_TEXT,
};
use crate::odf::dom::{NodeId, NodeStore, QName};
use serde::{Deserialize, Serialize};

/// Which body flavour the document carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[default]
    Text,
    Spreadsheet,
}

impl DocumentKind {
    /// Qualified name of the element below `office:body`.
    pub fn body_element(self) -> &'static str {
        match self {
            DocumentKind::Text => BODY_TEXT,
            DocumentKind::Spreadsheet => BODY_SPREADSHEET,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Text => ODF_TEXT,
            DocumentKind::Spreadsheet => ODF_SPREADSHEET,
        }
    }

    pub fn is_spreadsheet(self) -> bool {
        matches!(self, DocumentKind::Spreadsheet)
    }
}

/// Owns the node store, statistics handles and graphic registry of one document.
///
/// Content, table and style operations that change the tree take the context
/// explicitly; there is no ambient owner lookup.
#[derive(Debug)]
pub struct DocumentContext {
    store: NodeStore,
    kind: DocumentKind,
    meta: MetaNodes,
    graphics: GraphicRegistry,
}

impl DocumentContext {
    pub(crate) fn new(mut store: NodeStore, kind: DocumentKind, meta_node: NodeId) -> Result<Self> {
        let meta = MetaNodes::locate(&mut store, meta_node)?;
        Ok(Self {
            store,
            kind,
            meta,
            graphics: GraphicRegistry::new(),
        })
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut NodeStore {
        &mut self.store
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: DocumentKind) {
        self.kind = kind;
    }

    pub(crate) fn meta_nodes(&self) -> MetaNodes {
        self.meta
    }

    pub(crate) fn replace_meta(&mut self, meta_node: NodeId) -> Result<()> {
        self.meta = MetaNodes::locate(&mut self.store, meta_node)?;
        Ok(())
    }

    /// Create an element whose prefix must be one of the declared namespaces.
    pub fn create_element(&mut self, qualified: &str) -> Result<NodeId> {
        let name = QName::parse(qualified);
        check_prefix(name.prefix())?;
        Ok(self.store.create_element(name.prefix(), name.local()))
    }

    /// Set an attribute whose prefix must be one of the declared namespaces.
    pub fn set_attribute(&mut self, node: NodeId, qualified: &str, value: &str) -> Result<()> {
        check_prefix(QName::parse(qualified).prefix())?;
        self.store.set_attribute(node, qualified, value)
    }

    pub fn attribute(&self, node: NodeId, qualified: &str) -> Option<&str> {
        self.store.attribute(node, qualified)
    }

    /// Element for internal use; callers pass known-good names.
    pub(crate) fn element(&mut self, qualified: &str) -> NodeId {
        self.store.create_qualified(qualified)
    }

    pub fn metadata(&self) -> Metadata<'_> {
        Metadata::new(&self.store, self.meta)
    }

    pub fn metadata_mut(&mut self) -> MetadataMut<'_> {
        MetadataMut::new(&mut self.store, self.meta)
    }

    /// Shift a statistic counter by `delta`.
    pub(crate) fn bump(&mut self, statistic: Statistic, delta: i64) -> Result<()> {
        self.metadata_mut().adjust(statistic, delta).map(|_| ())
    }

    pub fn graphics(&self) -> &GraphicRegistry {
        &self.graphics
    }

    pub fn graphics_mut(&mut self) -> &mut GraphicRegistry {
        &mut self.graphics
    }
}

fn check_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() || prefix == "xmlns" || NAMESPACES.contains_key(prefix) {
        Ok(())
    } else {
        Err(Error::InvalidFormat(format!("undeclared namespace prefix '{prefix}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> DocumentContext {
        let mut store = NodeStore::new();
        let meta = store.create_qualified("office:meta");
        DocumentContext::new(store, DocumentKind::Text, meta).unwrap()
    }

    #[test]
    fn test_prefix_checked() {
        let mut ctx = context();
        assert!(ctx.create_element("text:p").is_ok());
        assert!(ctx.create_element("bogus:p").is_err());
        let node = ctx.create_element("table:table").unwrap();
        assert!(ctx.set_attribute(node, "table:name", "T1").is_ok());
        assert!(ctx.set_attribute(node, "nope:name", "T1").is_err());
        assert_eq!(ctx.attribute(node, "table:name"), Some("T1"));
    }

    #[test]
    fn test_bump_statistics() {
        let mut ctx = context();
        ctx.bump(Statistic::Table, 1).unwrap();
        ctx.bump(Statistic::Table, 1).unwrap();
        ctx.bump(Statistic::Table, -1).unwrap();
        assert_eq!(ctx.metadata().count(Statistic::Table), 1);
    }
}
