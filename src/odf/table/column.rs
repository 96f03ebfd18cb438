use crate::common::Result;
use crate::odf::constants::parse_repeat;
use crate::odf::content::NodeBacked;
use crate::odf::document::DocumentContext;
use crate::odf::dom::{NodeId, NodeStore};

pub(crate) const COLUMN: &str = "table:table-column";
pub(crate) const COLUMNS_REPEATED: &str = "table:number-columns-repeated";

/// A `table:table-column`, possibly standing for several grid columns.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    node: NodeId,
}

impl Column {
    pub fn new(ctx: &mut DocumentContext) -> Self {
        Self {
            node: ctx.element(COLUMN),
        }
    }

    pub fn with_repeat(ctx: &mut DocumentContext, repeat: usize) -> Result<Self> {
        let column = Self::new(ctx);
        column.set_repeat(ctx, repeat)?;
        Ok(column)
    }

    pub(crate) fn wrap(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Number of grid columns described (1-based, default 1)
    pub fn repeat(&self, store: &NodeStore) -> usize {
        parse_repeat(store.attribute(self.node, COLUMNS_REPEATED))
    }

    /// Set the repeat count; a count of 1 drops the attribute
    pub fn set_repeat(&self, ctx: &mut DocumentContext, repeat: usize) -> Result<()> {
        let store = ctx.store_mut();
        if repeat <= 1 {
            store.remove_attribute(self.node, COLUMNS_REPEATED)?;
            return Ok(());
        }
        let mut buffer = itoa::Buffer::new();
        store.set_attribute(self.node, COLUMNS_REPEATED, buffer.format(repeat))
    }

    pub fn style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:style-name")
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:style-name", name)
    }

    pub fn default_cell_style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:default-cell-style-name")
    }

    pub fn set_default_cell_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:default-cell-style-name", name)
    }
}

impl NodeBacked for Column {
    fn node(&self) -> NodeId {
        self.node
    }
}
