//! Named styles and their property access.

use super::family::StyleFamily;
use super::properties::{
    CellProperties, ColumnProperties, GraphicProperties, ParagraphProperties, Property,
    PropertyCollection, RowProperties, SectionProperties, TableProperties, TextProperties,
    TypedProperty,
};
use crate::common::{Error, Result};
use crate::odf::constants::{DISPLAY_NAME, PARENT_STYLE_NAME, STYLE_FAMILY, STYLE_NAME};
use crate::odf::document::DocumentContext;
use crate::odf::dom::{NodeId, NodeStore};

/// A typed style: name, family and at most one property of each kind.
#[derive(Debug, Clone)]
pub struct Style {
    name: String,
    family: StyleFamily,
    node: NodeId,
    properties: PropertyCollection,
}

impl Style {
    /// Create a detached style element.
    pub fn new(ctx: &mut DocumentContext, family: StyleFamily, name: &str) -> Result<Self> {
        let node = ctx.element(family.element());
        let store = ctx.store_mut();
        store.set_attribute(node, STYLE_NAME, name)?;
        if family != StyleFamily::List {
            store.set_attribute(node, STYLE_FAMILY, family.as_str())?;
        }
        Ok(Self::wrap(node, family, name.to_string()))
    }

    /// Wrap a style element whose children are managed by the caller.
    pub(crate) fn wrap(node: NodeId, family: StyleFamily, name: String) -> Self {
        Self {
            name,
            family,
            node,
            properties: PropertyCollection::new(node),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> StyleFamily {
        self.family
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn attribute<'a>(&self, store: &'a NodeStore, qualified: &str) -> Option<&'a str> {
        store.attribute(self.node, qualified)
    }

    /// Set a style attribute not covered by a dedicated accessor.
    pub fn set_attribute(&self, ctx: &mut DocumentContext, qualified: &str, value: &str) -> Result<()> {
        ctx.set_attribute(self.node, qualified, value)
    }

    pub fn parent_style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, PARENT_STYLE_NAME)
    }

    pub fn set_parent_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.store_mut().set_attribute(self.node, PARENT_STYLE_NAME, name)
    }

    pub fn display_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, DISPLAY_NAME)
    }

    pub fn set_display_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.store_mut().set_attribute(self.node, DISPLAY_NAME, name)
    }

    pub fn properties(&self) -> &PropertyCollection {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyCollection {
        &mut self.properties
    }

    /// Properties of kind `P`, created with their defaults when absent.
    ///
    /// Fails when the family cannot host `P`.
    pub fn properties_of<P: TypedProperty>(&mut self, ctx: &mut DocumentContext) -> Result<&mut P> {
        if !self.family.allows(P::KIND) {
            return Err(Error::InvalidContent(format!(
                "{} styles cannot hold {}",
                self.family,
                P::KIND.tag()
            )));
        }
        self.properties.get_or_insert::<P>(ctx)
    }

    /// Replace the properties of `property`'s kind wholesale.
    pub fn set_properties<P: TypedProperty>(
        &mut self,
        ctx: &mut DocumentContext,
        property: P,
    ) -> Result<Option<Property>> {
        if !self.family.allows(P::KIND) {
            return Err(Error::InvalidContent(format!(
                "{} styles cannot hold {}",
                self.family,
                P::KIND.tag()
            )));
        }
        self.properties.set(ctx, property.into_property())
    }

    pub fn text_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut TextProperties> {
        self.properties_of(ctx)
    }

    pub fn paragraph_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut ParagraphProperties> {
        self.properties_of(ctx)
    }

    pub fn table_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut TableProperties> {
        self.properties_of(ctx)
    }

    pub fn column_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut ColumnProperties> {
        self.properties_of(ctx)
    }

    pub fn row_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut RowProperties> {
        self.properties_of(ctx)
    }

    pub fn cell_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut CellProperties> {
        self.properties_of(ctx)
    }

    pub fn graphic_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut GraphicProperties> {
        self.properties_of(ctx)
    }

    pub fn section_properties(&mut self, ctx: &mut DocumentContext) -> Result<&mut SectionProperties> {
        self.properties_of(ctx)
    }
}

/// A style element kept verbatim: unrecognised family, default styles,
/// data styles and other style-container content.
#[derive(Debug, Clone)]
pub struct UnknownStyle {
    name: Option<String>,
    node: NodeId,
}

impl UnknownStyle {
    pub fn new(node: NodeId, name: Option<String>) -> Self {
        Self { name, node }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[derive(Debug, Clone)]
pub enum StyleEntry {
    Typed(Style),
    Unknown(UnknownStyle),
}

impl StyleEntry {
    pub fn name(&self) -> Option<&str> {
        match self {
            StyleEntry::Typed(style) => Some(style.name()),
            StyleEntry::Unknown(style) => style.name(),
        }
    }

    pub fn node(&self) -> NodeId {
        match self {
            StyleEntry::Typed(style) => style.node(),
            StyleEntry::Unknown(style) => style.node(),
        }
    }

    pub fn family(&self) -> Option<StyleFamily> {
        match self {
            StyleEntry::Typed(style) => Some(style.family()),
            StyleEntry::Unknown(_) => None,
        }
    }

    pub fn as_style(&self) -> Option<&Style> {
        match self {
            StyleEntry::Typed(style) => Some(style),
            StyleEntry::Unknown(_) => None,
        }
    }

    pub fn as_style_mut(&mut self) -> Option<&mut Style> {
        match self {
            StyleEntry::Typed(style) => Some(style),
            StyleEntry::Unknown(_) => None,
        }
    }
}

impl From<Style> for StyleEntry {
    fn from(value: Style) -> Self {
        StyleEntry::Typed(value)
    }
}

impl From<UnknownStyle> for StyleEntry {
    fn from(value: UnknownStyle) -> Self {
        StyleEntry::Unknown(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::content::NodeBacked;
    use crate::odf::document::{Document, DocumentKind};

    #[test]
    fn test_property_singleton() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut style = Style::new(ctx, StyleFamily::Paragraph, "P1").unwrap();
        let first = style.text_properties(ctx).unwrap().node();
        let second = style.text_properties(ctx).unwrap().node();
        assert_eq!(first, second);
        let tagged = ctx
            .store()
            .children(style.node())
            .iter()
            .filter(|c| ctx.store().is_named(**c, "style:text-properties"))
            .count();
        assert_eq!(tagged, 1);
    }

    #[test]
    fn test_kinds_kept_in_schema_order() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut style = Style::new(ctx, StyleFamily::TableCell, "ce1").unwrap();
        style.text_properties(ctx).unwrap();
        style.cell_properties(ctx).unwrap();
        style.paragraph_properties(ctx).unwrap();
        let names: Vec<String> = ctx
            .store()
            .children(style.node())
            .iter()
            .map(|c| ctx.store().name(*c).unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "style:table-cell-properties",
                "style:paragraph-properties",
                "style:text-properties"
            ]
        );
    }

    #[test]
    fn test_defaults_and_wholesale_set() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut style = Style::new(ctx, StyleFamily::Table, "Table1").unwrap();
        let width = style
            .table_properties(ctx)
            .unwrap()
            .width(ctx.store())
            .map(str::to_string);
        assert_eq!(width.as_deref(), Some("16.99cm"));

        let replacement = TableProperties::empty(ctx);
        replacement.set_width(ctx, "10cm").unwrap();
        let old = style.set_properties(ctx, replacement).unwrap().unwrap();
        assert_eq!(ctx.store().parent(old.node()), None);
        assert_eq!(style.properties().len(), 1);
        assert_eq!(
            style.table_properties(ctx).unwrap().width(ctx.store()),
            Some("10cm")
        );
    }

    #[test]
    fn test_family_restricts_kinds() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut style = Style::new(ctx, StyleFamily::Text, "T1").unwrap();
        assert!(style.table_properties(ctx).is_err());
        assert!(style.properties().is_empty());
    }
}
