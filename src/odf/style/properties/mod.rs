//! Typed style properties and the per-style property collection.
//!
//! A [`PropertyCollection`] holds at most one property of each
//! [`PropertyKind`]. Reading a missing kind through
//! [`PropertyCollection::get_or_insert_with`] creates it, so the first read
//! of a kind is a write to the style node.

#[macro_use]
mod macros;
mod graphic;
mod paragraph;
mod table;
mod text;

pub use graphic::{GraphicProperties, SectionProperties};
pub use paragraph::{ParagraphProperties, TabKind, TabStop, TabStops};
pub use table::{CellProperties, ColumnProperties, RowProperties, TableProperties};
pub use text::TextProperties;

use crate::common::Result;
use crate::odf::content::{NodeBacked, NodeCollection, NodeSync};
use crate::odf::document::DocumentContext;
use crate::odf::dom::NodeId;
use phf::phf_map;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    Text,
    Paragraph,
    Table,
    TableColumn,
    TableRow,
    TableCell,
    Graphic,
    Section,
}

static PROPERTY_TAGS: phf::Map<&'static str, PropertyKind> = phf_map! {
    "style:text-properties" => PropertyKind::Text,
    "style:paragraph-properties" => PropertyKind::Paragraph,
    "style:table-properties" => PropertyKind::Table,
    "style:table-column-properties" => PropertyKind::TableColumn,
    "style:table-row-properties" => PropertyKind::TableRow,
    "style:table-cell-properties" => PropertyKind::TableCell,
    "style:graphic-properties" => PropertyKind::Graphic,
    "style:section-properties" => PropertyKind::Section,
};

impl PropertyKind {
    pub fn tag(self) -> &'static str {
        match self {
            PropertyKind::Text => "style:text-properties",
            PropertyKind::Paragraph => "style:paragraph-properties",
            PropertyKind::Table => "style:table-properties",
            PropertyKind::TableColumn => "style:table-column-properties",
            PropertyKind::TableRow => "style:table-row-properties",
            PropertyKind::TableCell => "style:table-cell-properties",
            PropertyKind::Graphic => "style:graphic-properties",
            PropertyKind::Section => "style:section-properties",
        }
    }

    pub fn from_tag(qualified: &str) -> Option<Self> {
        PROPERTY_TAGS.get(qualified).copied()
    }

    /// Position of this kind among a style element's children.
    fn rank(self) -> u8 {
        match self {
            PropertyKind::Graphic => 0,
            PropertyKind::Section => 1,
            PropertyKind::Table => 2,
            PropertyKind::TableColumn => 3,
            PropertyKind::TableRow => 4,
            PropertyKind::TableCell => 5,
            PropertyKind::Paragraph => 6,
            PropertyKind::Text => 7,
        }
    }
}

/// A property type bound to one [`PropertyKind`].
pub trait TypedProperty: NodeBacked + Sized {
    const KIND: PropertyKind;

    /// Fresh element with no attributes.
    fn empty(ctx: &mut DocumentContext) -> Self;

    /// Attributes a newly created instance starts with.
    fn apply_defaults(&mut self, ctx: &mut DocumentContext) -> Result<()>;

    /// Attributes carried over when a raw element is decomposed.
    fn known_attributes() -> &'static phf::Set<&'static str>;

    /// Pick up typed children of a raw element being decomposed.
    fn absorb_children(&mut self, _ctx: &mut DocumentContext, _raw: NodeId) -> Result<()> {
        Ok(())
    }

    fn into_property(self) -> Property;
    fn from_property(property: &Property) -> Option<&Self>;
    fn from_property_mut(property: &mut Property) -> Option<&mut Self>;

    /// Instance with its kind's defaults applied.
    fn create(ctx: &mut DocumentContext) -> Result<Self> {
        let mut property = Self::empty(ctx);
        property.apply_defaults(ctx)?;
        Ok(property)
    }

    /// Typed copy of a raw property element; unknown attributes are dropped.
    fn decompose(ctx: &mut DocumentContext, raw: NodeId) -> Result<Self> {
        let property = Self::empty(ctx);
        let carried: Vec<(String, String)> = ctx
            .store()
            .attributes(raw)
            .iter()
            .map(|a| (a.name.to_string(), a.value.clone()))
            .filter(|(name, _)| Self::known_attributes().contains(name.as_str()))
            .collect();
        for (name, value) in carried {
            ctx.store_mut().set_attribute(property.node(), &name, &value)?;
        }
        let mut property = property;
        property.absorb_children(ctx, raw)?;
        Ok(property)
    }
}

/// A property element the typed model does not interpret, kept verbatim.
#[derive(Debug, Clone, Copy)]
pub struct UnknownProperties {
    node: NodeId,
}

impl UnknownProperties {
    pub(crate) fn wrap(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[derive(Debug, Clone)]
pub enum Property {
    TextProperties(TextProperties),
    ParagraphProperties(ParagraphProperties),
    TableProperties(TableProperties),
    ColumnProperties(ColumnProperties),
    RowProperties(RowProperties),
    CellProperties(CellProperties),
    GraphicProperties(GraphicProperties),
    SectionProperties(SectionProperties),
    Unknown(UnknownProperties),
}

impl Property {
    /// `None` for unknown properties, which may repeat.
    pub fn kind(&self) -> Option<PropertyKind> {
        Some(match self {
            Property::TextProperties(_) => PropertyKind::Text,
            Property::ParagraphProperties(_) => PropertyKind::Paragraph,
            Property::TableProperties(_) => PropertyKind::Table,
            Property::ColumnProperties(_) => PropertyKind::TableColumn,
            Property::RowProperties(_) => PropertyKind::TableRow,
            Property::CellProperties(_) => PropertyKind::TableCell,
            Property::GraphicProperties(_) => PropertyKind::Graphic,
            Property::SectionProperties(_) => PropertyKind::Section,
            Property::Unknown(_) => return None,
        })
    }

    /// Decompose a raw child of a style element by its tag.
    pub(crate) fn decompose(ctx: &mut DocumentContext, raw: NodeId) -> Result<Property> {
        let kind = ctx
            .store()
            .name(raw)
            .and_then(|name| PropertyKind::from_tag(&name.to_string()));
        Ok(match kind {
            Some(PropertyKind::Text) => TextProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::Paragraph) => ParagraphProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::Table) => TableProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::TableColumn) => ColumnProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::TableRow) => RowProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::TableCell) => CellProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::Graphic) => GraphicProperties::decompose(ctx, raw)?.into(),
            Some(PropertyKind::Section) => SectionProperties::decompose(ctx, raw)?.into(),
            None => Property::Unknown(UnknownProperties::wrap(raw)),
        })
    }
}

impl NodeBacked for Property {
    fn node(&self) -> NodeId {
        match self {
            Property::TextProperties(p) => p.node(),
            Property::ParagraphProperties(p) => p.node(),
            Property::TableProperties(p) => p.node(),
            Property::ColumnProperties(p) => p.node(),
            Property::RowProperties(p) => p.node(),
            Property::CellProperties(p) => p.node(),
            Property::GraphicProperties(p) => p.node(),
            Property::SectionProperties(p) => p.node(),
            Property::Unknown(p) => p.node(),
        }
    }
}

/// Properties of one style, at most one per kind.
#[derive(Debug, Clone)]
pub struct PropertyCollection {
    items: NodeCollection<Property, NodeSync>,
}

impl PropertyCollection {
    pub fn new(style_node: NodeId) -> Self {
        Self {
            items: NodeCollection::new(style_node, NodeSync),
        }
    }

    fn index_of(&self, kind: PropertyKind) -> Option<usize> {
        self.items.iter().position(|p| p.kind() == Some(kind))
    }

    /// Where a property of `kind` goes so that kinds stay in schema order.
    fn slot_for(&self, kind: Option<PropertyKind>) -> usize {
        let Some(kind) = kind else {
            return self.items.len();
        };
        self.items
            .iter()
            .position(|p| p.kind().is_none_or(|k| k.rank() > kind.rank()))
            .unwrap_or(self.items.len())
    }

    pub fn contains(&self, kind: PropertyKind) -> bool {
        self.index_of(kind).is_some()
    }

    pub fn get<P: TypedProperty>(&self) -> Option<&P> {
        self.items.iter().find_map(P::from_property)
    }

    pub fn get_mut<P: TypedProperty>(&mut self) -> Option<&mut P> {
        self.items.iter_mut().find_map(P::from_property_mut)
    }

    /// Return the property of kind `P`, creating it with `default` when absent.
    pub fn get_or_insert_with<P, F>(&mut self, ctx: &mut DocumentContext, default: F) -> Result<&mut P>
    where
        P: TypedProperty,
        F: FnOnce(&mut DocumentContext) -> Result<P>,
    {
        let index = match self.index_of(P::KIND) {
            Some(index) => index,
            None => {
                let property = default(ctx)?;
                let slot = self.slot_for(Some(P::KIND));
                self.items.insert(ctx, slot, property.into_property())?;
                slot
            },
        };
        self.items
            .get_mut(index)
            .and_then(P::from_property_mut)
            .ok_or_else(|| {
                crate::common::Error::InvalidContent(format!("no {:?} properties", P::KIND))
            })
    }

    /// Same as [`get_or_insert_with`](Self::get_or_insert_with) using the kind's defaults.
    pub fn get_or_insert<P: TypedProperty>(&mut self, ctx: &mut DocumentContext) -> Result<&mut P> {
        self.get_or_insert_with(ctx, P::create)
    }

    /// Install `property`, removing any existing property of the same kind
    /// first. Returns the replaced one.
    pub fn set(&mut self, ctx: &mut DocumentContext, property: Property) -> Result<Option<Property>> {
        let replaced = match property.kind() {
            Some(kind) => self.remove(ctx, kind)?,
            None => None,
        };
        let slot = self.slot_for(property.kind());
        self.items.insert(ctx, slot, property)?;
        Ok(replaced)
    }

    pub fn remove(&mut self, ctx: &mut DocumentContext, kind: PropertyKind) -> Result<Option<Property>> {
        match self.index_of(kind) {
            Some(index) => self.items.remove(ctx, index).map(Some),
            None => Ok(None),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Nodes of all properties in order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.items.nodes()
    }
}
