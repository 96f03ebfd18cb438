//! Form containers and their controls.

use super::hooks::{ContainerKind, ContentCollection, ContentHooks};
use super::load_children;
use crate::common::Result;
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};
use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Button,
    Text,
    TextArea,
    CheckBox,
    Radio,
    ListBox,
    ComboBox,
    FixedText,
    Hidden,
}

static CONTROL_TAGS: phf::Map<&'static str, ControlKind> = phf_map! {
    "form:button" => ControlKind::Button,
    "form:text" => ControlKind::Text,
    "form:textarea" => ControlKind::TextArea,
    "form:checkbox" => ControlKind::CheckBox,
    "form:radio" => ControlKind::Radio,
    "form:listbox" => ControlKind::ListBox,
    "form:combobox" => ControlKind::ComboBox,
    "form:fixed-text" => ControlKind::FixedText,
    "form:hidden" => ControlKind::Hidden,
};

impl ControlKind {
    pub fn tag(self) -> &'static str {
        match self {
            ControlKind::Button => "form:button",
            ControlKind::Text => "form:text",
            ControlKind::TextArea => "form:textarea",
            ControlKind::CheckBox => "form:checkbox",
            ControlKind::Radio => "form:radio",
            ControlKind::ListBox => "form:listbox",
            ControlKind::ComboBox => "form:combobox",
            ControlKind::FixedText => "form:fixed-text",
            ControlKind::Hidden => "form:hidden",
        }
    }

    pub fn from_tag(qualified: &str) -> Option<Self> {
        CONTROL_TAGS.get(qualified).copied()
    }
}

/// A `form:form`.
#[derive(Debug, Clone)]
pub struct Form {
    node: NodeId,
    controls: ContentCollection,
}

impl Form {
    pub fn new(ctx: &mut DocumentContext, name: &str) -> Result<Self> {
        let node = ctx.element("form:form");
        let store = ctx.store_mut();
        store.set_attribute(node, "form:name", name)?;
        store.set_attribute(node, "form:apply-filter", "true")?;
        store.set_attribute(node, "form:command-type", "table")?;
        Ok(Self {
            node,
            controls: ContentCollection::new(node, ContentHooks::new(ContainerKind::Form)),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "form:name")
    }

    pub fn controls(&self) -> &ContentCollection {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut ContentCollection {
        &mut self.controls
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let controls = load_children(ctx, node, ContainerKind::Form, warnings)?;
        Ok(Self { node, controls })
    }
}

/// A single control inside a form.
#[derive(Debug, Clone, Copy)]
pub struct FormControl {
    node: NodeId,
    kind: ControlKind,
}

impl FormControl {
    pub fn new(ctx: &mut DocumentContext, kind: ControlKind, id: &str, name: &str) -> Result<Self> {
        let node = ctx.element(kind.tag());
        let store = ctx.store_mut();
        store.set_attribute(node, "form:id", id)?;
        store.set_attribute(node, "xml:id", id)?;
        store.set_attribute(node, "form:name", name)?;
        Ok(Self { node, kind })
    }

    pub(crate) fn wrap(node: NodeId, kind: ControlKind) -> Self {
        Self { node, kind }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn id<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "form:id")
    }

    pub fn set_label(&self, ctx: &mut DocumentContext, label: &str) -> Result<()> {
        ctx.set_attribute(self.node, "form:label", label)
    }

    pub fn set_value(&self, ctx: &mut DocumentContext, value: &str) -> Result<()> {
        ctx.set_attribute(self.node, "form:value", value)
    }
}
