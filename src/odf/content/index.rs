//! Sections, indexes and numbered sequences.

use super::hooks::{ContainerKind, ContentCollection, ContentHooks};
use super::{load_children, text::text_runs};
use crate::common::Result;
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};

/// A `text:section`.
#[derive(Debug, Clone)]
pub struct Section {
    node: NodeId,
    content: ContentCollection,
}

impl Section {
    pub fn new(ctx: &mut DocumentContext, name: &str) -> Result<Self> {
        let node = ctx.element("text:section");
        ctx.store_mut().set_attribute(node, "text:name", name)?;
        Ok(Self {
            node,
            content: ContentCollection::new(node, ContentHooks::new(ContainerKind::Section)),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "text:name")
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "text:style-name", name)
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let content = load_children(ctx, node, ContainerKind::Section, warnings)?;
        Ok(Self { node, content })
    }
}

/// A `text:table-of-content`.
///
/// The entries live under the `text:index-body` child; the source element
/// only describes how an office suite regenerates them.
#[derive(Debug, Clone)]
pub struct TableOfContents {
    node: NodeId,
    source: NodeId,
    body: NodeId,
    content: ContentCollection,
}

impl TableOfContents {
    pub fn new(ctx: &mut DocumentContext, name: &str, title: &str) -> Result<Self> {
        let node = ctx.element("text:table-of-content");
        let source = ctx.element("text:table-of-content-source");
        let template = ctx.element("text:index-title-template");
        let body = ctx.element("text:index-body");

        let store = ctx.store_mut();
        store.set_attribute(node, "text:name", name)?;
        store.set_attribute(node, "text:protected", "true")?;
        store.set_attribute(source, "text:outline-level", "10")?;
        store.append_child(node, source)?;
        store.append_child(source, template)?;
        store.set_text_content(template, title)?;
        store.append_child(node, body)?;

        Ok(Self {
            node,
            source,
            body,
            content: ContentCollection::new(body, ContentHooks::new(ContainerKind::IndexBody)),
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn title(&self, store: &NodeStore) -> String {
        store
            .find_child(self.source, "text:index-title-template")
            .map(|t| store.text_content(t))
            .unwrap_or_default()
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "text:style-name", name)
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let source = ctx
            .store_mut()
            .find_or_append_child(node, "text:table-of-content-source")?;
        let body = ctx.store_mut().find_or_append_child(node, "text:index-body")?;
        let content = load_children(ctx, body, ContainerKind::IndexBody, warnings)?;
        Ok(Self {
            node,
            source,
            body,
            content,
        })
    }
}

/// A `text:sequence`, an auto-numbered caption counter.
#[derive(Debug, Clone)]
pub struct TextSequence {
    node: NodeId,
    content: ContentCollection,
}

impl TextSequence {
    /// `name` is the sequence variable (`Illustration`, `Table`, ...);
    /// `display` is the rendered number.
    pub fn new(ctx: &mut DocumentContext, name: &str, reference: &str, display: &str) -> Result<Self> {
        let node = ctx.element("text:sequence");
        let store = ctx.store_mut();
        store.set_attribute(node, "text:name", name)?;
        store.set_attribute(node, "text:formula", &format!("ooow:{name}+1"))?;
        store.set_attribute(node, "style:num-format", "1")?;
        store.set_attribute(node, "text:ref-name", reference)?;
        let mut content = ContentCollection::new(node, ContentHooks::new(ContainerKind::Sequence));
        for run in text_runs(ctx, display)? {
            content.push(ctx, run)?;
        }
        Ok(Self { node, content })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "text:name")
    }

    pub fn reference<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "text:ref-name")
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let content = load_children(ctx, node, ContainerKind::Sequence, warnings)?;
        Ok(Self { node, content })
    }
}
