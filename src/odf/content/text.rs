//! Paragraph-level and inline text content.

use super::hooks::{ContainerKind, ContentCollection, ContentHooks};
use super::{Content, load_children};
use crate::common::Result;
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};

fn container(ctx: &mut DocumentContext, qualified: &str, kind: ContainerKind) -> (NodeId, ContentCollection) {
    let node = ctx.element(qualified);
    (node, ContentCollection::new(node, ContentHooks::new(kind)))
}

/// Split plain text into text runs and whitespace elements.
///
/// Tabs and newlines become `text:tab` and `text:line-break`; every space
/// after the first in a run is collapsed into one `text:s`.
pub(crate) fn text_runs(ctx: &mut DocumentContext, text: &str) -> Result<Vec<Content>> {
    let mut runs = Vec::new();
    let mut buffer = String::new();

    fn flush(ctx: &mut DocumentContext, buffer: &mut String, runs: &mut Vec<Content>) {
        if !buffer.is_empty() {
            runs.push(Content::Text(TextRun::new(ctx, buffer)));
            buffer.clear();
        }
    }

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\t' => {
                flush(ctx, &mut buffer, &mut runs);
                runs.push(Content::Whitespace(Whitespace::tab(ctx)));
            },
            '\n' => {
                flush(ctx, &mut buffer, &mut runs);
                runs.push(Content::Whitespace(Whitespace::line_break(ctx)));
            },
            '\r' => {},
            ' ' => {
                buffer.push(' ');
                let mut extra = 0;
                while chars.next_if_eq(&' ').is_some() {
                    extra += 1;
                }
                if extra > 0 {
                    flush(ctx, &mut buffer, &mut runs);
                    runs.push(Content::Whitespace(Whitespace::spaces(ctx, extra)?));
                }
            },
            c => buffer.push(c),
        }
    }
    flush(ctx, &mut buffer, &mut runs);
    Ok(runs)
}

/// A `text:p` element.
#[derive(Debug, Clone)]
pub struct Paragraph {
    node: NodeId,
    content: ContentCollection,
}

impl Paragraph {
    pub fn new(ctx: &mut DocumentContext) -> Self {
        let (node, content) = container(ctx, "text:p", ContainerKind::Paragraph);
        Self { node, content }
    }

    pub fn with_text(ctx: &mut DocumentContext, text: &str) -> Result<Self> {
        let mut paragraph = Self::new(ctx);
        paragraph.append_text(ctx, text)?;
        Ok(paragraph)
    }

    pub fn append_text(&mut self, ctx: &mut DocumentContext, text: &str) -> Result<()> {
        for run in text_runs(ctx, text)? {
            self.content.push(ctx, run)?;
        }
        Ok(())
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "text:style-name", name)
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let content = load_children(ctx, node, ContainerKind::Paragraph, warnings)?;
        Ok(Self { node, content })
    }
}

/// A `text:h` element.
#[derive(Debug, Clone)]
pub struct Heading {
    node: NodeId,
    content: ContentCollection,
}

impl Heading {
    pub fn new(ctx: &mut DocumentContext, level: u8) -> Result<Self> {
        let (node, content) = container(ctx, "text:h", ContainerKind::Heading);
        let mut buffer = itoa::Buffer::new();
        ctx.set_attribute(node, "text:outline-level", buffer.format(level.max(1)))?;
        Ok(Self { node, content })
    }

    pub fn with_text(ctx: &mut DocumentContext, level: u8, text: &str) -> Result<Self> {
        let mut heading = Self::new(ctx, level)?;
        for run in text_runs(ctx, text)? {
            heading.content.push(ctx, run)?;
        }
        Ok(heading)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Outline level, 1 when absent or malformed.
    pub fn level(&self, store: &NodeStore) -> u8 {
        store
            .attribute(self.node, "text:outline-level")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1)
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "text:style-name", name)
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let content = load_children(ctx, node, ContainerKind::Heading, warnings)?;
        Ok(Self { node, content })
    }
}

/// A `text:span` element.
#[derive(Debug, Clone)]
pub struct Span {
    node: NodeId,
    content: ContentCollection,
}

impl Span {
    pub fn new(ctx: &mut DocumentContext) -> Self {
        let (node, content) = container(ctx, "text:span", ContainerKind::Span);
        Self { node, content }
    }

    pub fn with_text(ctx: &mut DocumentContext, style_name: &str, text: &str) -> Result<Self> {
        let mut span = Self::new(ctx);
        ctx.set_attribute(span.node, "text:style-name", style_name)?;
        for run in text_runs(ctx, text)? {
            span.content.push(ctx, run)?;
        }
        Ok(span)
    }

    pub fn node(&self) -> NodeId {
        self.node
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
        let content = load_children(ctx, node, ContainerKind::Span, warnings)?;
        Ok(Self { node, content })
    }
}

/// A bare text node.
#[derive(Debug, Clone, Copy)]
pub struct TextRun {
    node: NodeId,
}

impl TextRun {
    pub fn new(ctx: &mut DocumentContext, text: &str) -> Self {
        Self {
            node: ctx.store_mut().create_text(text),
        }
    }

    pub(crate) fn wrap(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn text<'a>(&self, store: &'a NodeStore) -> &'a str {
        store.text(self.node).unwrap_or_default()
    }

    pub fn set_text(&self, ctx: &mut DocumentContext, text: &str) -> Result<()> {
        ctx.store_mut().set_text(self.node, text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitespaceKind {
    /// `text:s`, with its repeat count.
    Space(usize),
    Tab,
    LineBreak,
}

/// Whitespace that markup would otherwise collapse.
#[derive(Debug, Clone, Copy)]
pub struct Whitespace {
    node: NodeId,
    kind: WhitespaceKind,
}

impl Whitespace {
    pub fn spaces(ctx: &mut DocumentContext, count: usize) -> Result<Self> {
        let node = ctx.element("text:s");
        let count = count.max(1);
        if count > 1 {
            let mut buffer = itoa::Buffer::new();
            ctx.store_mut().set_attribute(node, "text:c", buffer.format(count))?;
        }
        Ok(Self {
            node,
            kind: WhitespaceKind::Space(count),
        })
    }

    pub fn tab(ctx: &mut DocumentContext) -> Self {
        Self {
            node: ctx.element("text:tab"),
            kind: WhitespaceKind::Tab,
        }
    }

    pub fn line_break(ctx: &mut DocumentContext) -> Self {
        Self {
            node: ctx.element("text:line-break"),
            kind: WhitespaceKind::LineBreak,
        }
    }

    pub(crate) fn wrap(store: &NodeStore, node: NodeId) -> Option<Self> {
        let kind = if store.is_named(node, "text:s") {
            WhitespaceKind::Space(
                store
                    .attribute(node, "text:c")
                    .and_then(|c| c.trim().parse().ok())
                    .unwrap_or(1),
            )
        } else if store.is_named(node, "text:tab") {
            WhitespaceKind::Tab
        } else if store.is_named(node, "text:line-break") {
            WhitespaceKind::LineBreak
        } else {
            return None;
        };
        Some(Self { node, kind })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> WhitespaceKind {
        self.kind
    }

    pub fn as_str(&self) -> String {
        match self.kind {
            WhitespaceKind::Space(count) => " ".repeat(count),
            WhitespaceKind::Tab => "\t".to_string(),
            WhitespaceKind::LineBreak => "\n".to_string(),
        }
    }
}
