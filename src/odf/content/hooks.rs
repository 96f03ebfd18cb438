//! Side effects bound to content collection events.

use super::collection::{CollectionObserver, NodeCollection};
use super::Content;
use crate::common::{Error, Result};
use crate::odf::document::{DocumentContext, Statistic};
use crate::odf::dom::NodeId;

/// The kind of element that owns a content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Body,
    Paragraph,
    Heading,
    Span,
    Sequence,
    Frame,
    TextBox,
    Cell,
    Section,
    IndexBody,
    Form,
    Other,
}

impl ContainerKind {
    fn is_inline(self) -> bool {
        matches!(
            self,
            ContainerKind::Paragraph | ContainerKind::Heading | ContainerKind::Span | ContainerKind::Sequence
        )
    }
}

/// Child content of a container, synchronised with the container's node.
pub type ContentCollection = NodeCollection<Content, ContentHooks>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentHooks {
    container: ContainerKind,
}

impl ContentHooks {
    pub fn new(container: ContainerKind) -> Self {
        Self { container }
    }

    pub fn container(&self) -> ContainerKind {
        self.container
    }
}

fn statistic_for(item: &Content) -> Option<Statistic> {
    match item {
        Content::Paragraph(_) | Content::Heading(_) => Some(Statistic::Paragraph),
        Content::Table(_) => Some(Statistic::Table),
        Content::Graphic(_) => Some(Statistic::Image),
        Content::EmbedObject(_) => Some(Statistic::Object),
        _ => None,
    }
}

impl CollectionObserver<Content> for ContentHooks {
    fn validate(&self, item: &Content) -> Result<()> {
        match item {
            Content::Table(_) if self.container.is_inline() => Err(Error::InvalidContent(format!(
                "a table cannot be placed inside {:?} content",
                self.container
            ))),
            Content::Graphic(_) if self.container != ContainerKind::Frame => Err(
                Error::InvalidContent("a graphic must be placed inside a frame".to_string()),
            ),
            _ => Ok(()),
        }
    }

    fn on_insert(&self, ctx: &mut DocumentContext, owner: NodeId, item: &mut Content) -> Result<()> {
        if let Content::Graphic(graphic) = item {
            graphic.bind_frame(Some(owner));
            ctx.graphics_mut().register(graphic.entry());
        }
        if let Some(statistic) = statistic_for(item) {
            ctx.bump(statistic, 1)?;
        }
        Ok(())
    }

    fn on_remove(&self, ctx: &mut DocumentContext, _owner: NodeId, item: &mut Content) -> Result<()> {
        if let Content::Graphic(graphic) = item {
            graphic.bind_frame(None);
            ctx.graphics_mut().unregister(graphic.node());
        }
        if let Some(statistic) = statistic_for(item) {
            ctx.bump(statistic, -1)?;
        }
        Ok(())
    }
}
