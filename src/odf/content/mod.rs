//! Typed content mirrored into the node tree.
//!
//! Every content value wraps exactly one node. Container variants carry a
//! [`ContentCollection`] whose insert/remove events attach and detach the
//! member nodes and maintain the document statistics.

mod collection;
mod draw;
mod form;
mod hooks;
mod index;
mod text;

pub use collection::{CollectionObserver, NodeBacked, NodeCollection, NodeSync, Placement};
pub use draw::{AreaShape, DrawArea, EmbedObject, Frame, Graphic, TextBox};
pub use form::{ControlKind, Form, FormControl};
pub use hooks::{ContainerKind, ContentCollection, ContentHooks};
pub use index::{Section, TableOfContents, TextSequence};
pub use text::{Heading, Paragraph, Span, TextRun, Whitespace, WhitespaceKind};

use crate::common::Result;
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeKind, NodeStore};
use crate::odf::table::Table;
use bitflags::bitflags;

bitflags! {
    /// What a content variant supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const HAS_STYLE = 0b001;
        const HAS_CHILDREN = 0b010;
        const RENDERS_HTML = 0b100;
    }
}

/// Body children that carry declarations rather than content.
const DECLARATION_TAGS: &[&str] = &[
    "text:sequence-decls",
    "text:variable-decls",
    "text:user-field-decls",
    "text:tracked-changes",
    "text:soft-page-break",
    "text:list",
    "text:bookmark",
    "text:bookmark-start",
    "text:bookmark-end",
    "office:forms",
    "table:calculation-settings",
    "table:content-validations",
    "table:named-expressions",
    "table:database-ranges",
];

/// An element the model does not interpret, kept verbatim.
#[derive(Debug, Clone, Copy)]
pub struct UnknownContent {
    node: NodeId,
}

impl UnknownContent {
    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[derive(Debug, Clone)]
pub enum Content {
    Paragraph(Paragraph),
    Heading(Heading),
    Span(Span),
    Text(TextRun),
    Whitespace(Whitespace),
    Table(Table),
    Frame(Frame),
    Graphic(Graphic),
    TextBox(TextBox),
    Area(DrawArea),
    TableOfContents(TableOfContents),
    TextSequence(TextSequence),
    EmbedObject(EmbedObject),
    Form(Form),
    FormControl(FormControl),
    Section(Section),
    Unknown(UnknownContent),
}

impl NodeBacked for Content {
    fn node(&self) -> NodeId {
        match self {
            Content::Paragraph(c) => c.node(),
            Content::Heading(c) => c.node(),
            Content::Span(c) => c.node(),
            Content::Text(c) => c.node(),
            Content::Whitespace(c) => c.node(),
            Content::Table(c) => c.node(),
            Content::Frame(c) => c.node(),
            Content::Graphic(c) => c.node(),
            Content::TextBox(c) => c.node(),
            Content::Area(c) => c.node(),
            Content::TableOfContents(c) => c.node(),
            Content::TextSequence(c) => c.node(),
            Content::EmbedObject(c) => c.node(),
            Content::Form(c) => c.node(),
            Content::FormControl(c) => c.node(),
            Content::Section(c) => c.node(),
            Content::Unknown(c) => c.node(),
        }
    }
}

impl Content {
    pub fn capabilities(&self) -> Capabilities {
        use Capabilities as C;
        match self {
            Content::Paragraph(_)
            | Content::Heading(_)
            | Content::Span(_)
            | Content::Table(_)
            | Content::Frame(_)
            | Content::Section(_) => C::HAS_STYLE | C::HAS_CHILDREN | C::RENDERS_HTML,
            Content::TableOfContents(_) => C::HAS_STYLE | C::HAS_CHILDREN,
            Content::TextBox(_) => C::HAS_CHILDREN | C::RENDERS_HTML,
            Content::Form(_) => C::HAS_CHILDREN,
            Content::Text(_) | Content::Whitespace(_) | Content::Graphic(_) | Content::TextSequence(_) => {
                C::RENDERS_HTML
            },
            Content::Area(_) | Content::EmbedObject(_) | Content::FormControl(_) | Content::Unknown(_) => {
                C::empty()
            },
        }
    }

    /// The attribute naming this content's style, if it can have one.
    pub fn style_attribute(&self) -> Option<&'static str> {
        match self {
            Content::Paragraph(_)
            | Content::Heading(_)
            | Content::Span(_)
            | Content::Section(_)
            | Content::TableOfContents(_) => Some("text:style-name"),
            Content::Table(_) => Some("table:style-name"),
            Content::Frame(_) => Some("draw:style-name"),
            _ => None,
        }
    }

    pub fn style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        self.style_attribute()
            .and_then(|attr| store.attribute(self.node(), attr))
    }

    /// Reference a style by name. Content without a style slot ignores it.
    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        match self.style_attribute() {
            Some(attr) => ctx.set_attribute(self.node(), attr, name),
            None => Ok(()),
        }
    }

    pub fn children(&self) -> Option<&ContentCollection> {
        match self {
            Content::Paragraph(c) => Some(c.content()),
            Content::Heading(c) => Some(c.content()),
            Content::Span(c) => Some(c.content()),
            Content::Frame(c) => Some(c.content()),
            Content::TextBox(c) => Some(c.content()),
            Content::TableOfContents(c) => Some(c.content()),
            Content::TextSequence(c) => Some(c.content()),
            Content::Form(c) => Some(c.controls()),
            Content::Section(c) => Some(c.content()),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut ContentCollection> {
        match self {
            Content::Paragraph(c) => Some(c.content_mut()),
            Content::Heading(c) => Some(c.content_mut()),
            Content::Span(c) => Some(c.content_mut()),
            Content::Frame(c) => Some(c.content_mut()),
            Content::TextBox(c) => Some(c.content_mut()),
            Content::TableOfContents(c) => Some(c.content_mut()),
            Content::TextSequence(c) => Some(c.content_mut()),
            Content::Form(c) => Some(c.controls_mut()),
            Content::Section(c) => Some(c.content_mut()),
            _ => None,
        }
    }

    /// Plain text of this content and everything below it.
    pub fn text(&self, store: &NodeStore) -> String {
        match self {
            Content::Text(run) => run.text(store).to_string(),
            Content::Whitespace(ws) => ws.as_str(),
            Content::Table(table) => table.text(store),
            Content::Unknown(c) => store.text_content(c.node()),
            other => other
                .children()
                .map(|children| collection_text(children, store))
                .unwrap_or_default(),
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Content::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Content::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Content::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            Content::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_graphic(&self) -> Option<&Graphic> {
        match self {
            Content::Graphic(g) => Some(g),
            _ => None,
        }
    }

    /// Wrap an existing node, walking its children into typed content.
    pub fn from_node(
        ctx: &mut DocumentContext,
        node: NodeId,
        container: ContainerKind,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Content> {
        let store = ctx.store();
        let Some(name) = store.name(node).map(ToString::to_string) else {
            return Ok(match store.kind(node) {
                Some(NodeKind::Text(_)) => Content::Text(TextRun::wrap(node)),
                _ => Content::Unknown(UnknownContent { node }),
            });
        };

        let content = match name.as_str() {
            "text:p" => Content::Paragraph(Paragraph::load(ctx, node, warnings)?),
            "text:h" => Content::Heading(Heading::load(ctx, node, warnings)?),
            "text:span" => Content::Span(Span::load(ctx, node, warnings)?),
            "text:s" | "text:tab" | "text:line-break" => match Whitespace::wrap(ctx.store(), node) {
                Some(ws) => Content::Whitespace(ws),
                None => Content::Unknown(UnknownContent { node }),
            },
            "table:table" => Content::Table(Table::load(ctx, node, warnings)?),
            "draw:frame" => Content::Frame(Frame::load(ctx, node, warnings)?),
            "draw:image" => {
                let graphic = Graphic::wrap(ctx.store(), node);
                ctx.graphics_mut().register(graphic.entry());
                Content::Graphic(graphic)
            },
            "draw:text-box" => Content::TextBox(TextBox::load(ctx, node, warnings)?),
            "draw:area-rectangle" | "draw:area-circle" => match DrawArea::wrap(ctx.store(), node) {
                Some(area) => Content::Area(area),
                None => Content::Unknown(UnknownContent { node }),
            },
            "text:table-of-content" => Content::TableOfContents(TableOfContents::load(ctx, node, warnings)?),
            "text:sequence" => Content::TextSequence(TextSequence::load(ctx, node, warnings)?),
            "draw:object" => Content::EmbedObject(EmbedObject::wrap(node)),
            "form:form" => Content::Form(Form::load(ctx, node, warnings)?),
            "text:section" => Content::Section(Section::load(ctx, node, warnings)?),
            other => match ControlKind::from_tag(other) {
                Some(kind) => Content::FormControl(FormControl::wrap(node, kind)),
                None => {
                    if container == ContainerKind::Body && !DECLARATION_TAGS.contains(&other) {
                        ImportWarning::record(
                            warnings,
                            format!("unrecognized body element <{other}> kept verbatim"),
                            Some(node),
                        );
                    }
                    Content::Unknown(UnknownContent { node })
                },
            },
        };
        Ok(content)
    }
}

fn collection_text(children: &ContentCollection, store: &NodeStore) -> String {
    children.iter().map(|c| c.text(store)).collect()
}

/// Adopt every child of `owner` into a new collection.
pub(crate) fn load_children(
    ctx: &mut DocumentContext,
    owner: NodeId,
    container: ContainerKind,
    warnings: &mut Vec<ImportWarning>,
) -> Result<ContentCollection> {
    let mut collection = ContentCollection::new(owner, ContentHooks::new(container));
    let children = ctx.store().children(owner).to_vec();
    for child in children {
        collection.adopt(Content::from_node(ctx, child, container, warnings)?);
    }
    Ok(collection)
}

impl From<Paragraph> for Content {
    fn from(value: Paragraph) -> Self {
        Content::Paragraph(value)
    }
}

impl From<Heading> for Content {
    fn from(value: Heading) -> Self {
        Content::Heading(value)
    }
}

impl From<Table> for Content {
    fn from(value: Table) -> Self {
        Content::Table(value)
    }
}

impl From<Frame> for Content {
    fn from(value: Frame) -> Self {
        Content::Frame(value)
    }
}

impl From<Graphic> for Content {
    fn from(value: Graphic) -> Self {
        Content::Graphic(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::document::{Document, DocumentKind, Statistic};
    use crate::odf::table::TableFamily;

    fn text_doc() -> Document {
        Document::new(DocumentKind::Text).unwrap()
    }

    #[test]
    fn test_paragraph_text_round_trip() {
        let mut doc = text_doc();
        let para = Paragraph::with_text(&mut doc.ctx, "a  b\tc\nd").unwrap();
        let content = Content::Paragraph(para);
        assert_eq!(content.text(doc.ctx.store()), "a  b\tc\nd");
        let xml = doc.ctx.store().to_xml(content.node()).unwrap();
        assert_eq!(
            xml,
            "<text:p>a <text:s/>b<text:tab/>c<text:line-break/>d</text:p>"
        );
    }

    #[test]
    fn test_counters_follow_collection_events() {
        let mut doc = text_doc();
        let para = Paragraph::with_text(&mut doc.ctx, "hello").unwrap();
        let table = Table::with_size(&mut doc.ctx, "T", 1, 1, TableFamily::Text).unwrap();
        doc.content.push(&mut doc.ctx, para.into()).unwrap();
        doc.content.push(&mut doc.ctx, table.into()).unwrap();
        assert_eq!(doc.ctx.metadata().count(Statistic::Paragraph), 1);
        assert_eq!(doc.ctx.metadata().count(Statistic::Table), 1);

        doc.content.remove(&mut doc.ctx, 1).unwrap();
        assert_eq!(doc.ctx.metadata().count(Statistic::Table), 0);
    }

    #[test]
    fn test_table_rejected_inside_paragraph() {
        let mut doc = text_doc();
        let mut para = Paragraph::new(&mut doc.ctx);
        let table = Table::new(&mut doc.ctx, "T", TableFamily::Text).unwrap();
        let table_node = table.node();
        assert!(para.content_mut().push(&mut doc.ctx, table.into()).is_err());
        assert!(para.content().is_empty());
        assert!(doc.ctx.store().children(para.node()).is_empty());
        assert_eq!(doc.ctx.store().parent(table_node), None);
        assert_eq!(doc.ctx.metadata().count(Statistic::Table), 0);
    }

    #[test]
    fn test_graphic_binds_frame() {
        let mut doc = text_doc();
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let graphic = Graphic::from_bytes(&mut doc.ctx, png.to_vec()).unwrap();
        let mut frame = Frame::new(&mut doc.ctx, "Picture 1").unwrap();
        frame.content_mut().push(&mut doc.ctx, graphic.into()).unwrap();

        let bound = frame.graphic().unwrap();
        assert_eq!(bound.frame(), Some(frame.node()));
        assert!(doc.ctx.graphics().contains(bound.node()));
        assert_eq!(doc.ctx.metadata().count(Statistic::Image), 1);

        let removed = frame.content_mut().remove(&mut doc.ctx, 0).unwrap();
        let removed = removed.as_graphic().unwrap();
        assert_eq!(removed.frame(), None);
        assert!(doc.ctx.graphics().is_empty());
        assert_eq!(doc.ctx.metadata().count(Statistic::Image), 0);
    }

    #[test]
    fn test_sequence_children_are_mutable() {
        let mut doc = text_doc();
        let sequence = TextSequence::new(&mut doc.ctx, "Illustration", "refIllustration0", "1").unwrap();
        let mut content = Content::TextSequence(sequence);
        let shared = content.children().map(ContentCollection::nodes).unwrap();
        let children = content.children_mut().unwrap();
        assert_eq!(children.nodes(), shared);

        let run = children.pop(&mut doc.ctx).unwrap().unwrap();
        assert_eq!(run.text(doc.ctx.store()), "1");
        assert!(content.children().unwrap().is_empty());
        assert!(doc.ctx.store().children(content.node()).is_empty());
    }

    #[test]
    fn test_graphic_needs_frame() {
        let mut doc = text_doc();
        let graphic = Graphic::linked(&mut doc.ctx, "http://example.com/a.png").unwrap();
        assert!(matches!(
            doc.content.push(&mut doc.ctx, graphic.into()),
            Err(crate::Error::InvalidContent(_))
        ));
    }

    #[test]
    fn test_load_walks_known_and_unknown() {
        let xml = r#"<office:text xmlns:office="o" xmlns:text="t" xmlns:draw="d">
            <text:sequence-decls/>
            <text:h text:outline-level="2">Title</text:h>
            <text:p>Body <text:span>bold</text:span></text:p>
            <draw:custom-shape/>
        </office:text>"#;
        let mut doc = text_doc();
        let root = doc.ctx.store_mut().parse(xml).unwrap();
        let mut warnings = Vec::new();
        let content = load_children(&mut doc.ctx, root, ContainerKind::Body, &mut warnings).unwrap();

        assert_eq!(content.len(), 4);
        assert!(matches!(content.get(0), Some(Content::Unknown(_))));
        match content.get(1) {
            Some(Content::Heading(h)) => assert_eq!(h.level(doc.ctx.store()), 2),
            other => panic!("expected heading, got {other:?}"),
        }
        assert_eq!(content.get(2).unwrap().text(doc.ctx.store()), "Body bold");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].node, Some(content.get(3).unwrap().node()));
    }
}
