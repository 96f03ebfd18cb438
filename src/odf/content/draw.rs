//! Drawing-layer content: frames and what they host.

use super::hooks::{ContainerKind, ContentCollection, ContentHooks};
use super::{Content, load_children};
use crate::common::{Error, Result};
use crate::odf::document::{DocumentContext, GraphicEntry, ImageData, ImageFormat, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};
use bytes::Bytes;
use std::path::{Path, PathBuf};

fn set_link(ctx: &mut DocumentContext, node: NodeId, href: &str) -> Result<()> {
    let store = ctx.store_mut();
    store.set_attribute(node, "xlink:href", href)?;
    store.set_attribute(node, "xlink:type", "simple")?;
    store.set_attribute(node, "xlink:show", "embed")?;
    store.set_attribute(node, "xlink:actuate", "onLoad")
}

/// A `draw:frame`, the anchor for pictures, text boxes and objects.
#[derive(Debug, Clone)]
pub struct Frame {
    node: NodeId,
    content: ContentCollection,
}

impl Frame {
    pub fn new(ctx: &mut DocumentContext, name: &str) -> Result<Self> {
        let node = ctx.element("draw:frame");
        let store = ctx.store_mut();
        store.set_attribute(node, "draw:name", name)?;
        store.set_attribute(node, "text:anchor-type", "paragraph")?;
        Ok(Self {
            node,
            content: ContentCollection::new(node, ContentHooks::new(ContainerKind::Frame)),
        })
    }

    /// Frame holding `graphic`, sized with svg lengths such as `"4cm"`.
    pub fn with_graphic(
        ctx: &mut DocumentContext,
        name: &str,
        graphic: Graphic,
        width: &str,
        height: &str,
    ) -> Result<Self> {
        let mut frame = Self::new(ctx, name)?;
        frame.set_size(ctx, width, height)?;
        frame.content.push(ctx, Content::Graphic(graphic))?;
        Ok(frame)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "draw:name")
    }

    pub fn set_size(&self, ctx: &mut DocumentContext, width: &str, height: &str) -> Result<()> {
        ctx.set_attribute(self.node, "svg:width", width)?;
        ctx.set_attribute(self.node, "svg:height", height)
    }

    pub fn set_position(&self, ctx: &mut DocumentContext, x: &str, y: &str) -> Result<()> {
        ctx.set_attribute(self.node, "svg:x", x)?;
        ctx.set_attribute(self.node, "svg:y", y)
    }

    /// `paragraph`, `as-char`, `char`, `page` or `frame`.
    pub fn set_anchor_type(&self, ctx: &mut DocumentContext, anchor: &str) -> Result<()> {
        ctx.set_attribute(self.node, "text:anchor-type", anchor)
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "draw:style-name", name)
    }

    /// First graphic hosted by the frame.
    pub fn graphic(&self) -> Option<&Graphic> {
        self.content.iter().find_map(Content::as_graphic)
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
        let content = load_children(ctx, node, ContainerKind::Frame, warnings)?;
        Ok(Self { node, content })
    }
}

/// A `draw:image` inside a frame.
#[derive(Debug, Clone)]
pub struct Graphic {
    node: NodeId,
    frame: Option<NodeId>,
    href: String,
    format: Option<ImageFormat>,
    data: Option<Bytes>,
    source: Option<PathBuf>,
}

impl Graphic {
    fn build(ctx: &mut DocumentContext, href: String) -> Result<Self> {
        let node = ctx.element("draw:image");
        set_link(ctx, node, &href)?;
        Ok(Self {
            node,
            frame: None,
            href,
            format: None,
            data: None,
            source: None,
        })
    }

    /// Embed a picture read from disk.
    ///
    /// Fails with [`Error::Graphic`] when the file cannot be read or is not a
    /// recognised picture; the tree is not touched in that case.
    pub fn from_file(ctx: &mut DocumentContext, path: impl AsRef<Path>) -> Result<Self> {
        let image = ImageData::from_file(path)?;
        let href = ctx.graphics_mut().allocate_href(image.format);
        let mut graphic = Self::build(ctx, href)?;
        graphic.format = Some(image.format);
        graphic.data = Some(image.data);
        graphic.source = Some(image.source);
        Ok(graphic)
    }

    /// Embed a picture held in memory.
    pub fn from_bytes(ctx: &mut DocumentContext, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        let format = ImageFormat::sniff(&data).ok_or_else(|| {
            Error::InvalidFormat(format!("unrecognized image data ({} bytes)", data.len()))
        })?;
        let href = ctx.graphics_mut().allocate_href(format);
        let mut graphic = Self::build(ctx, href)?;
        graphic.format = Some(format);
        graphic.data = Some(data);
        Ok(graphic)
    }

    /// Reference a picture outside the package.
    pub fn linked(ctx: &mut DocumentContext, href: &str) -> Result<Self> {
        let mut graphic = Self::build(ctx, href.to_string())?;
        graphic.format = Path::new(href)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension);
        Ok(graphic)
    }

    pub(crate) fn wrap(store: &NodeStore, node: NodeId) -> Self {
        let href = store.attribute(node, "xlink:href").unwrap_or_default().to_string();
        let format = Path::new(&href)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension);
        let frame = store
            .parent(node)
            .filter(|parent| store.is_named(*parent, "draw:frame"));
        Self {
            node,
            frame,
            href,
            format,
            data: None,
            source: None,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The frame currently hosting this graphic.
    pub fn frame(&self) -> Option<NodeId> {
        self.frame
    }

    pub(crate) fn bind_frame(&mut self, frame: Option<NodeId>) {
        self.frame = frame;
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    pub fn entry(&self) -> GraphicEntry {
        GraphicEntry {
            node: self.node,
            href: self.href.clone(),
            format: self.format,
            data: self.data.clone(),
            source: self.source.clone(),
        }
    }
}

/// A `draw:text-box`.
#[derive(Debug, Clone)]
pub struct TextBox {
    node: NodeId,
    content: ContentCollection,
}

impl TextBox {
    pub fn new(ctx: &mut DocumentContext) -> Self {
        let node = ctx.element("draw:text-box");
        Self {
            node,
            content: ContentCollection::new(node, ContentHooks::new(ContainerKind::TextBox)),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn set_min_height(&self, ctx: &mut DocumentContext, height: &str) -> Result<()> {
        ctx.set_attribute(self.node, "fo:min-height", height)
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
        let content = load_children(ctx, node, ContainerKind::TextBox, warnings)?;
        Ok(Self { node, content })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaShape {
    Rectangle {
        x: String,
        y: String,
        width: String,
        height: String,
    },
    Circle {
        cx: String,
        cy: String,
        r: String,
    },
}

/// A clickable image-map area.
#[derive(Debug, Clone)]
pub struct DrawArea {
    node: NodeId,
    shape: AreaShape,
}

impl DrawArea {
    pub fn new(ctx: &mut DocumentContext, shape: AreaShape, href: &str) -> Result<Self> {
        let node = match &shape {
            AreaShape::Rectangle { x, y, width, height } => {
                let node = ctx.element("draw:area-rectangle");
                let store = ctx.store_mut();
                store.set_attribute(node, "svg:x", x)?;
                store.set_attribute(node, "svg:y", y)?;
                store.set_attribute(node, "svg:width", width)?;
                store.set_attribute(node, "svg:height", height)?;
                node
            },
            AreaShape::Circle { cx, cy, r } => {
                let node = ctx.element("draw:area-circle");
                let store = ctx.store_mut();
                store.set_attribute(node, "svg:cx", cx)?;
                store.set_attribute(node, "svg:cy", cy)?;
                store.set_attribute(node, "svg:r", r)?;
                node
            },
        };
        let store = ctx.store_mut();
        store.set_attribute(node, "xlink:href", href)?;
        store.set_attribute(node, "xlink:type", "simple")?;
        Ok(Self { node, shape })
    }

    pub(crate) fn wrap(store: &NodeStore, node: NodeId) -> Option<Self> {
        let get = |name: &str| store.attribute(node, name).unwrap_or_default().to_string();
        let shape = if store.is_named(node, "draw:area-rectangle") {
            AreaShape::Rectangle {
                x: get("svg:x"),
                y: get("svg:y"),
                width: get("svg:width"),
                height: get("svg:height"),
            }
        } else if store.is_named(node, "draw:area-circle") {
            AreaShape::Circle {
                cx: get("svg:cx"),
                cy: get("svg:cy"),
                r: get("svg:r"),
            }
        } else {
            return None;
        };
        Some(Self { node, shape })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn shape(&self) -> &AreaShape {
        &self.shape
    }

    pub fn href<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "xlink:href")
    }
}

/// A `draw:object` embedding another document.
#[derive(Debug, Clone, Copy)]
pub struct EmbedObject {
    node: NodeId,
}

impl EmbedObject {
    pub fn new(ctx: &mut DocumentContext, href: &str) -> Result<Self> {
        let node = ctx.element("draw:object");
        set_link(ctx, node, href)?;
        Ok(Self { node })
    }

    pub(crate) fn wrap(node: NodeId) -> Self {
        Self { node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn href<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "xlink:href")
    }
}
