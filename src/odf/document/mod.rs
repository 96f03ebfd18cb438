//! The document: three part trees, the body content and two style pools.
//!
//! A [`Document`] is built blank with [`Document::new`] or populated by an
//! [`Importer`] through [`Document::load`]. Loading classifies the style
//! containers into pools and walks the body into typed content. Saving runs
//! the assembly pass and hands the result to an [`Exporter`].
//!
//! ```
//! use longan::odf::content::Paragraph;
//! use longan::odf::document::{Document, DocumentKind};
//!
//! let mut doc = Document::new(DocumentKind::Text)?;
//! let paragraph = Paragraph::with_text(&mut doc.ctx, "Hello")?;
//! doc.content.push(&mut doc.ctx, paragraph.into())?;
//! assert_eq!(doc.ctx.metadata().count(longan::odf::document::Statistic::Paragraph), 1);
//! # Ok::<(), longan::common::Error>(())
//! ```

mod assembly;
mod context;
mod graphics;
mod io;
mod metadata;
mod warning;

pub use assembly::AssemblyOptions;
pub use context::{DocumentContext, DocumentKind};
pub use graphics::{GraphicEntry, GraphicRegistry, ImageData, ImageFormat, UnrecognizedImage};
pub use io::{Exporter, Importer, XmlPartsExporter, XmlPartsImporter};
pub use metadata::{DocumentStatistics, Metadata, MetadataMut, Statistic};
pub use warning::ImportWarning;

use crate::common::{Error, Result};
use crate::odf::constants::{
    AUTOMATIC_STYLES, BODY, BODY_SPREADSHEET, BODY_TEXT, COMMON_STYLES, DECLARED_PREFIXES,
    DOCUMENT_CONTENT, DOCUMENT_META, DOCUMENT_STYLES, MASTER_STYLES, META, OFFICE_VERSION,
    namespace_uri,
};
use crate::odf::content::{ContainerKind, ContentCollection, ContentHooks, load_children};
use crate::odf::dom::{NodeId, NodeStore};
use crate::odf::style::{Style, StyleFamily, StylePool, absorb_stray_styles, import_container};

/// Handles to the fixed elements of the three part trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentParts {
    pub content_root: NodeId,
    pub styles_root: NodeId,
    pub meta_root: NodeId,
    /// `office:text` or `office:spreadsheet`
    pub body: NodeId,
    /// `office:automatic-styles` of the content tree
    pub automatic_styles: NodeId,
    /// `office:styles` of the styles tree
    pub common_styles: NodeId,
}

impl DocumentParts {
    /// Resolve the containers below freshly parsed roots, creating any that are missing.
    ///
    /// The body kind is read from the element found under `office:body`;
    /// when there is none, one for `fallback` is created.
    fn locate(
        store: &mut NodeStore,
        content_root: NodeId,
        styles_root: NodeId,
        meta_root: NodeId,
        fallback: DocumentKind,
    ) -> Result<(Self, DocumentKind)> {
        let automatic_styles = store.find_or_append_child(content_root, AUTOMATIC_STYLES)?;
        let office_body = store.find_or_append_child(content_root, BODY)?;
        let (body, kind) = if let Some(text) = store.find_child(office_body, BODY_TEXT) {
            (text, DocumentKind::Text)
        } else if let Some(sheet) = store.find_child(office_body, BODY_SPREADSHEET) {
            (sheet, DocumentKind::Spreadsheet)
        } else {
            let body = store.create_qualified(fallback.body_element());
            store.append_child(office_body, body)?;
            (body, fallback)
        };
        let common_styles = store.find_or_append_child(styles_root, COMMON_STYLES)?;
        Ok((
            Self {
                content_root,
                styles_root,
                meta_root,
                body,
                automatic_styles,
                common_styles,
            },
            kind,
        ))
    }
}

/// An office document held entirely in memory.
#[derive(Debug)]
pub struct Document {
    /// Node store, metadata handles and graphic registry.
    pub ctx: DocumentContext,
    /// Top-level body content.
    pub content: ContentCollection,
    /// Automatic styles, emitted into the content tree.
    pub styles: StylePool,
    /// Common styles, emitted into the styles tree.
    pub common_styles: StylePool,
    parts: DocumentParts,
    warnings: Vec<ImportWarning>,
}

impl Document {
    /// Build a blank document of `kind`.
    pub fn new(kind: DocumentKind) -> Result<Self> {
        let mut store = NodeStore::new();

        let content_root = blank_root(&mut store, DOCUMENT_CONTENT)?;
        let automatic_styles = store.create_qualified(AUTOMATIC_STYLES);
        store.append_child(content_root, automatic_styles)?;
        let office_body = store.create_qualified(BODY);
        store.append_child(content_root, office_body)?;
        let body = store.create_qualified(kind.body_element());
        store.append_child(office_body, body)?;

        let styles_root = blank_root(&mut store, DOCUMENT_STYLES)?;
        let common_styles = store.create_qualified(COMMON_STYLES);
        store.append_child(styles_root, common_styles)?;
        for container in [AUTOMATIC_STYLES, MASTER_STYLES] {
            let node = store.create_qualified(container);
            store.append_child(styles_root, node)?;
        }

        let meta_root = blank_root(&mut store, DOCUMENT_META)?;
        let meta = store.create_qualified(META);
        store.append_child(meta_root, meta)?;

        let ctx = DocumentContext::new(store, kind, meta)?;
        Ok(Self {
            ctx,
            content: ContentCollection::new(body, ContentHooks::new(ContainerKind::Body)),
            styles: StylePool::new(),
            common_styles: StylePool::new(),
            parts: DocumentParts {
                content_root,
                styles_root,
                meta_root,
                body,
                automatic_styles,
                common_styles,
            },
            warnings: Vec::new(),
        })
    }

    /// Load a document through `importer`.
    ///
    /// `kind` is only used when the imported content has no body element.
    pub fn load<I: Importer + ?Sized>(kind: DocumentKind, importer: &mut I) -> Result<Self> {
        let mut document = Document::new(kind)?;
        document.import(importer)?;
        Ok(document)
    }

    /// Import into this document, replacing it with a blank one first when
    /// the importer asks for that.
    ///
    /// Returns the warnings of this import; they are also kept on the document.
    pub fn import<I: Importer + ?Sized>(&mut self, importer: &mut I) -> Result<Vec<ImportWarning>> {
        if importer.needs_new_document() {
            *self = Document::new(self.ctx.kind())?;
        }
        let mut warnings = importer.import(self)?;
        warnings.extend(self.classify()?);
        self.warnings.extend(warnings.iter().cloned());
        Ok(warnings)
    }

    /// Swap in freshly parsed part roots.
    ///
    /// Importers call this after parsing into [`DocumentContext::store_mut`].
    /// Pools, content and the graphic registry are reset; the next
    /// classification pass rebuilds them from the new trees.
    pub fn replace_parts(&mut self, content_root: NodeId, styles_root: NodeId, meta_root: NodeId) -> Result<()> {
        for root in [content_root, styles_root, meta_root] {
            if !self.ctx.store().contains(root) {
                return Err(Error::UnknownNode(root));
            }
        }
        let fallback = self.ctx.kind();
        let (parts, kind) = DocumentParts::locate(
            self.ctx.store_mut(),
            content_root,
            styles_root,
            meta_root,
            fallback,
        )?;
        let meta = self.ctx.store_mut().find_or_append_child(meta_root, META)?;
        self.ctx.replace_meta(meta)?;
        self.ctx.set_kind(kind);
        *self.ctx.graphics_mut() = GraphicRegistry::new();
        self.parts = parts;
        self.content = ContentCollection::new(parts.body, ContentHooks::new(ContainerKind::Body));
        self.styles = StylePool::new();
        self.common_styles = StylePool::new();
        Ok(())
    }

    /// Build pools and typed content from the current trees.
    fn classify(&mut self) -> Result<Vec<ImportWarning>> {
        let parts = self.parts;
        let mut warnings = Vec::new();
        let automatic = import_container(&mut self.ctx, parts.automatic_styles, &mut self.styles, &mut warnings)?;
        let common = import_container(&mut self.ctx, parts.common_styles, &mut self.common_styles, &mut warnings)?;
        let strays = absorb_stray_styles(&mut self.ctx, parts.content_root, &mut self.styles, &mut warnings)?;
        self.content = load_children(&mut self.ctx, parts.body, ContainerKind::Body, &mut warnings)?;
        log::debug!(
            "loaded document: {automatic} automatic styles, {common} common styles, {strays} stray styles, {} top-level items, {} warnings",
            self.content.len(),
            warnings.len()
        );
        Ok(warnings)
    }

    pub fn kind(&self) -> DocumentKind {
        self.ctx.kind()
    }

    pub fn parts(&self) -> DocumentParts {
        self.parts
    }

    pub fn body(&self) -> NodeId {
        self.parts.body
    }

    /// Diagnostics recorded while loading.
    pub fn warnings(&self) -> &[ImportWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ImportWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Get or create an automatic style.
    pub fn request_style(&mut self, family: StyleFamily, name: &str) -> Result<&mut Style> {
        self.styles.request(&mut self.ctx, family, name)
    }

    /// Get or create a common style.
    pub fn request_common_style(&mut self, family: StyleFamily, name: &str) -> Result<&mut Style> {
        self.common_styles.request(&mut self.ctx, family, name)
    }

    /// Assemble, then hand the trees to `exporter`.
    pub fn save<E: Exporter + ?Sized>(&mut self, options: &AssemblyOptions, exporter: &mut E) -> Result<()> {
        self.assemble(options)?;
        exporter.export(self)
    }
}

fn blank_root(store: &mut NodeStore, qualified: &str) -> Result<NodeId> {
    let root = store.create_qualified(qualified);
    for prefix in DECLARED_PREFIXES {
        if let Some(uri) = namespace_uri(prefix) {
            store.set_attribute(root, &format!("xmlns:{prefix}"), uri)?;
        }
    }
    store.set_attribute(root, "office:version", OFFICE_VERSION)?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::content::Paragraph;

    #[test]
    fn test_blank_text_document() {
        let doc = Document::new(DocumentKind::Text).unwrap();
        let store = doc.ctx.store();
        assert!(store.is_named(doc.body(), BODY_TEXT));
        assert!(store.is_named(doc.parts().automatic_styles, AUTOMATIC_STYLES));
        assert_eq!(store.attribute(doc.parts().content_root, "office:version"), Some("1.2"));
        assert!(store.attribute(doc.parts().styles_root, "xmlns:style").is_some());
        assert_eq!(doc.ctx.metadata().count(Statistic::Paragraph), 0);
    }

    #[test]
    fn test_blank_spreadsheet_document() {
        let doc = Document::new(DocumentKind::Spreadsheet).unwrap();
        assert!(doc.ctx.store().is_named(doc.body(), BODY_SPREADSHEET));
        assert!(doc.kind().is_spreadsheet());
    }

    #[test]
    fn test_content_lands_under_body() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let paragraph = Paragraph::with_text(&mut doc.ctx, "x").unwrap();
        let node = paragraph.node();
        doc.content.push(&mut doc.ctx, paragraph.into()).unwrap();
        assert_eq!(doc.ctx.store().parent(node), Some(doc.body()));
    }

    #[test]
    fn test_load_detects_spreadsheet_body() {
        let content = r#"<office:document-content><office:body><office:spreadsheet/></office:body></office:document-content>"#;
        let mut importer = XmlPartsImporter::new(content);
        let doc = Document::load(DocumentKind::Text, &mut importer).unwrap();
        assert_eq!(doc.kind(), DocumentKind::Spreadsheet);
        assert!(doc.ctx.store().find_child(doc.parts().content_root, AUTOMATIC_STYLES).is_some());
    }
}
