//! Load and save boundaries.
//!
//! Packaging is left to the caller: an [`Importer`] fills a document's node
//! store and an [`Exporter`] reads the assembled trees back out. The XML
//! part pair below covers the plain `content.xml`/`styles.xml`/`meta.xml`
//! layout of an unpacked package.

use super::{Document, ImportWarning};
use crate::common::{Error, Result};
use crate::odf::constants::{ODF_CONTENT, ODF_META, ODF_STYLES};
use bytes::Bytes;
use std::fs;
use std::path::Path;

/// Populates a document from some external representation.
pub trait Importer {
    /// Whether the document handed to [`Importer::import`] must be a fresh
    /// blank one rather than whatever the caller already has.
    fn needs_new_document(&self) -> bool {
        false
    }

    /// Fill `document`'s node store and register the part roots with
    /// [`Document::replace_parts`]. Style and content classification runs
    /// afterwards.
    fn import(&mut self, document: &mut Document) -> Result<Vec<ImportWarning>>;
}

/// Serializes an assembled document.
pub trait Exporter {
    fn export(&mut self, document: &Document) -> Result<()>;
}

/// Imports the three XML parts from strings.
///
/// Missing styles or meta parts keep the blank trees of the target document.
#[derive(Debug, Clone, Default)]
pub struct XmlPartsImporter {
    content: String,
    styles: Option<String>,
    meta: Option<String>,
}

impl XmlPartsImporter {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            styles: None,
            meta: None,
        }
    }

    pub fn with_styles(mut self, styles: impl Into<String>) -> Self {
        self.styles = Some(styles.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    /// Read the parts from an unpacked package directory.
    ///
    /// `content.xml` is required; the other two parts are optional.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let content = fs::read_to_string(dir.join(ODF_CONTENT))?;
        let optional = |name: &str| -> Result<Option<String>> {
            let path = dir.join(name);
            if path.exists() {
                Ok(Some(fs::read_to_string(path)?))
            } else {
                Ok(None)
            }
        };
        Ok(Self {
            content,
            styles: optional(ODF_STYLES)?,
            meta: optional(ODF_META)?,
        })
    }
}

impl Importer for XmlPartsImporter {
    fn needs_new_document(&self) -> bool {
        true
    }

    fn import(&mut self, document: &mut Document) -> Result<Vec<ImportWarning>> {
        let blank = document.parts();
        let store = document.ctx.store_mut();
        let content_root = store.parse(&self.content)?;
        let styles_root = match &self.styles {
            Some(xml) => store.parse(xml)?,
            None => blank.styles_root,
        };
        let meta_root = match &self.meta {
            Some(xml) => store.parse(xml)?,
            None => blank.meta_root,
        };
        document.replace_parts(content_root, styles_root, meta_root)?;
        Ok(Vec::new())
    }
}

/// Collects the serialized parts and embedded pictures of a document.
#[derive(Debug, Clone, Default)]
pub struct XmlPartsExporter {
    mime_type: Option<&'static str>,
    content: Option<String>,
    styles: Option<String>,
    meta: Option<String>,
    pictures: Vec<(String, Bytes)>,
}

impl XmlPartsExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        self.mime_type
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn styles(&self) -> Option<&str> {
        self.styles.as_deref()
    }

    pub fn meta(&self) -> Option<&str> {
        self.meta.as_deref()
    }

    /// Embedded picture payloads keyed by package path.
    pub fn pictures(&self) -> &[(String, Bytes)] {
        &self.pictures
    }

    /// Build an importer over the exported parts.
    pub fn to_importer(&self) -> Result<XmlPartsImporter> {
        let content = self
            .content
            .clone()
            .ok_or_else(|| Error::InvalidFormat("nothing has been exported".to_string()))?;
        Ok(XmlPartsImporter {
            content,
            styles: self.styles.clone(),
            meta: self.meta.clone(),
        })
    }

    /// Write the parts out as an unpacked package directory.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let content = self
            .content
            .as_deref()
            .ok_or_else(|| Error::InvalidFormat("nothing has been exported".to_string()))?;
        fs::create_dir_all(dir)?;
        if let Some(mime_type) = self.mime_type {
            fs::write(dir.join("mimetype"), mime_type)?;
        }
        fs::write(dir.join(ODF_CONTENT), content)?;
        if let Some(styles) = &self.styles {
            fs::write(dir.join(ODF_STYLES), styles)?;
        }
        if let Some(meta) = &self.meta {
            fs::write(dir.join(ODF_META), meta)?;
        }
        for (href, data) in &self.pictures {
            let path = dir.join(href);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, data)?;
        }
        log::debug!("wrote {} pictures to {}", self.pictures.len(), dir.display());
        Ok(())
    }
}

impl Exporter for XmlPartsExporter {
    fn export(&mut self, document: &Document) -> Result<()> {
        let parts = document.parts();
        let store = document.ctx.store();
        self.mime_type = Some(document.kind().mime_type());
        self.content = Some(store.to_xml_document(parts.content_root)?);
        self.styles = Some(store.to_xml_document(parts.styles_root)?);
        self.meta = Some(store.to_xml_document(parts.meta_root)?);
        self.pictures = document
            .ctx
            .graphics()
            .iter()
            .filter_map(|entry| entry.data.clone().map(|data| (entry.href.clone(), data)))
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::content::Paragraph;
    use crate::odf::document::{AssemblyOptions, DocumentKind};

    #[test]
    fn test_export_then_import() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let paragraph = Paragraph::with_text(&mut doc.ctx, "kept").unwrap();
        doc.content.push(&mut doc.ctx, paragraph.into()).unwrap();

        let mut exporter = XmlPartsExporter::new();
        doc.save(&AssemblyOptions::default(), &mut exporter).unwrap();
        assert_eq!(exporter.mime_type(), Some(DocumentKind::Text.mime_type()));
        assert!(exporter.content().unwrap().starts_with("<?xml"));

        let mut importer = exporter.to_importer().unwrap();
        let loaded = Document::load(DocumentKind::Text, &mut importer).unwrap();
        assert_eq!(loaded.content.len(), 1);
        assert_eq!(loaded.content.get(0).unwrap().text(loaded.ctx.store()), "kept");
    }

    #[test]
    fn test_directory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = Document::new(DocumentKind::Spreadsheet).unwrap();
        let mut exporter = XmlPartsExporter::new();
        doc.save(&AssemblyOptions::default(), &mut exporter).unwrap();
        exporter.write_to_dir(dir.path()).unwrap();

        let mime = fs::read_to_string(dir.path().join("mimetype")).unwrap();
        assert_eq!(mime, DocumentKind::Spreadsheet.mime_type());

        let mut importer = XmlPartsImporter::from_dir(dir.path()).unwrap();
        let loaded = Document::load(DocumentKind::Text, &mut importer).unwrap();
        assert_eq!(loaded.kind(), DocumentKind::Spreadsheet);
    }

    #[test]
    fn test_missing_content_part() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(XmlPartsImporter::from_dir(dir.path()), Err(Error::Io(_))));
    }
}
