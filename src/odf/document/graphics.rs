//! Embedded picture bookkeeping.

use crate::common::{Error, Result};
use crate::odf::constants::PICTURES_FOLDER;
use crate::odf::dom::NodeId;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Raster and vector formats recognised by signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Svg,
}

impl ImageFormat {
    /// Detect the format from the leading bytes of `data`.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
            [b'B', b'M', ..] => Some(ImageFormat::Bmp),
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(ImageFormat::Tiff),
            _ => {
                let head = &data[..data.len().min(512)];
                let head = String::from_utf8_lossy(head);
                let head = head.trim_start_matches('\u{feff}').trim_start();
                (head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")))
                    .then_some(ImageFormat::Svg)
            },
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tif",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Svg => "image/svg+xml",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            "svg" => Some(ImageFormat::Svg),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized image data ({len} bytes)")]
pub struct UnrecognizedImage {
    pub len: usize,
}

/// Picture payload loaded from disk.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub format: ImageFormat,
    pub data: Bytes,
    pub source: PathBuf,
}

impl ImageData {
    /// Read and identify a picture file.
    ///
    /// Any read or identification failure is reported as [`Error::Graphic`]
    /// carrying the path and the underlying cause.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::graphic(path, e))?;
        let format = ImageFormat::sniff(&data)
            .ok_or_else(|| Error::graphic(path, UnrecognizedImage { len: data.len() }))?;
        Ok(Self {
            format,
            data: Bytes::from(data),
            source: path.to_path_buf(),
        })
    }
}

/// A picture registered with the document.
#[derive(Debug, Clone)]
pub struct GraphicEntry {
    /// The `draw:image` node.
    pub node: NodeId,
    /// Package-relative location, `Pictures/...` for embedded data.
    pub href: String,
    pub format: Option<ImageFormat>,
    pub data: Option<Bytes>,
    pub source: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct GraphicRegistry {
    entries: Vec<GraphicEntry>,
    issued: usize,
}

impl GraphicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry, replacing any previous entry for the same node.
    pub fn register(&mut self, entry: GraphicEntry) {
        log::debug!("registering graphic {} at {}", entry.node, entry.href);
        match self.entries.iter_mut().find(|e| e.node == entry.node) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn unregister(&mut self, node: NodeId) -> Option<GraphicEntry> {
        let pos = self.entries.iter().position(|e| e.node == node)?;
        Some(self.entries.remove(pos))
    }

    pub fn get(&self, node: NodeId) -> Option<&GraphicEntry> {
        self.entries.iter().find(|e| e.node == node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GraphicEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand out a package path that no registered entry uses.
    pub fn allocate_href(&mut self, format: ImageFormat) -> String {
        loop {
            self.issued += 1;
            let href = format!("{PICTURES_FOLDER}image{}.{}", self.issued, format.extension());
            if !self.entries.iter().any(|e| e.href == href) {
                return href;
            }
        }
    }
}
