//! Unified error types for Longan.
//!
//! Every fallible operation of the document model reports through [`Error`].
//! Structural errors abort the operation before the node tree is changed;
//! resource errors wrap the underlying cause together with the offending path.
use crate::odf::dom::NodeId;
use crate::odf::style::StyleFamily;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed cause carried by resource errors.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid input format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A node was detached from, or positioned against, a parent it is not a child of
    #[error("node {child} is not a child of node {parent}")]
    NodeNotChild { parent: NodeId, child: NodeId },

    /// A handle that does not belong to this document's node store
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// A style name resolved to a style of another family
    #[error("style '{name}' is a {existing} style, not a {requested} style")]
    StyleFamilyMismatch {
        name: String,
        existing: StyleFamily,
        requested: StyleFamily,
    },

    /// A style with this name is already registered in the pool
    #[error("style '{0}' already exists")]
    DuplicateStyle(String),

    /// Row, column, cell or collection index outside its bounds
    #[error("{context} index {index} out of bounds (length {len})")]
    IndexOutOfBounds {
        context: &'static str,
        index: usize,
        len: usize,
    },

    /// Content rejected by the container it was inserted into
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// A referenced picture could not be read or recognised
    #[error("Graphic error for '{}': {source}", path.display())]
    Graphic {
        path: PathBuf,
        #[source]
        source: BoxedCause,
    },

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),
}

impl Error {
    /// Wrap a picture failure together with the path that caused it.
    pub fn graphic(path: impl Into<PathBuf>, source: impl Into<BoxedCause>) -> Self {
        Error::Graphic {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn out_of_bounds(context: &'static str, index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds {
            context,
            index,
            len,
        }
    }

    /// Whether this error reports a broken structural invariant.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NodeNotChild { .. }
                | Error::UnknownNode(_)
                | Error::StyleFamilyMismatch { .. }
                | Error::DuplicateStyle(_)
                | Error::IndexOutOfBounds { .. }
                | Error::InvalidContent(_)
        )
    }
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
