//! OpenDocument object model.
//!
//! The model sits on a node store holding the content, styles and meta part
//! trees. Typed wrappers for content, tables and styles are views over those
//! nodes: every change they make is written to the tree immediately, and the
//! assembly pass before saving only has to rebuild tables and emit the
//! style pools.

pub mod constants;
pub mod content;
pub mod document;
pub mod dom;
pub mod style;
pub mod table;

pub use content::{Content, ContentCollection, Frame, Graphic, Heading, Paragraph, Span};
pub use document::{AssemblyOptions, Document, DocumentContext, DocumentKind, ImportWarning};
pub use dom::{NodeId, NodeStore};
pub use style::{Style, StyleFamily, StylePool};
pub use table::{Cell, CellValue, Row, Table, TableFamily};
