//! Longan - a node-backed OpenDocument object model
//!
//! Longan builds and edits OpenDocument text and spreadsheet documents in
//! memory. Every typed object, from a paragraph to a table cell to a style
//! property set, is a view over an element of the document's node store, so
//! the XML trees are always current.
//!
//! # Features
//!
//! - **Content tree**: paragraphs, headings, spans, frames, pictures, sections,
//!   tables of contents and forms, with document statistics kept up to date
//! - **Style registry**: get-or-create styles per family with single-instance
//!   property sets, split into automatic and common pools
//! - **Style import**: existing style containers are classified into typed
//!   styles on load, unknown markup is preserved
//! - **Table layout**: column auto-grow, spreadsheet row padding and cell
//!   merging with covered-cell placeholders
//!
//! # Example - Building a spreadsheet
//!
//! ```
//! use longan::odf::document::{AssemblyOptions, Document, DocumentKind, XmlPartsExporter};
//! use longan::odf::table::{Cell, CellValue, Row, Table, TableFamily};
//!
//! # fn main() -> longan::Result<()> {
//! let mut doc = Document::new(DocumentKind::Spreadsheet)?;
//! let mut table = Table::new(&mut doc.ctx, "Sheet1", TableFamily::Spreadsheet)?;
//!
//! let row = Row::with_cells(&mut doc.ctx, 3)?;
//! table.append_row(&mut doc.ctx, row)?;
//! let mut cell = Cell::new(&mut doc.ctx);
//! cell.set_value(&mut doc.ctx, &CellValue::Number(42.0))?;
//! table.append_cell(&mut doc.ctx, 0, cell)?;
//! assert_eq!(table.column_count(doc.ctx.store()), 4);
//!
//! doc.content.push(&mut doc.ctx, table.into())?;
//! let mut exporter = XmlPartsExporter::new();
//! doc.save(&AssemblyOptions::default(), &mut exporter)?;
//! assert!(exporter.content().is_some_and(|xml| xml.contains("table:table-column")));
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod odf;

pub use common::{Error, Result};
pub use odf::{Document, DocumentKind};
