//! Tables: rows, columns, cells and merge placeholders.
//!
//! Tables keep their node in sync incrementally like any other content, and
//! are additionally rebuilt from their row and column state at assembly.

mod cell;
mod column;
mod row;
#[allow(clippy::module_inception)]
mod table;

pub use cell::{Cell, CellHooks, CellSpan, CellValue};
pub use column::Column;
pub use row::Row;
pub use table::{Table, TableFamily};

pub(crate) use table::rebuild_tables;
