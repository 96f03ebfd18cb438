//! The table layout engine.

use super::cell::Cell;
use super::column::{COLUMN, Column};
use super::row::{ROW, Row};
use crate::common::{Error, Result};
use crate::odf::content::{Content, ContentCollection, NodeBacked, NodeCollection, NodeSync, Placement};
use crate::odf::document::{DocumentContext, DocumentKind, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};
use serde::{Deserialize, Serialize};

pub(crate) const TABLE: &str = "table:table";

/// Wrappers whose rows or columns are hoisted into the table on load.
const GROUPING_TAGS: &[&str] = &[
    "table:table-header-rows",
    "table:table-rows",
    "table:table-row-group",
    "table:table-header-columns",
    "table:table-columns",
    "table:table-column-group",
];

/// Table children that are neither grid nor grouping and stay in place.
const PASSIVE_TAGS: &[&str] = &[
    "table:title",
    "table:desc",
    "table:table-source",
    "table:scenario",
    "table:shapes",
    "table:named-expressions",
    "office:forms",
    "text:soft-page-break",
];

/// How the table reacts to a row growing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFamily {
    /// Free-form: columns grow, rows are padded only on request.
    #[default]
    Text,
    /// Rectangular: growing a row pads every earlier row to the same width.
    Spreadsheet,
}

impl From<DocumentKind> for TableFamily {
    fn from(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Text => TableFamily::Text,
            DocumentKind::Spreadsheet => TableFamily::Spreadsheet,
        }
    }
}

/// A `table:table` with its column and row collections.
#[derive(Debug, Clone)]
pub struct Table {
    node: NodeId,
    family: TableFamily,
    columns: NodeCollection<Column, NodeSync>,
    rows: NodeCollection<Row, NodeSync>,
}

impl Table {
    /// Create an empty table
    pub fn new(ctx: &mut DocumentContext, name: &str, family: TableFamily) -> Result<Self> {
        let node = ctx.element(TABLE);
        ctx.store_mut().set_attribute(node, "table:name", name)?;
        Ok(Self::around(node, family))
    }

    /// Create a table of blank cells, one column per grid column
    pub fn with_size(
        ctx: &mut DocumentContext,
        name: &str,
        rows: usize,
        columns: usize,
        family: TableFamily,
    ) -> Result<Self> {
        let mut table = Self::new(ctx, name, family)?;
        for _ in 0..columns {
            let column = Column::new(ctx);
            table.columns.push(ctx, column)?;
        }
        for _ in 0..rows {
            let row = Row::with_cells(ctx, columns)?;
            table.rows.push(ctx, row)?;
        }
        Ok(table)
    }

    fn around(node: NodeId, family: TableFamily) -> Self {
        Self {
            node,
            family,
            columns: NodeCollection::with_placement(node, NodeSync, Placement::Leading),
            rows: NodeCollection::with_placement(node, NodeSync, Placement::Trailing),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn family(&self) -> TableFamily {
        self.family
    }

    /// Get the table name
    pub fn name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:name")
    }

    pub fn set_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:name", name)
    }

    pub fn style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:style-name")
    }

    /// Reference a table style by name
    pub fn set_style(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:style-name", name)
    }

    pub fn rows(&self) -> &NodeCollection<Row, NodeSync> {
        &self.rows
    }

    pub fn columns(&self) -> &NodeCollection<Column, NodeSync> {
        &self.columns
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Grid columns described by the column collection, repeats included
    pub fn column_count(&self, store: &NodeStore) -> usize {
        self.columns.iter().map(|c| c.repeat(store)).sum()
    }

    fn checked_row(&mut self, index: usize) -> Result<&mut Row> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(Error::out_of_bounds("row", index, len))
    }

    /// Append a row, growing columns (and padding in spreadsheets) as needed
    pub fn append_row(&mut self, ctx: &mut DocumentContext, row: Row) -> Result<()> {
        self.rows.push(ctx, row)?;
        self.row_changed(ctx, self.rows.len() - 1)
    }

    pub fn insert_row(&mut self, ctx: &mut DocumentContext, index: usize, row: Row) -> Result<()> {
        self.rows.insert(ctx, index, row)?;
        self.row_changed(ctx, index)
    }

    pub fn remove_row(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<Row> {
        self.rows.remove(ctx, index)
    }

    pub fn append_column(&mut self, ctx: &mut DocumentContext, column: Column) -> Result<()> {
        self.columns.push(ctx, column)
    }

    pub fn remove_column(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<Column> {
        self.columns.remove(ctx, index)
    }

    /// Place `cell` at `position` of row `row`; returns the replaced cell
    pub fn insert_cell(
        &mut self,
        ctx: &mut DocumentContext,
        row: usize,
        position: usize,
        cell: Cell,
    ) -> Result<Option<Cell>> {
        let replaced = self.checked_row(row)?.insert_cell_at(ctx, position, cell)?;
        self.row_changed(ctx, row)?;
        Ok(replaced)
    }

    pub fn append_cell(&mut self, ctx: &mut DocumentContext, row: usize, cell: Cell) -> Result<()> {
        self.checked_row(row)?.push_cell(ctx, cell)?;
        self.row_changed(ctx, row)
    }

    pub fn remove_cell(&mut self, ctx: &mut DocumentContext, row: usize, index: usize) -> Result<Cell> {
        self.checked_row(row)?.remove_cell(ctx, index)
    }

    /// Merge `count` cells of row `row`, see [`Row::merge_cells`]
    pub fn merge_cells(
        &mut self,
        ctx: &mut DocumentContext,
        row: usize,
        start: usize,
        count: usize,
        merge_content: bool,
    ) -> Result<()> {
        self.checked_row(row)?
            .merge_cells(ctx, start, count, merge_content)
    }

    /// Cell by row and positional cell index
    pub fn cell(&self, row: usize, index: usize) -> Option<&Cell> {
        self.rows.get(row)?.cell(index)
    }

    pub fn cell_mut(&mut self, row: usize, index: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.cell_mut(index)
    }

    /// Column at the same ordinal as the cell at `cell_index` of row `row`.
    ///
    /// Spans and column repeats are not taken into account; see
    /// [`grid_column_for_cell`](Self::grid_column_for_cell) for that.
    pub fn column_for_cell(&self, row: usize, cell_index: usize) -> Option<&Column> {
        let row = self.rows.get(row)?;
        if cell_index >= row.cell_count() {
            return None;
        }
        self.columns.get(cell_index)
    }

    /// Column covering the first grid column of a cell.
    ///
    /// The grid column is the sum of the spans of the cells before it; that
    /// ordinal is then located in the column collection with repeats expanded.
    pub fn grid_column_for_cell(&self, store: &NodeStore, row: usize, cell_index: usize) -> Option<&Column> {
        let row = self.rows.get(row)?;
        if cell_index >= row.cell_count() {
            return None;
        }
        let ordinal: usize = row
            .cells()
            .iter()
            .take(cell_index)
            .map(|c| c.column_span(store))
            .sum();
        let mut start = 0;
        for column in &self.columns {
            let end = start + column.repeat(store);
            if ordinal < end {
                return Some(column);
            }
            start = end;
        }
        None
    }

    /// Grow the grid after row `index` gained cells.
    ///
    /// Columns are appended until they cover the row's width. In spreadsheet
    /// tables every row before `index` is then padded to that width; rows
    /// after it are left alone.
    fn row_changed(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<()> {
        let Some(width) = self.rows.get(index).map(Row::width) else {
            return Ok(());
        };
        let mut columns = self.column_count(ctx.store());
        while columns < width {
            let column = Column::new(ctx);
            self.columns.push(ctx, column)?;
            columns += 1;
        }
        if self.family == TableFamily::Spreadsheet {
            for earlier in self.rows.iter_mut().take(index) {
                earlier.pad_to(ctx, width)?;
            }
        }
        Ok(())
    }

    /// Rebuild the table node from the column, row and cell state.
    ///
    /// Children that are neither rows nor columns keep their place ahead of
    /// the grid; grouping wrappers are gone after this. Nested tables are
    /// rebuilt first.
    pub fn build_node(&mut self, ctx: &mut DocumentContext) -> Result<()> {
        for row in self.rows.iter_mut() {
            for cell in row.cells_mut() {
                rebuild_tables(ctx, cell.content_mut())?;
            }
            row.rebuild_node(ctx)?;
        }

        let grid: Vec<NodeId> = self.columns.nodes().into_iter().chain(self.rows.nodes()).collect();
        let store = ctx.store_mut();
        let kept: Vec<NodeId> = store
            .clear_children(self.node)?
            .into_iter()
            .filter(|child| !grid.contains(child))
            .collect();
        for child in kept.into_iter().chain(grid) {
            store.append_child(self.node, child)?;
        }
        log::debug!(
            "rebuilt table {} ({} rows, {} columns)",
            self.node,
            self.rows.len(),
            self.columns.len()
        );
        Ok(())
    }

    /// Rows joined by newlines, cells by tabs.
    pub fn text(&self, store: &NodeStore) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.cells()
                    .iter()
                    .map(|c| c.text(store))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Wrap a loaded `table:table`, hoisting grouped rows and columns.
    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let mut table = Self::around(node, ctx.kind().into());
        let mut index = 0;
        while let Some(child) = ctx.store().children(node).get(index).copied() {
            let store = ctx.store();
            if store.is_named(child, COLUMN) {
                table.columns.adopt(Column::wrap(child));
            } else if store.is_named(child, ROW) {
                let row = Row::load(ctx, child, warnings)?;
                table.rows.adopt(row);
            } else if GROUPING_TAGS.iter().any(|tag| store.is_named(child, tag)) {
                let store = ctx.store_mut();
                let grouped = store.clear_children(child)?;
                store.detach(node, child)?;
                for (offset, grouped_child) in grouped.into_iter().enumerate() {
                    store.insert_child(node, index + offset, grouped_child)?;
                }
                continue;
            } else if !store.is_text(child) && !PASSIVE_TAGS.iter().any(|tag| store.is_named(child, tag)) {
                ImportWarning::record(warnings, "unexpected table child kept in place", Some(child));
            }
            index += 1;
        }
        Ok(table)
    }
}

impl NodeBacked for Table {
    fn node(&self) -> NodeId {
        self.node
    }
}

/// Rebuild every table reachable from `content`.
pub(crate) fn rebuild_tables(ctx: &mut DocumentContext, content: &mut ContentCollection) -> Result<()> {
    for item in content.iter_mut() {
        if let Content::Table(table) = item {
            table.build_node(ctx)?;
        } else if let Some(children) = item.children_mut() {
            rebuild_tables(ctx, children)?;
        }
    }
    Ok(())
}
