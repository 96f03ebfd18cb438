//! Table rows, cell placement and merging.

use super::cell::{CELL, COVERED_CELL, Cell, CellHooks, CellSpan};
use crate::common::{Error, Result};
use crate::odf::constants::parse_repeat;
use crate::odf::content::{NodeBacked, NodeCollection, NodeSync, Placement};
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};

pub(crate) const ROW: &str = "table:table-row";

/// A `table:table-row`.
///
/// Visible cells and merge placeholders are tracked in two collections over
/// the same row node. The row's grid width is their combined length.
#[derive(Debug, Clone)]
pub struct Row {
    node: NodeId,
    cells: NodeCollection<Cell, CellHooks>,
    spans: NodeCollection<CellSpan, NodeSync>,
}

impl Row {
    pub fn new(ctx: &mut DocumentContext) -> Self {
        let node = ctx.element(ROW);
        Self::around(node)
    }

    /// Row with `count` blank cells.
    pub fn with_cells(ctx: &mut DocumentContext, count: usize) -> Result<Self> {
        let mut row = Self::new(ctx);
        row.pad_to(ctx, count)?;
        Ok(row)
    }

    fn around(node: NodeId) -> Self {
        Self {
            node,
            cells: NodeCollection::with_placement(node, CellHooks, Placement::Leading),
            spans: NodeCollection::with_placement(node, NodeSync, Placement::Trailing),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn cells(&self) -> &NodeCollection<Cell, CellHooks> {
        &self.cells
    }

    pub fn spans(&self) -> &NodeCollection<CellSpan, NodeSync> {
        &self.spans
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Visible cells plus merge placeholders.
    pub fn width(&self) -> usize {
        self.cells.len() + self.spans.len()
    }

    pub fn repeat(&self, store: &NodeStore) -> usize {
        parse_repeat(store.attribute(self.node, "table:number-rows-repeated"))
    }

    pub fn style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:style-name")
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:style-name", name)
    }

    pub fn push_cell(&mut self, ctx: &mut DocumentContext, cell: Cell) -> Result<()> {
        self.cells.push(ctx, cell)
    }

    /// Append blank cells until the row is `width` wide.
    pub fn pad_to(&mut self, ctx: &mut DocumentContext, width: usize) -> Result<()> {
        while self.width() < width {
            let blank = Cell::new(ctx);
            self.cells.push(ctx, blank)?;
        }
        Ok(())
    }

    /// Place `cell` at `position`.
    ///
    /// Past the end the row is padded with blank cells first. Inside the row
    /// the cell at `position` is replaced and returned. A failed replacement
    /// puts the old cell back.
    pub fn insert_cell_at(
        &mut self,
        ctx: &mut DocumentContext,
        position: usize,
        cell: Cell,
    ) -> Result<Option<Cell>> {
        if position >= self.cells.len() {
            while self.cells.len() < position {
                let blank = Cell::new(ctx);
                self.cells.push(ctx, blank)?;
            }
            self.cells.push(ctx, cell)?;
            return Ok(None);
        }
        let replaced = self.cells.remove(ctx, position)?;
        if let Err(err) = self.cells.insert(ctx, position, cell) {
            self.cells.insert(ctx, position, replaced)?;
            return Err(err);
        }
        Ok(Some(replaced))
    }

    pub fn remove_cell(&mut self, ctx: &mut DocumentContext, index: usize) -> Result<Cell> {
        self.cells.remove(ctx, index)
    }

    /// Merge `count` cells starting at `start` into the start cell.
    ///
    /// The start cell gets a column span of `count`. With `merge_content` the
    /// content of the following cells is moved into it, in order. The
    /// following cells are then removed last to first, each leaving one
    /// [`CellSpan`] behind. Bounds are checked before anything changes.
    pub fn merge_cells(
        &mut self,
        ctx: &mut DocumentContext,
        start: usize,
        count: usize,
        merge_content: bool,
    ) -> Result<()> {
        let len = self.cells.len();
        if start >= len {
            return Err(Error::out_of_bounds("cell", start, len));
        }
        let end = match start.checked_add(count) {
            Some(end) if count > 0 && end <= len => end,
            _ => return Err(Error::out_of_bounds("merge length", count, len - start)),
        };

        let anchor = self.cells.as_slice()[start].node();
        self.cells.as_slice()[start].set_column_repeating(ctx, count)?;

        if merge_content {
            for index in start + 1..end {
                let moved = match self.cells.get_mut(index) {
                    Some(cell) => cell.content_mut().clear(ctx)?,
                    None => continue,
                };
                if let Some(target) = self.cells.get_mut(start) {
                    for item in moved {
                        target.content_mut().push(ctx, item)?;
                    }
                }
            }
        }

        for index in (start + 1..end).rev() {
            self.cells.remove(ctx, index)?;
            let span = CellSpan::new(ctx, Some(anchor));
            self.spans.push(ctx, span)?;
        }
        log::debug!("merged {count} cells at {start} in row {}", self.node);
        Ok(())
    }

    /// Reorder the row's children so each placeholder follows its anchor.
    pub(crate) fn rebuild_node(&self, ctx: &mut DocumentContext) -> Result<()> {
        let store = ctx.store_mut();
        store.clear_children(self.node)?;
        for cell in &self.cells {
            store.append_child(self.node, cell.node())?;
            for span in self.spans.iter().filter(|s| s.anchor() == Some(cell.node())) {
                store.append_child(self.node, span.node())?;
            }
        }
        let anchored: Vec<NodeId> = self.cells.nodes();
        for span in &self.spans {
            if !span.anchor().is_some_and(|a| anchored.contains(&a)) {
                store.append_child(self.node, span.node())?;
            }
        }
        Ok(())
    }

    pub(crate) fn cells_mut(&mut self) -> std::slice::IterMut<'_, Cell> {
        self.cells.iter_mut()
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let mut row = Self::around(node);
        let mut anchor = None;
        let children = ctx.store().children(node).to_vec();
        for child in children {
            if ctx.store().is_named(child, CELL) {
                let cell = Cell::load(ctx, child, node, warnings)?;
                anchor = Some(child);
                row.cells.adopt(cell);
            } else if ctx.store().is_named(child, COVERED_CELL) {
                row.spans.adopt(CellSpan::wrap(child, anchor));
            } else {
                ImportWarning::record(
                    warnings,
                    "table row child is not a cell; dropped",
                    Some(child),
                );
                ctx.store_mut().detach(node, child)?;
            }
        }
        Ok(row)
    }
}

impl NodeBacked for Row {
    fn node(&self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::content::{Content, Paragraph};
    use crate::odf::document::{Document, DocumentKind, Statistic};

    fn row_of(ctx: &mut DocumentContext, texts: &[&str]) -> Row {
        let mut row = Row::new(ctx);
        for text in texts {
            let cell = Cell::with_text(ctx, text).unwrap();
            row.push_cell(ctx, cell).unwrap();
        }
        row
    }

    #[test]
    fn test_insert_past_end_pads() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["a"]);
        let cell = Cell::with_text(ctx, "d").unwrap();
        assert!(row.insert_cell_at(ctx, 3, cell).unwrap().is_none());
        assert_eq!(row.cell_count(), 4);
        assert_eq!(row.cell(3).unwrap().text(ctx.store()), "d");
        assert_eq!(row.cell(2).unwrap().text(ctx.store()), "");
        assert_eq!(ctx.store().children(row.node()), row.cells().nodes().as_slice());
    }

    #[test]
    fn test_insert_inside_replaces() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["a", "b", "c"]);
        let cell = Cell::with_text(ctx, "x").unwrap();
        let replaced = row.insert_cell_at(ctx, 1, cell).unwrap().unwrap();
        assert_eq!(replaced.text(ctx.store()), "b");
        assert_eq!(replaced.row(), None);
        let texts: Vec<String> = row.cells().iter().map(|c| c.text(ctx.store())).collect();
        assert_eq!(texts, ["a", "x", "c"]);
        assert_eq!(row.cell(1).unwrap().row(), Some(row.node()));
    }

    #[test]
    fn test_failed_replace_restores_cell() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["a", "b", "c"]);
        let other = row_of(ctx, &["x"]);
        let stray = other.cell(0).unwrap().clone();
        let before = row.cells().nodes();

        assert!(row.insert_cell_at(ctx, 1, stray).is_err());
        assert_eq!(row.cells().nodes(), before);
        assert_eq!(ctx.store().children(row.node()), before.as_slice());
        assert_eq!(row.cell(1).unwrap().text(ctx.store()), "b");
        assert_eq!(row.cell(1).unwrap().row(), Some(row.node()));
        assert_eq!(ctx.store().parent(other.cell(0).unwrap().node()), Some(other.node()));
    }

    #[test]
    fn test_merge_without_content() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["c0", "c1", "c2", "c3"]);
        let kept: Vec<NodeId> = row.cells().nodes()[..2].to_vec();
        row.merge_cells(ctx, 1, 3, false).unwrap();

        assert_eq!(row.cells().nodes(), kept);
        assert_eq!(row.cell(1).unwrap().column_repeating(ctx.store()), Some("3"));
        assert_eq!(row.spans().len(), 2);
        assert!(row.spans().iter().all(|s| s.anchor() == Some(kept[1])));
        assert_eq!(row.width(), 4);
        assert_eq!(row.cell(1).unwrap().text(ctx.store()), "c1");
    }

    #[test]
    fn test_merge_moves_content_in_order() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["c0", "c1", "c2", "c3"]);
        let before = ctx.metadata().count(Statistic::Paragraph);
        row.merge_cells(ctx, 1, 3, true).unwrap();

        let merged = row.cell(1).unwrap();
        let texts: Vec<String> = merged.content().iter().map(|c| c.text(ctx.store())).collect();
        assert_eq!(texts, ["c1", "c2", "c3"]);
        assert_eq!(ctx.store().children(merged.node()), merged.content().nodes().as_slice());
        assert_eq!(ctx.metadata().count(Statistic::Paragraph), before);
    }

    #[test]
    fn test_merge_out_of_range_leaves_row_untouched() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["c0", "c1"]);
        assert!(matches!(
            row.merge_cells(ctx, 1, 3, true),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(row.merge_cells(ctx, 5, 1, false).is_err());
        assert!(matches!(
            row.merge_cells(ctx, 1, usize::MAX, false),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert_eq!(row.cell_count(), 2);
        assert!(row.spans().is_empty());
        assert_eq!(row.cell(1).unwrap().column_repeating(ctx.store()), None);
    }

    #[test]
    fn test_rebuild_places_spans_after_anchor() {
        let mut doc = Document::new(DocumentKind::Text).unwrap();
        let ctx = &mut doc.ctx;
        let mut row = row_of(ctx, &["a", "b", "c", "d"]);
        row.merge_cells(ctx, 0, 2, false).unwrap();
        let extra = Paragraph::with_text(ctx, "more").unwrap();
        row.cell_mut(0)
            .unwrap()
            .content_mut()
            .push(ctx, Content::Paragraph(extra))
            .unwrap();
        row.rebuild_node(ctx).unwrap();

        let names: Vec<String> = ctx
            .store()
            .children(row.node())
            .iter()
            .map(|c| ctx.store().name(*c).unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            [CELL, COVERED_CELL, CELL, CELL]
        );
    }
}
