//! Table cells and merge placeholders.

use crate::common::Result;
use crate::odf::constants::{bool_str, parse_bool, parse_repeat};
use crate::odf::content::{
    CollectionObserver, Content, ContainerKind, ContentCollection, ContentHooks, NodeBacked,
    Paragraph,
};
use crate::odf::document::{DocumentContext, ImportWarning};
use crate::odf::dom::{NodeId, NodeStore};

pub(crate) const CELL: &str = "table:table-cell";
pub(crate) const COVERED_CELL: &str = "table:covered-table-cell";
pub(crate) const COLUMNS_SPANNED: &str = "table:number-columns-spanned";
pub(crate) const ROWS_SPANNED: &str = "table:number-rows-spanned";

/// Typed cell value, mirrored into the `office:*` value attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Text string
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Date/time value in ISO 8601 form
    Date(String),
    /// Currency value
    Currency(f64, String),
    /// Percentage value
    Percentage(f64),
    /// Duration in ISO 8601 form
    Time(String),
}

impl CellValue {
    fn value_type(&self) -> Option<&'static str> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(_) => Some("string"),
            CellValue::Number(_) => Some("float"),
            CellValue::Boolean(_) => Some("boolean"),
            CellValue::Date(_) => Some("date"),
            CellValue::Currency(..) => Some("currency"),
            CellValue::Percentage(_) => Some("percentage"),
            CellValue::Time(_) => Some("time"),
        }
    }

    /// What an office suite would show before applying a data style.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Date(s) | CellValue::Time(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => bool_str(*b).to_uppercase(),
            CellValue::Currency(n, code) => format!("{n} {code}"),
            CellValue::Percentage(n) => format!("{}%", n * 100.0),
        }
    }
}

const VALUE_ATTRIBUTES: &[&str] = &[
    "office:value-type",
    "office:value",
    "office:currency",
    "office:boolean-value",
    "office:date-value",
    "office:time-value",
    "office:string-value",
];

/// A `table:table-cell`.
#[derive(Debug, Clone)]
pub struct Cell {
    node: NodeId,
    row: Option<NodeId>,
    content: ContentCollection,
}

impl Cell {
    /// Create a blank cell
    pub fn new(ctx: &mut DocumentContext) -> Self {
        let node = ctx.element(CELL);
        Self {
            node,
            row: None,
            content: ContentCollection::new(node, ContentHooks::new(ContainerKind::Cell)),
        }
    }

    /// Create a string cell holding one paragraph
    pub fn with_text(ctx: &mut DocumentContext, text: &str) -> Result<Self> {
        let mut cell = Self::new(ctx);
        cell.set_value(ctx, &CellValue::Text(text.to_string()))?;
        Ok(cell)
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The row currently holding this cell
    pub fn row(&self) -> Option<NodeId> {
        self.row
    }

    pub fn content(&self) -> &ContentCollection {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut ContentCollection {
        &mut self.content
    }

    /// Raw column-repeat attribute, as written after a merge
    pub fn column_repeating<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, COLUMNS_SPANNED)
    }

    /// Number of grid columns this cell covers (at least 1)
    pub fn column_span(&self, store: &NodeStore) -> usize {
        parse_repeat(self.column_repeating(store))
    }

    pub fn set_column_repeating(&self, ctx: &mut DocumentContext, count: usize) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        ctx.store_mut()
            .set_attribute(self.node, COLUMNS_SPANNED, buffer.format(count.max(1)))
    }

    pub fn row_spanning(&self, store: &NodeStore) -> usize {
        parse_repeat(store.attribute(self.node, ROWS_SPANNED))
    }

    pub fn set_row_spanning(&self, ctx: &mut DocumentContext, count: usize) -> Result<()> {
        let mut buffer = itoa::Buffer::new();
        ctx.store_mut()
            .set_attribute(self.node, ROWS_SPANNED, buffer.format(count.max(1)))
    }

    pub fn style_name<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:style-name")
    }

    pub fn set_style_name(&self, ctx: &mut DocumentContext, name: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:style-name", name)
    }

    pub fn formula<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "table:formula")
    }

    pub fn set_formula(&self, ctx: &mut DocumentContext, formula: &str) -> Result<()> {
        ctx.set_attribute(self.node, "table:formula", formula)
    }

    pub fn value_type<'a>(&self, store: &'a NodeStore) -> Option<&'a str> {
        store.attribute(self.node, "office:value-type")
    }

    /// Read the typed value from the value attributes, falling back to text.
    pub fn value(&self, store: &NodeStore) -> CellValue {
        let attr = |name: &str| store.attribute(self.node, name);
        let number = || attr("office:value").and_then(|v| v.trim().parse::<f64>().ok());
        let parsed = match self.value_type(store) {
            Some("float") => number().map(CellValue::Number),
            Some("percentage") => number().map(CellValue::Percentage),
            Some("currency") => number().map(|n| {
                CellValue::Currency(n, attr("office:currency").unwrap_or_default().to_string())
            }),
            Some("boolean") => attr("office:boolean-value")
                .and_then(parse_bool)
                .map(CellValue::Boolean),
            Some("date") => attr("office:date-value").map(|d| CellValue::Date(d.to_string())),
            Some("time") => attr("office:time-value").map(|t| CellValue::Time(t.to_string())),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            let text = self.text(store);
            if text.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(text)
            }
        })
    }

    /// Replace the value attributes and the displayed paragraph.
    pub fn set_value(&mut self, ctx: &mut DocumentContext, value: &CellValue) -> Result<()> {
        for name in VALUE_ATTRIBUTES {
            ctx.store_mut().remove_attribute(self.node, name)?;
        }
        self.content.clear(ctx)?;
        let Some(value_type) = value.value_type() else {
            return Ok(());
        };

        let store = ctx.store_mut();
        store.set_attribute(self.node, "office:value-type", value_type)?;
        match value {
            CellValue::Number(n) | CellValue::Percentage(n) => {
                store.set_attribute(self.node, "office:value", &n.to_string())?;
            },
            CellValue::Currency(n, code) => {
                store.set_attribute(self.node, "office:value", &n.to_string())?;
                store.set_attribute(self.node, "office:currency", code)?;
            },
            CellValue::Boolean(b) => store.set_attribute(self.node, "office:boolean-value", bool_str(*b))?,
            CellValue::Date(d) => store.set_attribute(self.node, "office:date-value", d)?,
            CellValue::Time(t) => store.set_attribute(self.node, "office:time-value", t)?,
            CellValue::Text(_) | CellValue::Empty => {},
        }
        let paragraph = Paragraph::with_text(ctx, &value.display())?;
        self.content.push(ctx, Content::Paragraph(paragraph))
    }

    /// Paragraph texts joined by newlines.
    pub fn text(&self, store: &NodeStore) -> String {
        self.content
            .iter()
            .map(|c| c.text(store))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn load(
        ctx: &mut DocumentContext,
        node: NodeId,
        row: NodeId,
        warnings: &mut Vec<ImportWarning>,
    ) -> Result<Self> {
        let content = crate::odf::content::load_children(ctx, node, ContainerKind::Cell, warnings)?;
        Ok(Self {
            node,
            row: Some(row),
            content,
        })
    }
}

impl NodeBacked for Cell {
    fn node(&self) -> NodeId {
        self.node
    }
}

/// Keeps [`Cell::row`] pointing at the row that holds the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellHooks;

impl CollectionObserver<Cell> for CellHooks {
    fn on_insert(&self, _ctx: &mut DocumentContext, owner: NodeId, item: &mut Cell) -> Result<()> {
        item.row = Some(owner);
        Ok(())
    }

    fn on_remove(&self, _ctx: &mut DocumentContext, _owner: NodeId, item: &mut Cell) -> Result<()> {
        item.row = None;
        Ok(())
    }
}

/// A `table:covered-table-cell` standing in for a cell hidden by a merge.
#[derive(Debug, Clone, Copy)]
pub struct CellSpan {
    node: NodeId,
    anchor: Option<NodeId>,
}

impl CellSpan {
    /// `anchor` is the node of the cell that absorbed the hidden cell.
    pub fn new(ctx: &mut DocumentContext, anchor: Option<NodeId>) -> Self {
        Self {
            node: ctx.element(COVERED_CELL),
            anchor,
        }
    }

    pub(crate) fn wrap(node: NodeId, anchor: Option<NodeId>) -> Self {
        Self { node, anchor }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }
}

impl NodeBacked for CellSpan {
    fn node(&self) -> NodeId {
        self.node
    }
}
